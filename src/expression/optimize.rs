//! Local constant folding.
//!
//! Optimization walks the tree bottom-up. Each node either keeps its place
//! (with rewritten operands) or hands back a replacement that the parent
//! splices in; nothing is mutated through shared references.

use crate::compress::CompressTool;
use crate::expression::function::CompressFunction;
use crate::expression::{Expression, ExpressionEvaluator, ExpressionResult};
use log::debug;

/// Outcome of optimizing a function node
#[derive(Debug, Clone, PartialEq)]
pub enum Optimized {
    /// The node stays, operands rewritten and result type fixed
    Unchanged(CompressFunction),
    /// The node was folded into a different expression
    Replaced(Expression),
}

impl Optimized {
    pub fn into_expression(self) -> Expression {
        match self {
            Optimized::Unchanged(func) => Expression::Function(func),
            Optimized::Replaced(expr) => expr,
        }
    }
}

/// Prepares expression trees for repeated evaluation
pub struct ExpressionOptimizer<'a> {
    compress_tool: &'a dyn CompressTool,
}

impl<'a> ExpressionOptimizer<'a> {
    pub fn new(compress_tool: &'a dyn CompressTool) -> Self {
        Self { compress_tool }
    }

    /// Evaluator for column-free subtrees
    pub fn constant_evaluator(&self) -> ExpressionEvaluator<'a> {
        ExpressionEvaluator::new(&[], self.compress_tool)
    }

    /// Optimize `expr`, returning the tree to use in its place
    pub fn optimize(&self, expr: Expression) -> ExpressionResult<Expression> {
        match expr {
            Expression::Literal(_) | Expression::ColumnRef(_) => Ok(expr),

            Expression::Cast { expr, data_type } => {
                let operand = self.optimize(*expr)?;
                if operand.is_constant() {
                    let value = self.constant_evaluator().evaluate(&operand)?.cast_to(data_type)?;
                    debug!("folded CAST({} AS {}) into constant {}", operand, data_type, value);
                    return Ok(Expression::typed_literal(value, data_type));
                }
                Ok(Expression::cast(operand, data_type))
            }

            Expression::Function(func) => Ok(func.optimize(self)?.into_expression()),
        }
    }
}

/// Helper function to optimize an expression with the given tool
pub fn optimize_expression(
    expr: Expression,
    compress_tool: &dyn CompressTool,
) -> ExpressionResult<Expression> {
    ExpressionOptimizer::new(compress_tool).optimize(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{DataType, Value};
    use crate::compress::{CompressError, StandardCompressTool};
    use crate::expression::{evaluate_expression, ExpressionError};

    #[test]
    fn test_leaves_unchanged() {
        let tool = StandardCompressTool::default();
        let optimizer = ExpressionOptimizer::new(&tool);

        let lit = Expression::literal(Value::Int32(1));
        assert_eq!(optimizer.optimize(lit.clone()).unwrap(), lit);

        let col = Expression::column_with_name(0, "data");
        assert_eq!(optimizer.optimize(col.clone()).unwrap(), col);
    }

    #[test]
    fn test_cast_folding() {
        let tool = StandardCompressTool::default();
        let optimizer = ExpressionOptimizer::new(&tool);

        let expr = Expression::cast(Expression::literal(Value::Null), DataType::Varbinary);
        assert_eq!(
            optimizer.optimize(expr).unwrap(),
            Expression::typed_literal(Value::Null, DataType::Varbinary)
        );

        let expr = Expression::cast(Expression::column(0), DataType::Varbinary);
        assert_eq!(optimizer.optimize(expr.clone()).unwrap(), expr);
    }

    #[test]
    fn test_folding_preserves_results() {
        let tool = StandardCompressTool::default();
        let payload = Expression::literal(Value::binary(b"folding folding folding".to_vec()));

        let cases = vec![
            Expression::compress(payload.clone()),
            Expression::compress_with(payload.clone(), Expression::literal(Value::String("DEFLATE".into()))),
            Expression::compress_with(payload.clone(), Expression::literal(Value::Null)),
            Expression::expand(Expression::compress(payload.clone())),
            Expression::expand(Expression::literal(Value::Null)),
            Expression::compress(Expression::cast(
                Expression::literal(Value::String("text".into())),
                DataType::Varbinary,
            )),
        ];

        for expr in cases {
            let direct = evaluate_expression(&expr, &[], &tool).unwrap();
            let folded = optimize_expression(expr.clone(), &tool).unwrap();
            assert!(
                matches!(&folded, Expression::Literal(lit) if lit.data_type == Some(DataType::Varbinary)),
                "{} was not folded",
                expr
            );
            assert_eq!(evaluate_expression(&folded, &[], &tool).unwrap(), direct);
        }
    }

    #[test]
    fn test_nested_partial_folding() {
        let tool = StandardCompressTool::default();

        // COMPRESS(col, CAST(NULL AS VARCHAR)): the cast folds, the call stays
        let expr = Expression::compress_with(
            Expression::column(0),
            Expression::cast(Expression::literal(Value::Null), DataType::Varchar),
        );
        match optimize_expression(expr, &tool).unwrap() {
            Expression::Function(func) => {
                assert!(func.is_optimized());
                assert_eq!(
                    func.algorithm(),
                    Some(&Expression::typed_literal(Value::Null, DataType::Varchar))
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_folding_surfaces_tool_errors() {
        let tool = StandardCompressTool::default();
        let expr = Expression::compress_with(
            Expression::literal(Value::binary(vec![1u8, 2, 3])),
            Expression::literal(Value::String("LZF".into())),
        );
        assert_eq!(
            optimize_expression(expr, &tool),
            Err(ExpressionError::Compression(
                CompressError::UnsupportedAlgorithm {
                    name: "LZF".to_string()
                }
            ))
        );
    }

    #[test]
    fn test_optimized_into_expression() {
        let replaced = Optimized::Replaced(Expression::literal(Value::Null));
        assert_eq!(replaced.into_expression(), Expression::literal(Value::Null));

        let kept = Optimized::Unchanged(CompressFunction::expand(Expression::column(0)));
        assert!(matches!(kept.into_expression(), Expression::Function(_)));
    }
}
