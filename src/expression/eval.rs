//! Expression evaluation implementation.

use crate::access::Value;
use crate::compress::CompressTool;
use crate::expression::{ColumnRef, Expression, ExpressionError, ExpressionResult};

/// Evaluator for expressions
pub struct ExpressionEvaluator<'a> {
    /// The tuple values to evaluate against
    tuple_values: &'a [Value],
    /// Service performing the COMPRESS / EXPAND byte transforms
    compress_tool: &'a dyn CompressTool,
}

impl<'a> ExpressionEvaluator<'a> {
    /// Create a new evaluator with tuple values
    pub fn new(tuple_values: &'a [Value], compress_tool: &'a dyn CompressTool) -> Self {
        Self {
            tuple_values,
            compress_tool,
        }
    }

    pub fn compress_tool(&self) -> &'a dyn CompressTool {
        self.compress_tool
    }

    /// Evaluate an expression and return the result
    pub fn evaluate(&self, expr: &Expression) -> ExpressionResult<Value> {
        match expr {
            Expression::Literal(lit) => Ok(lit.value.clone()),

            Expression::ColumnRef(col) => self.evaluate_column_ref(col),

            Expression::Cast { expr, data_type } => self.evaluate(expr)?.cast_to(*data_type),

            Expression::Function(func) => func.evaluate(self),
        }
    }

    /// Evaluate a column reference
    fn evaluate_column_ref(&self, col: &ColumnRef) -> ExpressionResult<Value> {
        self.tuple_values
            .get(col.index)
            .cloned()
            .ok_or(ExpressionError::ColumnIndexOutOfBounds {
                index: col.index,
                tuple_size: self.tuple_values.len(),
            })
    }
}

/// Helper function to evaluate an expression against tuple values
pub fn evaluate_expression(
    expr: &Expression,
    tuple_values: &[Value],
    compress_tool: &dyn CompressTool,
) -> ExpressionResult<Value> {
    ExpressionEvaluator::new(tuple_values, compress_tool).evaluate(expr)
}
