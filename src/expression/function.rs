//! The COMPRESS and EXPAND scalar functions.
//!
//! Both share a required binary payload; only COMPRESS takes the optional
//! algorithm name. The node starts unoptimized (`result_type` unset) and is
//! optimized exactly once, after which it either stays in the tree with its
//! result type fixed to VARBINARY or is replaced by a constant.

use crate::access::{DataType, Value};
use crate::expression::optimize::{ExpressionOptimizer, Optimized};
use crate::expression::{Expression, ExpressionEvaluator, ExpressionResult};
use log::debug;

const NAMES: [&str; 2] = ["COMPRESS", "EXPAND"];

/// Which of the two functions a node implements
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Compress = 0,
    Expand = 1,
}

impl FunctionKind {
    /// SQL name of the function
    pub fn name(&self) -> &'static str {
        NAMES[*self as usize]
    }

    /// Case-insensitive lookup by SQL name
    pub fn from_name(name: &str) -> Option<Self> {
        [FunctionKind::Compress, FunctionKind::Expand]
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

/// Kind-specific operands
#[derive(Debug, Clone, PartialEq)]
pub enum CompressOp {
    Compress { algorithm: Option<Box<Expression>> },
    Expand,
}

/// A COMPRESS or EXPAND call in an expression tree
#[derive(Debug, Clone, PartialEq)]
pub struct CompressFunction {
    payload: Box<Expression>,
    op: CompressOp,
    result_type: Option<DataType>,
}

impl CompressFunction {
    pub fn compress(payload: Expression, algorithm: Option<Expression>) -> Self {
        Self {
            payload: Box::new(payload),
            op: CompressOp::Compress {
                algorithm: algorithm.map(Box::new),
            },
            result_type: None,
        }
    }

    pub fn expand(payload: Expression) -> Self {
        Self {
            payload: Box::new(payload),
            op: CompressOp::Expand,
            result_type: None,
        }
    }

    pub fn kind(&self) -> FunctionKind {
        match self.op {
            CompressOp::Compress { .. } => FunctionKind::Compress,
            CompressOp::Expand => FunctionKind::Expand,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn payload(&self) -> &Expression {
        &self.payload
    }

    /// Algorithm operand; always `None` for EXPAND
    pub fn algorithm(&self) -> Option<&Expression> {
        match &self.op {
            CompressOp::Compress { algorithm } => algorithm.as_deref(),
            CompressOp::Expand => None,
        }
    }

    /// Present operands in argument order
    pub fn operands(&self) -> impl Iterator<Item = &Expression> {
        std::iter::once(self.payload()).chain(self.algorithm())
    }

    /// VARBINARY once optimized, `None` before
    pub fn result_type(&self) -> Option<DataType> {
        self.result_type
    }

    pub fn is_optimized(&self) -> bool {
        self.result_type.is_some()
    }

    /// Evaluate the call.
    ///
    /// A NULL payload yields NULL without evaluating the algorithm operand;
    /// a NULL algorithm yields NULL without calling the compression tool.
    /// Tool errors are returned as they are.
    pub fn evaluate(&self, evaluator: &ExpressionEvaluator<'_>) -> ExpressionResult<Value> {
        let data = match evaluator.evaluate(&self.payload)?.to_binary() {
            Some(data) => data,
            None => return Ok(Value::Null),
        };

        let tool = evaluator.compress_tool();
        let output = match &self.op {
            CompressOp::Compress { algorithm } => {
                let name = match algorithm {
                    Some(expr) => match evaluator.evaluate(expr)?.to_text() {
                        Some(name) => Some(name),
                        None => return Ok(Value::Null),
                    },
                    None => None,
                };
                tool.compress(&data, name.as_deref())?
            }
            CompressOp::Expand => tool.expand(&data)?,
        };

        Ok(Value::binary(output))
    }

    /// Optimize operands, fix the result type and fold the call into a
    /// constant when every operand is constant.
    pub fn optimize(mut self, optimizer: &ExpressionOptimizer<'_>) -> ExpressionResult<Optimized> {
        self.payload = Box::new(optimizer.optimize(*self.payload)?);
        if let CompressOp::Compress { algorithm } = &mut self.op {
            if let Some(expr) = algorithm.take() {
                *algorithm = Some(Box::new(optimizer.optimize(*expr)?));
            }
        }
        self.result_type = Some(DataType::Varbinary);

        if self.operands().all(Expression::is_constant) {
            let value = self.evaluate(&optimizer.constant_evaluator())?;
            debug!("folded {} into constant {}", self, value);
            return Ok(Optimized::Replaced(Expression::typed_literal(
                value,
                DataType::Varbinary,
            )));
        }

        Ok(Optimized::Unchanged(self))
    }
}
