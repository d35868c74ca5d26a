//! Scalar expressions: the bound tree, its evaluation, constant folding and
//! SQL rendering, plus the COMPRESS / EXPAND function nodes.

pub mod binder;
pub mod display;
pub mod error;
pub mod eval;
pub mod expr;
pub mod function;
pub mod optimize;

pub use binder::{parse_expression, Binder};
pub use error::{ExpressionError, ExpressionResult};
pub use eval::{evaluate_expression, ExpressionEvaluator};
pub use expr::{ColumnRef, Expression, Literal};
pub use function::{CompressFunction, CompressOp, FunctionKind};
pub use optimize::{optimize_expression, ExpressionOptimizer, Optimized};
