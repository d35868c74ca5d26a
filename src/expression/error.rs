//! Error types for expression evaluation.

use crate::access::DataType;
use crate::compress::CompressError;
use std::fmt;

/// Errors that can occur while binding, optimizing or evaluating expressions
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// Type mismatch in operation
    TypeMismatch {
        expected: DataType,
        actual: DataType,
        context: String,
    },

    /// Column index out of bounds
    ColumnIndexOutOfBounds { index: usize, tuple_size: usize },

    /// Column name not present in the input schema
    UnknownColumn { name: String },

    /// Invalid function name
    UnknownFunction { name: String },

    /// Wrong number of function arguments
    FunctionArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Raised by the compression tool and passed through untouched
    Compression(CompressError),
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionError::TypeMismatch {
                expected,
                actual,
                context,
            } => {
                write!(
                    f,
                    "Type mismatch in {}: expected {:?}, got {:?}",
                    context, expected, actual
                )
            }

            ExpressionError::ColumnIndexOutOfBounds { index, tuple_size } => {
                write!(
                    f,
                    "Column index {} out of bounds for tuple with {} columns",
                    index, tuple_size
                )
            }

            ExpressionError::UnknownColumn { name } => write!(f, "Unknown column: {}", name),

            ExpressionError::UnknownFunction { name } => {
                write!(f, "Unknown function: {}", name)
            }

            ExpressionError::FunctionArgumentCount {
                function,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Function {} expects {} arguments, got {}",
                    function, expected, actual
                )
            }

            ExpressionError::Compression(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ExpressionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExpressionError::Compression(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CompressError> for ExpressionError {
    fn from(err: CompressError) -> Self {
        ExpressionError::Compression(err)
    }
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;
