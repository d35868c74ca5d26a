//! Expression AST definitions.

use crate::access::{DataType, Value};
use crate::expression::function::CompressFunction;

/// Column reference in an expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Column index in the tuple (0-based)
    pub index: usize,
    /// Optional column name for display
    pub name: Option<String>,
}

impl ColumnRef {
    pub fn new(index: usize) -> Self {
        Self { index, name: None }
    }

    pub fn with_name(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: Some(name.into()),
        }
    }
}

/// Literal value in an expression
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
    /// Declared type. Lets a NULL constant keep the type of the expression
    /// it replaced.
    pub data_type: Option<DataType>,
}

impl Literal {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            data_type: None,
        }
    }

    pub fn typed(value: Value, data_type: DataType) -> Self {
        Self {
            value,
            data_type: Some(data_type),
        }
    }

    pub fn null() -> Self {
        Self::new(Value::Null)
    }

    /// The declared type, falling back to the value's own type
    pub fn output_type(&self) -> Option<DataType> {
        self.data_type.or_else(|| self.value.data_type())
    }
}

impl From<Literal> for Expression {
    fn from(lit: Literal) -> Self {
        Expression::Literal(lit)
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal constant value
    Literal(Literal),

    /// Column reference
    ColumnRef(ColumnRef),

    /// Explicit conversion to another type
    Cast {
        expr: Box<Expression>,
        data_type: DataType,
    },

    /// COMPRESS or EXPAND call
    Function(CompressFunction),
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: Value) -> Self {
        Expression::Literal(Literal::new(value))
    }

    /// Create a literal that keeps `data_type` even when `value` is NULL
    pub fn typed_literal(value: Value, data_type: DataType) -> Self {
        Expression::Literal(Literal::typed(value, data_type))
    }

    /// Create a column reference expression
    pub fn column(index: usize) -> Self {
        Expression::ColumnRef(ColumnRef::new(index))
    }

    /// Create a column reference with name
    pub fn column_with_name(index: usize, name: impl Into<String>) -> Self {
        Expression::ColumnRef(ColumnRef::with_name(index, name))
    }

    pub fn cast(expr: Expression, data_type: DataType) -> Self {
        Expression::Cast {
            expr: Box::new(expr),
            data_type,
        }
    }

    /// `COMPRESS(payload)` using the tool's default algorithm
    pub fn compress(payload: Expression) -> Self {
        Expression::Function(CompressFunction::compress(payload, None))
    }

    /// `COMPRESS(payload, algorithm)`
    pub fn compress_with(payload: Expression, algorithm: Expression) -> Self {
        Expression::Function(CompressFunction::compress(payload, Some(algorithm)))
    }

    /// `EXPAND(payload)`
    pub fn expand(payload: Expression) -> Self {
        Expression::Function(CompressFunction::expand(payload))
    }

    /// Check if this expression is a constant (contains no column references)
    pub fn is_constant(&self) -> bool {
        match self {
            Expression::Literal(_) => true,
            Expression::ColumnRef(_) => false,
            Expression::Cast { expr, .. } => expr.is_constant(),
            Expression::Function(func) => func.operands().all(|arg| arg.is_constant()),
        }
    }

    /// Get the expected output type of this expression (if it can be determined statically)
    pub fn output_type(&self, input_schema: &[DataType]) -> Option<DataType> {
        match self {
            Expression::Literal(lit) => lit.output_type(),
            Expression::ColumnRef(col) => input_schema.get(col.index).copied(),
            Expression::Cast { data_type, .. } => Some(*data_type),
            // Fixed regardless of operand types
            Expression::Function(_) => Some(DataType::Varbinary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::FunctionKind;

    #[test]
    fn test_column_ref() {
        let col1 = ColumnRef::new(0);
        assert_eq!(col1.index, 0);
        assert!(col1.name.is_none());

        let col2 = ColumnRef::with_name(1, "data");
        assert_eq!(col2.index, 1);
        assert_eq!(col2.name.as_deref(), Some("data"));
    }

    #[test]
    fn test_literal() {
        let null_lit = Literal::null();
        assert_eq!(null_lit.value, Value::Null);
        assert_eq!(null_lit.output_type(), None);

        let typed_null = Literal::typed(Value::Null, DataType::Varbinary);
        assert_eq!(typed_null.output_type(), Some(DataType::Varbinary));

        let bin_lit = Literal::new(Value::binary(vec![1u8, 2]));
        assert_eq!(bin_lit.output_type(), Some(DataType::Varbinary));
    }

    #[test]
    fn test_function_builders() {
        match Expression::compress(Expression::column(0)) {
            Expression::Function(func) => {
                assert_eq!(func.kind(), FunctionKind::Compress);
                assert!(func.algorithm().is_none());
            }
            other => panic!("unexpected {:?}", other),
        }

        match Expression::compress_with(Expression::column(0), Literal::new(Value::String("ZSTD".into())).into()) {
            Expression::Function(func) => assert!(func.algorithm().is_some()),
            other => panic!("unexpected {:?}", other),
        }

        match Expression::expand(Expression::column(0)) {
            Expression::Function(func) => {
                assert_eq!(func.kind(), FunctionKind::Expand);
                assert!(func.algorithm().is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_is_constant() {
        assert!(Expression::literal(Value::Int32(42)).is_constant());
        assert!(!Expression::column(0).is_constant());

        assert!(Expression::compress(Expression::literal(Value::binary(vec![1u8]))).is_constant());
        assert!(!Expression::compress(Expression::column(0)).is_constant());
        assert!(!Expression::compress_with(
            Expression::literal(Value::binary(vec![1u8])),
            Expression::column(1)
        )
        .is_constant());

        assert!(Expression::cast(Expression::literal(Value::Null), DataType::Varbinary).is_constant());
    }

    #[test]
    fn test_output_type() {
        let schema = vec![DataType::Int32, DataType::Varchar, DataType::Varbinary];

        assert_eq!(
            Expression::literal(Value::Int32(42)).output_type(&schema),
            Some(DataType::Int32)
        );
        assert_eq!(Expression::literal(Value::Null).output_type(&schema), None);
        assert_eq!(
            Expression::column(1).output_type(&schema),
            Some(DataType::Varchar)
        );
        assert_eq!(Expression::column(3).output_type(&schema), None); // Out of bounds

        // Function result type does not depend on operand types
        for payload in [Expression::column(0), Expression::column(1), Expression::column(2)] {
            assert_eq!(
                Expression::compress(payload.clone()).output_type(&schema),
                Some(DataType::Varbinary)
            );
            assert_eq!(
                Expression::expand(payload).output_type(&schema),
                Some(DataType::Varbinary)
            );
        }
    }
}
