//! Resolves parsed SQL expressions against an input schema.

use crate::access::DataType;
use crate::expression::{Expression, ExpressionError, ExpressionResult, FunctionKind, Literal};
use crate::sql::ast::{DataType as SqlDataType, Expression as SqlExpr};
use crate::sql::Parser;
use anyhow::{Context, Result};

pub struct Binder<'a> {
    schema: &'a [(&'a str, DataType)],
}

impl<'a> Binder<'a> {
    pub fn new(schema: &'a [(&'a str, DataType)]) -> Self {
        Self { schema }
    }

    /// Convert a SQL AST expression into a bound expression tree
    pub fn bind(&self, expr: SqlExpr) -> ExpressionResult<Expression> {
        match expr {
            SqlExpr::Literal(value) => Ok(Expression::literal(value)),
            SqlExpr::Null => Ok(Literal::null().into()),
            SqlExpr::Column(name) => self.resolve_column(&name),
            SqlExpr::Position(index) => {
                if index >= self.schema.len() {
                    return Err(ExpressionError::ColumnIndexOutOfBounds {
                        index,
                        tuple_size: self.schema.len(),
                    });
                }
                Ok(Expression::column(index))
            }
            SqlExpr::Function { name, args } => self.bind_function(name, args),
            SqlExpr::Cast {
                expression,
                data_type,
            } => Ok(Expression::cast(
                self.bind(*expression)?,
                Self::convert_data_type(&data_type),
            )),
        }
    }

    fn resolve_column(&self, name: &str) -> ExpressionResult<Expression> {
        self.schema
            .iter()
            .position(|(column, _)| column.eq_ignore_ascii_case(name))
            .map(|index| Expression::column_with_name(index, self.schema[index].0))
            .ok_or_else(|| ExpressionError::UnknownColumn {
                name: name.to_string(),
            })
    }

    fn bind_function(&self, name: String, args: Vec<SqlExpr>) -> ExpressionResult<Expression> {
        let kind = FunctionKind::from_name(&name)
            .ok_or(ExpressionError::UnknownFunction { name })?;

        let arg_count = args.len();
        let mut args = args
            .into_iter()
            .map(|arg| self.bind(arg))
            .collect::<ExpressionResult<Vec<_>>>()?
            .into_iter();

        match (kind, args.next(), args.next(), args.next()) {
            (FunctionKind::Compress, Some(payload), None, None) => Ok(Expression::compress(payload)),
            (FunctionKind::Compress, Some(payload), Some(algorithm), None) => {
                Ok(Expression::compress_with(payload, algorithm))
            }
            (FunctionKind::Expand, Some(payload), None, None) => Ok(Expression::expand(payload)),
            _ => Err(ExpressionError::FunctionArgumentCount {
                function: kind.name().to_string(),
                expected: match kind {
                    FunctionKind::Compress => "1 or 2".to_string(),
                    FunctionKind::Expand => "1".to_string(),
                },
                actual: arg_count,
            }),
        }
    }

    /// Lengths are accepted for compatibility but not enforced
    fn convert_data_type(data_type: &SqlDataType) -> DataType {
        match data_type {
            SqlDataType::Int => DataType::Int32,
            SqlDataType::Boolean => DataType::Boolean,
            SqlDataType::Varchar(_) | SqlDataType::Text => DataType::Varchar,
            SqlDataType::Varbinary(_) => DataType::Varbinary,
        }
    }
}

/// Parse `sql` and bind it against `schema`
pub fn parse_expression(sql: &str, schema: &[(&str, DataType)]) -> Result<Expression> {
    let ast = Parser::new(sql.to_string())
        .parse_expression()
        .with_context(|| format!("failed to parse expression: {}", sql))?;
    let expr = Binder::new(schema)
        .bind(ast)
        .with_context(|| format!("failed to bind expression: {}", sql))?;
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Value;

    const SCHEMA: [(&str, DataType); 2] = [("id", DataType::Int32), ("Data", DataType::Varbinary)];

    fn bind(sql: &str) -> ExpressionResult<Expression> {
        let ast = Parser::new(sql.to_string()).parse_expression().unwrap();
        Binder::new(&SCHEMA).bind(ast)
    }

    #[test]
    fn test_bind_columns() {
        assert_eq!(bind("data").unwrap(), Expression::column_with_name(1, "Data"));
        assert_eq!(bind("ID").unwrap(), Expression::column_with_name(0, "id"));
        assert_eq!(bind("#1").unwrap(), Expression::column(1));
        assert_eq!(
            bind("missing"),
            Err(ExpressionError::UnknownColumn {
                name: "missing".to_string()
            })
        );
        assert_eq!(
            bind("#2"),
            Err(ExpressionError::ColumnIndexOutOfBounds {
                index: 2,
                tuple_size: 2
            })
        );
    }

    #[test]
    fn test_bind_functions() {
        let data = Expression::column_with_name(1, "Data");
        assert_eq!(bind("compress(data)").unwrap(), Expression::compress(data.clone()));
        assert_eq!(
            bind("COMPRESS(data, 'ZSTD L3')").unwrap(),
            Expression::compress_with(
                data.clone(),
                Expression::literal(Value::String("ZSTD L3".to_string()))
            )
        );
        assert_eq!(
            bind("Expand(Compress(data))").unwrap(),
            Expression::expand(Expression::compress(data))
        );
        assert_eq!(
            bind("DECOMPRESS(data)"),
            Err(ExpressionError::UnknownFunction {
                name: "DECOMPRESS".to_string()
            })
        );
    }

    #[test]
    fn test_bind_arity() {
        assert_eq!(
            bind("COMPRESS()"),
            Err(ExpressionError::FunctionArgumentCount {
                function: "COMPRESS".to_string(),
                expected: "1 or 2".to_string(),
                actual: 0,
            })
        );
        assert_eq!(
            bind("COMPRESS(data, 'LZ4', 'x')"),
            Err(ExpressionError::FunctionArgumentCount {
                function: "COMPRESS".to_string(),
                expected: "1 or 2".to_string(),
                actual: 3,
            })
        );
        assert_eq!(
            bind("expand(data, 'LZ4')"),
            Err(ExpressionError::FunctionArgumentCount {
                function: "EXPAND".to_string(),
                expected: "1".to_string(),
                actual: 2,
            })
        );
    }

    #[test]
    fn test_bind_cast() {
        assert_eq!(
            bind("CAST(NULL AS VARBINARY(16))").unwrap(),
            Expression::cast(Expression::literal(Value::Null), DataType::Varbinary)
        );
        assert_eq!(
            bind("CAST(id AS TEXT)").unwrap(),
            Expression::cast(Expression::column_with_name(0, "id"), DataType::Varchar)
        );
    }

    #[test]
    fn test_parse_expression_helper() {
        let expr = parse_expression("COMPRESS(X'001122')", &[]).unwrap();
        assert_eq!(
            expr,
            Expression::compress(Expression::literal(Value::binary(vec![0x00u8, 0x11, 0x22])))
        );

        let err = parse_expression("COMPRESS(data)", &[]).unwrap_err();
        assert!(err.to_string().contains("failed to bind"));
        let err = parse_expression("COMPRESS(", &[]).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));

        // Rendered text is persisted, so a cut-off literal must not bind
        assert!(parse_expression("'LZ4", &[]).is_err());
        assert!(parse_expression("COMPRESS(X'00', 'LZ4", &[]).is_err());
    }
}
