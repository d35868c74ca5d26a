use crate::expression::{ExpressionError, ExpressionResult};
use anyhow::{bail, Result};
use bytes::Bytes;
use std::fmt;

/// Data types supported by the expression engine
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean = 1,
    Int32 = 2,
    Varchar = 4,
    Varbinary = 5,
}

impl DataType {
    /// SQL spelling used when rendering casts
    pub fn sql_name(&self) -> &'static str {
        match self {
            DataType::Boolean => "BOOLEAN",
            DataType::Int32 => "INT",
            DataType::Varchar => "VARCHAR",
            DataType::Varbinary => "VARBINARY",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

/// Values produced and consumed by expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int32(i32),
    String(String),
    /// Variable-length binary. Cloning shares the underlying buffer.
    Binary(Bytes),
}

impl Value {
    /// Wrap an owned buffer as a binary value without copying it
    pub fn binary(data: impl Into<Bytes>) -> Self {
        Value::Binary(data.into())
    }

    /// Get the data type of this value
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Int32(_) => Some(DataType::Int32),
            Value::String(_) => Some(DataType::Varchar),
            Value::Binary(_) => Some(DataType::Varbinary),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is compatible with the given data type
    pub fn is_compatible_with(&self, data_type: DataType) -> bool {
        match (self, data_type) {
            (Value::Null, _) => true, // NULL is compatible with any type
            (Value::Boolean(_), DataType::Boolean) => true,
            (Value::Int32(_), DataType::Int32) => true,
            (Value::String(_), DataType::Varchar) => true,
            (Value::Binary(_), DataType::Varbinary) => true,
            _ => false,
        }
    }

    /// Binary form of this value, `None` for NULL.
    ///
    /// Integers are laid out big-endian, booleans as a single byte and
    /// strings as their UTF-8 encoding.
    pub fn to_binary(&self) -> Option<Bytes> {
        match self {
            Value::Null => None,
            Value::Boolean(b) => Some(Bytes::from(vec![u8::from(*b)])),
            Value::Int32(i) => Some(Bytes::copy_from_slice(&i.to_be_bytes())),
            Value::String(s) => Some(Bytes::copy_from_slice(s.as_bytes())),
            Value::Binary(b) => Some(b.clone()),
        }
    }

    /// Text form of this value, `None` for NULL
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Boolean(true) => Some("TRUE".to_string()),
            Value::Boolean(false) => Some("FALSE".to_string()),
            Value::Int32(i) => Some(i.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Binary(b) => Some(to_hex(b)),
        }
    }

    /// Convert this value to `target`. NULL converts to NULL of any type.
    pub fn cast_to(&self, target: DataType) -> ExpressionResult<Value> {
        if self.is_null() || self.is_compatible_with(target) {
            return Ok(self.clone());
        }

        let converted = match (self, target) {
            (_, DataType::Varchar) => self.to_text().map(Value::String),
            (_, DataType::Varbinary) => self.to_binary().map(Value::Binary),
            (Value::Boolean(b), DataType::Int32) => Some(Value::Int32(i32::from(*b))),
            (Value::String(s), DataType::Int32) => s.trim().parse::<i32>().ok().map(Value::Int32),
            (Value::Int32(i), DataType::Boolean) => Some(Value::Boolean(*i != 0)),
            (Value::String(s), DataType::Boolean) => match s.trim().to_uppercase().as_str() {
                "TRUE" => Some(Value::Boolean(true)),
                "FALSE" => Some(Value::Boolean(false)),
                _ => None,
            },
            _ => None,
        };

        converted.ok_or_else(|| ExpressionError::TypeMismatch {
            expected: target,
            // data_type() is only None for NULL, handled above
            actual: self.data_type().unwrap_or(target),
            context: format!("CAST to {}", target),
        })
    }
}

/// Renders the value as a SQL literal
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(true) => f.write_str("TRUE"),
            Value::Boolean(false) => f.write_str("FALSE"),
            Value::Int32(i) => write!(f, "{}", i),
            Value::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Value::Binary(b) => write!(f, "X'{}'", to_hex(b)),
        }
    }
}

fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decode a hex string as written inside `X'..'`. Whitespace is ignored.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_digit(16) {
            Some(d) => Ok(d as u8),
            None => bail!("Invalid hex digit '{}' in binary literal", c),
        })
        .collect::<Result<_>>()?;

    if digits.len() % 2 != 0 {
        bail!("Binary literal has an odd number of hex digits");
    }

    Ok(digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}
