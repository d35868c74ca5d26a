//! SQL rendering of expression trees.
//!
//! The output is what plans print and what views and constraints persist,
//! so it must parse back into an equivalent tree.

use crate::expression::function::CompressFunction;
use crate::expression::{ColumnRef, Expression, Literal};
use crate::sql::Token;
use std::fmt;

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(lit) => write!(f, "{}", lit),
            Expression::ColumnRef(col) => write!(f, "{}", col),
            Expression::Cast { expr, data_type } => write!(f, "CAST({} AS {})", expr, data_type),
            Expression::Function(func) => write!(f, "{}", func),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data_type {
            // Keep the declared type when the value alone would lose it
            Some(data_type) if self.value.data_type() != Some(data_type) => {
                write!(f, "CAST({} AS {})", self.value, data_type)
            }
            _ => write!(f, "{}", self.value),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) if is_plain_identifier(name) => f.write_str(name),
            Some(name) => write!(f, "\"{}\"", name.replace('"', "\"\"")),
            None => write!(f, "#{}", self.index),
        }
    }
}

impl fmt::Display for CompressFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}", self.name(), self.payload())?;
        if let Some(algorithm) = self.algorithm() {
            write!(f, ", {}", algorithm)?;
        }
        f.write_str(")")
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_');
    starts_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && Token::keyword_from_str(name).is_none()
}
