// SQL Abstract Syntax Tree (AST) definitions for scalar expressions

use crate::access::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    Int,
    Varchar(Option<u32>),
    Text,
    Boolean,
    Varbinary(Option<u32>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    // Literals
    Literal(Value),

    // Null literal
    Null,

    // Column reference by name
    Column(String),

    // Column reference by position (#n)
    Position(usize),

    // Function call
    Function {
        name: String,
        args: Vec<Expression>,
    },

    // CAST expression
    Cast {
        expression: Box<Expression>,
        data_type: DataType,
    },
}
