// SQL tokens for lexical analysis

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Identifier(String),
    Number(String),
    String(String),
    /// Hex digits of an X'..' literal, undecoded
    HexString(String),

    // Keywords
    Null,
    True,
    False,
    Cast,
    As,

    // Data types
    Int,
    Integer,
    Boolean,
    Varchar,
    Text,
    Varbinary,
    Binary,

    // Operators
    Minus,
    Hash,

    // Delimiters
    LeftParen,
    RightParen,
    Comma,

    // Special
    Eof,
    /// Character that starts no valid token
    Invalid(char),
}

impl Token {
    /// Convert a string to a keyword token if it matches
    pub fn keyword_from_str(s: &str) -> Option<Token> {
        match s.to_uppercase().as_str() {
            "NULL" => Some(Token::Null),
            "TRUE" => Some(Token::True),
            "FALSE" => Some(Token::False),
            "CAST" => Some(Token::Cast),
            "AS" => Some(Token::As),
            "INT" => Some(Token::Int),
            "INTEGER" => Some(Token::Integer),
            "BOOLEAN" => Some(Token::Boolean),
            "VARCHAR" => Some(Token::Varchar),
            "TEXT" => Some(Token::Text),
            "VARBINARY" => Some(Token::Varbinary),
            "BINARY" => Some(Token::Binary),
            _ => None,
        }
    }
}
