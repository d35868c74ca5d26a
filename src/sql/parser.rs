// SQL parser - converts tokens to an expression AST

use super::ast::*;
use super::lexer::Lexer;
use super::token::Token;
use crate::access::value::parse_hex;
use crate::access::Value;
use anyhow::{anyhow, bail, Result};

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(sql: String) -> Self {
        let mut lexer = Lexer::new(sql);
        let tokens = lexer.tokenize();
        Parser {
            tokens,
            position: 0,
        }
    }

    /// Parse a single scalar expression spanning the whole input
    pub fn parse_expression(&mut self) -> Result<Expression> {
        let expr = self.parse_unary()?;
        if !self.match_token(&Token::Eof) {
            bail!("Unexpected token after expression: {:?}", self.current_token());
        }
        Ok(expr)
    }

    /// Parse unary minus, which only applies to numeric literals
    fn parse_unary(&mut self) -> Result<Expression> {
        if self.match_token(&Token::Minus) {
            self.advance();
            let digits = self.expect_number()?;
            return Self::parse_int(&format!("-{}", digits));
        }
        self.parse_primary()
    }

    /// Parse primary expression
    fn parse_primary(&mut self) -> Result<Expression> {
        match self.current_token() {
            Token::Number(n) => {
                self.advance();
                Self::parse_int(&n)
            }
            Token::String(s) => {
                self.advance();
                Ok(Expression::Literal(Value::String(s)))
            }
            Token::HexString(hex) => {
                self.advance();
                Ok(Expression::Literal(Value::binary(parse_hex(&hex)?)))
            }
            Token::True => {
                self.advance();
                Ok(Expression::Literal(Value::Boolean(true)))
            }
            Token::False => {
                self.advance();
                Ok(Expression::Literal(Value::Boolean(false)))
            }
            Token::Null => {
                self.advance();
                Ok(Expression::Null)
            }
            Token::Hash => {
                self.advance();
                let n = self.expect_number()?;
                let index = n
                    .parse::<usize>()
                    .map_err(|e| anyhow!("Invalid column position {}: {}", n, e))?;
                Ok(Expression::Position(index))
            }
            Token::Identifier(name) => {
                self.advance();

                // Check for function call
                if self.match_token(&Token::LeftParen) {
                    self.advance();

                    let args = if self.match_token(&Token::RightParen) {
                        vec![]
                    } else {
                        self.parse_expression_list()?
                    };
                    self.expect_token(Token::RightParen)?;

                    Ok(Expression::Function { name, args })
                } else {
                    Ok(Expression::Column(name))
                }
            }
            Token::LeftParen => {
                self.advance();
                let expr = self.parse_unary()?;
                self.expect_token(Token::RightParen)?;
                Ok(expr)
            }
            Token::Cast => self.parse_cast_expression(),
            _ => bail!("Unexpected token: {:?}", self.current_token()),
        }
    }

    /// Parse CAST expression
    fn parse_cast_expression(&mut self) -> Result<Expression> {
        self.expect_token(Token::Cast)?;
        self.expect_token(Token::LeftParen)?;

        let expression = self.parse_unary()?;

        self.expect_token(Token::As)?;

        let data_type = self.parse_data_type()?;

        self.expect_token(Token::RightParen)?;

        Ok(Expression::Cast {
            expression: Box::new(expression),
            data_type,
        })
    }

    /// Parse a type name with an optional length, e.g. `VARBINARY(255)`
    fn parse_data_type(&mut self) -> Result<DataType> {
        let token = self.current_token();
        self.advance();

        match token {
            Token::Int | Token::Integer => Ok(DataType::Int),
            Token::Boolean => Ok(DataType::Boolean),
            Token::Text => Ok(DataType::Text),
            Token::Varchar => Ok(DataType::Varchar(self.parse_optional_length()?)),
            Token::Varbinary | Token::Binary => {
                Ok(DataType::Varbinary(self.parse_optional_length()?))
            }
            other => bail!("Expected data type, found {:?}", other),
        }
    }

    fn parse_optional_length(&mut self) -> Result<Option<u32>> {
        if !self.match_token(&Token::LeftParen) {
            return Ok(None);
        }
        self.advance();
        let n = self.expect_number()?;
        let len = n
            .parse::<u32>()
            .map_err(|e| anyhow!("Invalid length: {}", e))?;
        self.expect_token(Token::RightParen)?;
        Ok(Some(len))
    }

    /// Parse list of expressions
    fn parse_expression_list(&mut self) -> Result<Vec<Expression>> {
        let mut expressions = vec![];

        loop {
            expressions.push(self.parse_unary()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
            self.advance();
        }

        Ok(expressions)
    }

    fn parse_int(text: &str) -> Result<Expression> {
        text.parse::<i32>()
            .map(|i| Expression::Literal(Value::Int32(i)))
            .map_err(|_| anyhow!("Invalid number: {}", text))
    }

    // Helper methods

    /// Get current token
    fn current_token(&self) -> Token {
        self.tokens
            .get(self.position)
            .cloned()
            .unwrap_or(Token::Eof)
    }

    /// Advance to next token
    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Check if current token matches
    fn match_token(&self, token: &Token) -> bool {
        self.current_token() == *token
    }

    /// Expect a specific token
    fn expect_token(&mut self, token: Token) -> Result<()> {
        if self.current_token() == token {
            self.advance();
            Ok(())
        } else {
            bail!("Expected {:?}, found {:?}", token, self.current_token())
        }
    }

    /// Expect a number
    fn expect_number(&mut self) -> Result<String> {
        match self.current_token() {
            Token::Number(n) => {
                self.advance();
                Ok(n)
            }
            _ => bail!("Expected number"),
        }
    }
}
