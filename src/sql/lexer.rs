// SQL lexer - tokenizes scalar expressions

use super::token::Token;

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl Lexer {
    pub fn new(input: String) -> Self {
        let input: Vec<char> = input.chars().collect();
        let current_char = input.first().copied();
        Lexer {
            input,
            position: 0,
            current_char,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(ch) = self.current_char else {
            return Token::Eof;
        };

        match ch {
            '-' => {
                self.advance();
                // Check for comments
                if self.current_char == Some('-') {
                    self.skip_comment();
                    return self.next_token();
                }
                Token::Minus
            }
            '#' => {
                self.advance();
                Token::Hash
            }
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            ',' => {
                self.advance();
                Token::Comma
            }
            '\'' => self
                .read_quoted('\'')
                .map_or(Token::Invalid('\''), Token::String),
            '"' => self
                .read_quoted('"')
                .map_or(Token::Invalid('"'), Token::Identifier),
            'x' | 'X' if self.peek() == Some('\'') => {
                self.advance(); // Skip X
                self.read_quoted('\'')
                    .map_or(Token::Invalid('\''), Token::HexString)
            }
            c if c.is_alphabetic() || c == '_' => self.read_identifier(),
            c if c.is_ascii_digit() => self.read_number(),
            c => {
                self.advance();
                Token::Invalid(c)
            }
        }
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    /// Peek at the next character without advancing
    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Skip single-line comments starting with --
    fn skip_comment(&mut self) {
        while let Some(ch) = self.current_char {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Check if it's a keyword
        Token::keyword_from_str(&identifier).unwrap_or(Token::Identifier(identifier))
    }

    /// Read text enclosed in `quote`, where a doubled quote stands for itself.
    /// Used for string literals, quoted identifiers and hex strings.
    /// Returns `None` when the input ends before the closing quote.
    fn read_quoted(&mut self, quote: char) -> Option<String> {
        self.advance(); // Skip opening quote
        let mut text = String::new();

        while let Some(ch) = self.current_char {
            if ch == quote {
                if self.peek() == Some(quote) {
                    text.push(quote);
                    self.advance();
                    self.advance();
                } else {
                    self.advance(); // Skip closing quote
                    return Some(text);
                }
            } else {
                text.push(ch);
                self.advance();
            }
        }

        None
    }

    /// Read an integer
    fn read_number(&mut self) -> Token {
        let mut number = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Number(number)
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            if token == Token::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_call_tokens() {
        let mut lexer = Lexer::new("COMPRESS(data, 'LZ4')".to_string());
        assert_eq!(
            lexer.next_token(),
            Token::Identifier("COMPRESS".to_string())
        );
        assert_eq!(lexer.next_token(), Token::LeftParen);
        assert_eq!(lexer.next_token(), Token::Identifier("data".to_string()));
        assert_eq!(lexer.next_token(), Token::Comma);
        assert_eq!(lexer.next_token(), Token::String("LZ4".to_string()));
        assert_eq!(lexer.next_token(), Token::RightParen);
        assert_eq!(lexer.next_token(), Token::Eof);
    }

    #[test]
    fn test_string_literals() {
        let mut lexer = Lexer::new("'hello world' 'it''s fine'".to_string());
        assert_eq!(lexer.next_token(), Token::String("hello world".to_string()));
        assert_eq!(lexer.next_token(), Token::String("it's fine".to_string()));
    }

    #[test]
    fn test_hex_strings() {
        let mut lexer = Lexer::new("X'001122' x'ff' x".to_string());
        assert_eq!(lexer.next_token(), Token::HexString("001122".to_string()));
        assert_eq!(lexer.next_token(), Token::HexString("ff".to_string()));
        assert_eq!(lexer.next_token(), Token::Identifier("x".to_string()));
    }

    #[test]
    fn test_numbers_and_positions() {
        let mut lexer = Lexer::new("123 -7 #2".to_string());
        assert_eq!(lexer.next_token(), Token::Number("123".to_string()));
        assert_eq!(lexer.next_token(), Token::Minus);
        assert_eq!(lexer.next_token(), Token::Number("7".to_string()));
        assert_eq!(lexer.next_token(), Token::Hash);
        assert_eq!(lexer.next_token(), Token::Number("2".to_string()));
    }

    #[test]
    fn test_quoted_identifiers() {
        let mut lexer = Lexer::new(r#""my col" "say""hi""#.to_string());
        assert_eq!(lexer.next_token(), Token::Identifier("my col".to_string()));
        assert_eq!(lexer.next_token(), Token::Identifier("say\"hi".to_string()));
    }

    #[test]
    fn test_comments() {
        let mut lexer = Lexer::new("EXPAND( -- payload\n data)".to_string());
        assert_eq!(lexer.next_token(), Token::Identifier("EXPAND".to_string()));
        assert_eq!(lexer.next_token(), Token::LeftParen);
        assert_eq!(lexer.next_token(), Token::Identifier("data".to_string()));
        assert_eq!(lexer.next_token(), Token::RightParen);
    }

    #[test]
    fn test_keywords_and_invalid() {
        let tokens = Lexer::new("CAST(NULL AS VARBINARY) ;".to_string()).tokenize();
        assert_eq!(
            tokens,
            vec![
                Token::Cast,
                Token::LeftParen,
                Token::Null,
                Token::As,
                Token::Varbinary,
                Token::RightParen,
                Token::Invalid(';'),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_quotes() {
        let tokens = Lexer::new("COMPRESS(data, 'LZ4".to_string()).tokenize();
        assert_eq!(tokens[4], Token::Invalid('\''));
        assert_eq!(tokens[5], Token::Eof);

        let tokens = Lexer::new("\"my col".to_string()).tokenize();
        assert_eq!(tokens, vec![Token::Invalid('"'), Token::Eof]);

        let tokens = Lexer::new("X'0011".to_string()).tokenize();
        assert_eq!(tokens, vec![Token::Invalid('\''), Token::Eof]);

        // A doubled quote at the end is an escape, not a terminator
        let tokens = Lexer::new("'it''".to_string()).tokenize();
        assert_eq!(tokens, vec![Token::Invalid('\''), Token::Eof]);
    }

    #[test]
    fn test_non_ascii_input() {
        let tokens = Lexer::new("'héllo' données".to_string()).tokenize();
        assert_eq!(tokens[0], Token::String("héllo".to_string()));
        assert_eq!(tokens[1], Token::Identifier("données".to_string()));
    }
}
