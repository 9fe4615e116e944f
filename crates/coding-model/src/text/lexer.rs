//! Tokenizer for the textual coding syntax.

use crate::error::TextError;

/// Token kinds of the closed coding grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LParen,
    RParen,
    Comma,
    Equals,
    Minus,
    Ident(String),
    Str(String),
    Number(f64),
    /// Integer literal written with an `L` suffix.
    Integer(i64),
    Eof,
}

impl TokenKind {
    /// Short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::Comma => "','".to_string(),
            Self::Equals => "'='".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Ident(name) => format!("name '{name}'"),
            Self::Str(_) => "string".to_string(),
            Self::Number(_) | Self::Integer(_) => "number".to_string(),
            Self::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token start.
    pub offset: usize,
}

pub struct Lexer<'src> {
    source: &'src str,
    position: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Tokenize the whole input, ending with [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, TextError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.source[self.position..].chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn next_token(&mut self) -> Result<Token, TextError> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }

        let offset = self.position;
        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                offset,
            });
        };

        let kind = match c {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            ',' => self.single(TokenKind::Comma),
            '=' => self.single(TokenKind::Equals),
            '-' => self.single(TokenKind::Minus),
            '"' | '\'' => self.scan_string(c)?,
            c if c.is_ascii_digit() => self.scan_number()?,
            '.' if self.peek_second().is_some_and(|n| n.is_ascii_digit()) => {
                self.scan_number()?
            }
            c if c.is_alphabetic() || c == '.' || c == '_' => self.scan_ident(),
            found => return Err(TextError::UnexpectedChar { found, offset }),
        };
        Ok(Token { kind, offset })
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn scan_ident(&mut self) -> TokenKind {
        let start = self.position;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '.' || c == '_')
        {
            self.advance();
        }
        TokenKind::Ident(self.source[start..self.position].to_string())
    }

    fn scan_number(&mut self) -> Result<TokenKind, TextError> {
        let source = self.source;
        let start = self.position;
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            self.advance();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        let text = &source[start..self.position];
        let invalid = || TextError::InvalidNumber {
            text: text.to_string(),
            offset: start,
        };

        if self.peek() == Some('L') {
            self.advance();
            return text.parse::<i64>().map(TokenKind::Integer).map_err(|_| invalid());
        }
        text.parse::<f64>().map(TokenKind::Number).map_err(|_| invalid())
    }

    fn scan_string(&mut self, quote: char) -> Result<TokenKind, TextError> {
        let start = self.position;
        self.advance();
        let mut value = String::new();
        loop {
            let escape_offset = self.position;
            match self.advance() {
                None => return Err(TextError::UnterminatedString { offset: start }),
                Some(c) if c == quote => return Ok(TokenKind::Str(value)),
                Some('\\') => {
                    let escaped = match self.advance() {
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('0') => '\0',
                        Some(c @ ('\\' | '"' | '\'')) => c,
                        Some(found) => {
                            return Err(TextError::InvalidEscape {
                                found,
                                offset: escape_offset,
                            });
                        }
                        None => return Err(TextError::UnterminatedString { offset: start }),
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }
    }
}
