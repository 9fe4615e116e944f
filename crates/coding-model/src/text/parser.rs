//! Recursive-descent parser for the textual coding syntax.
//!
//! ```text
//! expr    := call | vector | literal | ident
//! call    := ident "(" [arg ("," arg)*] ")"
//! arg     := [ident "="] expr
//! vector  := "c" "(" [expr ("," expr)*] ")"
//! literal := string | ["-"] number | TRUE | FALSE | NA | NaN | ["-"] Inf
//! ```
//!
//! Parsing only builds syntax. Deciding which names may be called is the
//! evaluator's job.

use crate::error::TextError;
use crate::value::Value;

use super::lexer::{Lexer, Token, TokenKind};

/// Deepest call/vector nesting accepted. Well-formed codings nest three deep:
/// `coding(code(c(...)))`.
pub const MAX_DEPTH: usize = 64;

/// A parsed, unevaluated expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal { value: Value, offset: usize },
    /// `c(...)` vector literal.
    Vector { items: Vec<Expr>, offset: usize },
    /// A bare name that is not a literal keyword.
    Ident { name: String, offset: usize },
    Call {
        name: String,
        args: Vec<Arg>,
        offset: usize,
    },
}

/// A call argument, optionally named.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub name: Option<String>,
    pub value: Expr,
}

impl Expr {
    pub fn offset(&self) -> usize {
        match self {
            Self::Literal { offset, .. }
            | Self::Vector { offset, .. }
            | Self::Ident { offset, .. }
            | Self::Call { offset, .. } => *offset,
        }
    }

    /// Short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Literal { value, .. } => format!("{} literal {}", value.kind(), value.to_literal()),
            Self::Vector { .. } => "vector".to_string(),
            Self::Ident { name, .. } => format!("name '{name}'"),
            Self::Call { name, .. } => format!("call to {name}()"),
        }
    }
}

/// Parse a single expression.
///
/// # Errors
///
/// Returns [`TextError::NotAnExpression`] for empty input or trailing input,
/// [`TextError::TooDeep`] when calls or vectors nest past [`MAX_DEPTH`],
/// and lexer/parser errors for anything outside the grammar.
pub fn parse_expr(source: &str) -> Result<Expr, TextError> {
    let tokens = Lexer::new(source).tokenize()?;
    let mut parser = Parser {
        tokens,
        index: 0,
        depth: 0,
    };
    if parser.peek().kind == TokenKind::Eof {
        return Err(TextError::NotAnExpression {
            reason: "input is empty",
        });
    }
    let expr = parser.expr()?;
    if parser.peek().kind != TokenKind::Eof {
        return Err(TextError::NotAnExpression {
            reason: "trailing input after expression",
        });
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // The token stream always ends with Eof.
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    fn peek_kind_at(&self, ahead: usize) -> Option<&TokenKind> {
        self.tokens.get(self.index + ahead).map(|t| &t.kind)
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Expr, TextError> {
        let token = self.bump();
        let offset = token.offset;
        match token.kind {
            TokenKind::Str(s) => Ok(Expr::Literal {
                value: Value::String(s),
                offset,
            }),
            TokenKind::Number(n) => Ok(Expr::Literal {
                value: Value::Float(n),
                offset,
            }),
            TokenKind::Integer(n) => Ok(Expr::Literal {
                value: Value::Integer(n),
                offset,
            }),
            TokenKind::Minus => self.negated(offset),
            TokenKind::Ident(name) => {
                if self.peek().kind == TokenKind::LParen {
                    self.bump();
                    if self.depth == MAX_DEPTH {
                        return Err(TextError::TooDeep { offset });
                    }
                    self.depth += 1;
                    let expr = if name == "c" {
                        let items = self.list(Self::expr)?;
                        Expr::Vector { items, offset }
                    } else {
                        let args = self.list(Self::arg)?;
                        Expr::Call { name, args, offset }
                    };
                    self.depth -= 1;
                    Ok(expr)
                } else if let Some(value) = keyword_literal(&name) {
                    Ok(Expr::Literal { value, offset })
                } else {
                    Ok(Expr::Ident { name, offset })
                }
            }
            other => Err(TextError::UnexpectedToken {
                expected: "expression",
                found: other.describe(),
                offset,
            }),
        }
    }

    fn negated(&mut self, offset: usize) -> Result<Expr, TextError> {
        let token = self.bump();
        let value = match token.kind {
            TokenKind::Number(n) => Value::Float(-n),
            TokenKind::Integer(n) => Value::Integer(-n),
            TokenKind::Ident(ref name) if name == "Inf" => Value::Float(f64::NEG_INFINITY),
            other => {
                return Err(TextError::UnexpectedToken {
                    expected: "number after '-'",
                    found: other.describe(),
                    offset: token.offset,
                });
            }
        };
        Ok(Expr::Literal { value, offset })
    }

    fn arg(&mut self) -> Result<Arg, TextError> {
        let name = match (&self.peek().kind, self.peek_kind_at(1)) {
            (TokenKind::Ident(name), Some(TokenKind::Equals)) => Some(name.clone()),
            _ => None,
        };
        if name.is_some() {
            self.bump();
            self.bump();
        }
        let value = self.expr()?;
        Ok(Arg { name, value })
    }

    /// Comma-separated items up to the closing parenthesis (already past `(`).
    fn list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, TextError>,
    ) -> Result<Vec<T>, TextError> {
        let mut items = Vec::new();
        if self.peek().kind == TokenKind::RParen {
            self.bump();
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            let token = self.bump();
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::RParen => return Ok(items),
                other => {
                    return Err(TextError::UnexpectedToken {
                        expected: "',' or ')'",
                        found: other.describe(),
                        offset: token.offset,
                    });
                }
            }
        }
    }
}

fn keyword_literal(name: &str) -> Option<Value> {
    match name {
        "TRUE" => Some(Value::Boolean(true)),
        "FALSE" => Some(Value::Boolean(false)),
        "NA" | "NA_integer_" | "NA_real_" | "NA_character_" => Some(Value::Missing),
        "NaN" => Some(Value::Float(f64::NAN)),
        "Inf" => Some(Value::Float(f64::INFINITY)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_calls() {
        let expr = parse_expr(r#"coding(code("Yes", 1), label = "yn")"#).unwrap();
        let Expr::Call { name, args, .. } = expr else {
            panic!("expected call");
        };
        assert_eq!(name, "coding");
        assert_eq!(args.len(), 2);
        assert!(matches!(&args[0].value, Expr::Call { name, .. } if name == "code"));
        assert_eq!(args[1].name.as_deref(), Some("label"));
    }

    #[test]
    fn parses_literals() {
        let lit = |s: &str| match parse_expr(s).unwrap() {
            Expr::Literal { value, .. } => value,
            other => panic!("not a literal: {other:?}"),
        };
        assert_eq!(lit("TRUE"), Value::Boolean(true));
        assert_eq!(lit("NA"), Value::Missing);
        assert_eq!(lit("-2.5"), Value::Float(-2.5));
        assert_eq!(lit("-Inf"), Value::Float(f64::NEG_INFINITY));
        assert_eq!(lit("3L"), Value::Integer(3));
    }

    #[test]
    fn vector_is_syntax_not_call() {
        let expr = parse_expr(r#"c("a", "b")"#).unwrap();
        assert!(matches!(expr, Expr::Vector { ref items, .. } if items.len() == 2));
        assert!(matches!(parse_expr("c()").unwrap(), Expr::Vector { ref items, .. } if items.is_empty()));
    }

    #[test]
    fn bare_names_are_idents() {
        assert!(matches!(parse_expr("x").unwrap(), Expr::Ident { ref name, .. } if name == "x"));
    }

    #[test]
    fn nesting_is_bounded() {
        let nested = |depth: usize| format!("{}1{}", "c(".repeat(depth), ")".repeat(depth));
        assert!(parse_expr(&nested(MAX_DEPTH)).is_ok());
        assert!(matches!(
            parse_expr(&nested(MAX_DEPTH + 1)),
            Err(TextError::TooDeep { offset }) if offset == 2 * MAX_DEPTH
        ));
        let calls = format!("{}{}", "code(".repeat(100_000), ")".repeat(100_000));
        assert!(matches!(parse_expr(&calls), Err(TextError::TooDeep { .. })));
    }

    #[test]
    fn rejects_non_expressions() {
        assert!(matches!(
            parse_expr("   "),
            Err(TextError::NotAnExpression { .. })
        ));
        assert!(matches!(
            parse_expr("coding() coding()"),
            Err(TextError::NotAnExpression { .. })
        ));
        assert!(matches!(
            parse_expr("coding(code(\"a\", 1)"),
            Err(TextError::UnexpectedToken { .. })
        ));
        assert!(parse_expr("coding(,)").is_err());
    }
}
