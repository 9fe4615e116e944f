//! Textual serialization of codings and the restricted deserializer.
//!
//! A coding renders as a single-line expression:
//!
//! ```text
//! coding(code("Yes", 1), code("No", 0), code("Refused", NA, missing = TRUE), label = "yesno")
//! ```
//!
//! Reading it back goes through [`parse_expr`] and [`eval_coding`]. The
//! grammar is closed: literals, `c(...)` vectors, and calls to `code` and
//! `coding`. There is no general evaluator behind it.

mod eval;
mod lexer;
mod parser;

use std::str::FromStr;

use crate::code::Code;
use crate::coding::Coding;
use crate::error::TextError;
use crate::value::quote_string;

pub use eval::eval_coding;
pub use parser::{Arg, Expr, MAX_DEPTH, parse_expr};

/// Options for [`as_character`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Emit `links_from` for codes whose lineage differs from their label.
    pub include_links_from: bool,
}

impl SerializeOptions {
    #[must_use]
    pub fn with_links_from(mut self, enable: bool) -> Self {
        self.include_links_from = enable;
        self
    }
}

/// Render a coding as a re-evaluable, single-line expression.
///
/// Each code always carries its label and value. `missing` is written only
/// when true, `description` only when it differs from the label, and
/// `links_from` only when requested and different from the label.
pub fn as_character(coding: &Coding, options: SerializeOptions) -> String {
    let mut args: Vec<String> = coding
        .iter()
        .map(|code| code_expression(code, options))
        .collect();
    if let Some(label) = coding.label() {
        args.push(format!("label = {}", quote_string(label)));
    }
    format!("coding({})", args.join(", "))
}

fn code_expression(code: &Code, options: SerializeOptions) -> String {
    let mut args = vec![quote_string(code.label()), code.value().to_literal()];
    if code.is_missing() {
        args.push("missing = TRUE".to_string());
    }
    if options.include_links_from && code.has_lineage() {
        let sources: Vec<String> = code.links_from().iter().map(|s| quote_string(s)).collect();
        args.push(format!("links_from = c({})", sources.join(", ")));
    }
    if code.has_description() {
        args.push(format!("description = {}", quote_string(code.description())));
    }
    format!("code({})", args.join(", "))
}

impl FromStr for Coding {
    type Err = TextError;

    /// Parse and evaluate a textual coding expression.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        eval_coding(&parse_expr(s)?)
    }
}
