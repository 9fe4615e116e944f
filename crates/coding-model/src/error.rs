//! Error types for coding construction, tabular conversion, and textual evaluation.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while assembling or converting a [`Coding`](crate::Coding).
///
/// Every variant is a construction error: the call that produced it returns
/// no partial result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodingError {
    /// A code was given an empty label.
    #[error("code at position {position} has an empty label")]
    EmptyLabel { position: usize },

    /// Two codes in the same coding share a label.
    #[error("labels must be unique: '{label}' appears more than once")]
    DuplicateLabel { label: String },

    /// Code values do not share one primitive type.
    #[error(
        "code values must all be the same type, found {kinds}; \
         check for numeric values written as quoted strings (e.g. 1 vs \"1\")"
    )]
    MixedValueTypes { kinds: String },

    /// Something other than a code was passed where codes are expected.
    #[error("coding only accepts code objects, found {found}")]
    NotACode { found: String },

    /// A label set passed to label-based selection contained non-string entries.
    #[error("label set must be a sequence of strings, found {found}")]
    InvalidLabelSet { found: String },

    /// A column suffix was empty.
    #[error("suffix must be a non-empty string or a positive integer")]
    InvalidSuffix,

    /// A required column is absent from a table.
    #[error("required column '{column}' not found")]
    MissingColumn { column: &'static str },

    /// A table column holds a type the bridge cannot read.
    #[error("column '{column}' has unsupported type {dtype}")]
    UnsupportedColumn { column: String, dtype: String },

    /// Failure inside polars while building or reading a table.
    #[error("table error: {0}")]
    Frame(#[from] PolarsError),
}

/// Errors raised while parsing or evaluating a textual coding expression.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TextError {
    /// The lexer met a character outside the grammar.
    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    /// A string literal was not closed before the end of input.
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    /// A string literal contained an unsupported escape sequence.
    #[error("invalid escape '\\{found}' at offset {offset}")]
    InvalidEscape { found: char, offset: usize },

    /// A numeric literal could not be read.
    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    /// The parser expected something else.
    #[error("expected {expected} at offset {offset}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        offset: usize,
    },

    /// Input held no expression, or trailing input followed it.
    #[error("input is not a single expression: {reason}")]
    NotAnExpression { reason: &'static str },

    /// Calls or vectors nested deeper than the parser accepts.
    #[error("expression nests too deeply at offset {offset}")]
    TooDeep { offset: usize },

    /// The expression referenced a name outside the `code`/`coding` vocabulary.
    #[error("'{name}' is not available when evaluating a coding (offset {offset})")]
    UnknownName { name: String, offset: usize },

    /// The top-level expression was not a call to `coding(...)`.
    #[error("expected a call to coding(...), found {found}")]
    NotACodingCall { found: String },

    /// A call received an argument it does not accept.
    #[error("{function}() got an unexpected argument '{argument}'")]
    UnexpectedArgument {
        function: &'static str,
        argument: String,
    },

    /// A call received the same argument twice.
    #[error("{function}() got multiple values for argument '{argument}'")]
    DuplicateArgument {
        function: &'static str,
        argument: &'static str,
    },

    /// A required argument was not supplied.
    #[error("{function}() is missing required argument '{argument}'")]
    MissingArgument {
        function: &'static str,
        argument: &'static str,
    },

    /// An argument had the wrong shape or type.
    #[error("{function}() argument '{argument}' must be {expected}, found {found}")]
    InvalidArgument {
        function: &'static str,
        argument: &'static str,
        expected: &'static str,
        found: String,
    },

    /// The evaluated codes failed coding assembly.
    #[error(transparent)]
    Coding(#[from] CodingError),
}

/// Result type for coding operations.
pub type Result<T> = std::result::Result<T, CodingError>;
