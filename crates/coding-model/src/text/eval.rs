//! Restricted evaluation of parsed coding expressions.
//!
//! Only two names can be called: `code` and `coding`. Any other name, bare
//! or called, is rejected, so evaluating stored text can never reach state
//! outside the expression itself.

use crate::code::Code;
use crate::coding::Coding;
use crate::error::{CodingError, TextError};
use crate::value::Value;

use super::parser::{Arg, Expr};

const CODE: &str = "code";
const CODING: &str = "coding";

const CODE_PARAMS: [&str; 5] = ["label", "value", "missing", "links_from", "description"];

/// The callable vocabulary of a coding expression.
#[derive(Debug, Clone, Copy)]
enum Builtin {
    Code,
    Coding,
}

impl Builtin {
    fn lookup(name: &str, offset: usize) -> Result<Self, TextError> {
        match name {
            CODE => Ok(Self::Code),
            CODING => Ok(Self::Coding),
            _ => Err(TextError::UnknownName {
                name: name.to_string(),
                offset,
            }),
        }
    }
}

/// Result of evaluating a sub-expression.
enum Evaluated {
    Scalar(Value),
    Vector(Vec<Value>),
    Code(Code),
    Coding(Coding),
}

impl Evaluated {
    fn describe(&self) -> String {
        match self {
            Self::Scalar(value) => format!("{} value {}", value.kind(), value.to_literal()),
            Self::Vector(values) => format!("vector of length {}", values.len()),
            Self::Code(code) => format!("code '{}'", code.label()),
            Self::Coding(_) => "coding".to_string(),
        }
    }
}

/// Evaluate an unevaluated `coding(...)` expression into a [`Coding`].
///
/// # Errors
///
/// - [`TextError::UnknownName`] if the expression mentions any name other
///   than `code` or `coding`
/// - [`TextError::NotACodingCall`] if the expression is not a coding
/// - argument errors, and [`TextError::Coding`] for assembly failures
pub fn eval_coding(expr: &Expr) -> Result<Coding, TextError> {
    match eval(expr)? {
        Evaluated::Coding(coding) => {
            tracing::debug!(codes = coding.len(), "evaluated coding expression");
            Ok(coding)
        }
        other => Err(TextError::NotACodingCall {
            found: other.describe(),
        }),
    }
}

fn eval(expr: &Expr) -> Result<Evaluated, TextError> {
    match expr {
        Expr::Literal { value, .. } => Ok(Evaluated::Scalar(value.clone())),
        Expr::Vector { items, .. } => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match eval(item)? {
                    Evaluated::Scalar(value) => values.push(value),
                    other => {
                        return Err(TextError::InvalidArgument {
                            function: "c",
                            argument: "...",
                            expected: "scalar literals",
                            found: other.describe(),
                        });
                    }
                }
            }
            Ok(Evaluated::Vector(values))
        }
        Expr::Ident { name, offset } => Err(TextError::UnknownName {
            name: name.clone(),
            offset: *offset,
        }),
        Expr::Call { name, args, offset } => match Builtin::lookup(name, *offset)? {
            Builtin::Code => eval_code(args).map(Evaluated::Code),
            Builtin::Coding => eval_coding_call(args).map(Evaluated::Coding),
        },
    }
}

fn eval_code(args: &[Arg]) -> Result<Code, TextError> {
    let [label, value, missing, links_from, description] = bind_args(CODE, &CODE_PARAMS, args)?;

    let label = label.ok_or(TextError::MissingArgument {
        function: CODE,
        argument: "label",
    })?;
    let value = value.ok_or(TextError::MissingArgument {
        function: CODE,
        argument: "value",
    })?;

    let mut code = Code::new(
        expect_string(eval(label)?, "label")?,
        expect_scalar(eval(value)?, "value")?,
    );
    if let Some(missing) = missing {
        code = code.with_missing(expect_bool(eval(missing)?, "missing")?);
    }
    if let Some(links_from) = links_from {
        code = code.with_links_from(expect_strings(eval(links_from)?, "links_from")?);
    }
    if let Some(description) = description {
        code = code.with_description(expect_string(eval(description)?, "description")?);
    }
    Ok(code)
}

fn eval_coding_call(args: &[Arg]) -> Result<Coding, TextError> {
    let mut codes = Vec::with_capacity(args.len());
    let mut label: Option<Option<String>> = None;

    for arg in args {
        match arg.name.as_deref() {
            None => match eval(&arg.value)? {
                Evaluated::Code(code) => codes.push(code),
                other => {
                    return Err(CodingError::NotACode {
                        found: other.describe(),
                    }
                    .into());
                }
            },
            Some("label") => {
                if label.is_some() {
                    return Err(TextError::DuplicateArgument {
                        function: CODING,
                        argument: "label",
                    });
                }
                label = Some(match eval(&arg.value)? {
                    Evaluated::Scalar(Value::Missing) => None,
                    other => Some(expect_string_for(other, CODING, "label")?),
                });
            }
            Some(other) => {
                return Err(TextError::UnexpectedArgument {
                    function: CODING,
                    argument: other.to_string(),
                });
            }
        }
    }

    Ok(Coding::new(codes, label.flatten())?)
}

/// Match arguments to parameters: named arguments first, then positional
/// arguments fill the remaining slots in order.
fn bind_args<'a, const N: usize>(
    function: &'static str,
    params: &[&'static str; N],
    args: &'a [Arg],
) -> Result<[Option<&'a Expr>; N], TextError> {
    let mut slots: [Option<&'a Expr>; N] = [None; N];

    for arg in args {
        let Some(name) = arg.name.as_deref() else {
            continue;
        };
        let Some(index) = params.iter().position(|p| *p == name) else {
            return Err(TextError::UnexpectedArgument {
                function,
                argument: name.to_string(),
            });
        };
        if slots[index].is_some() {
            return Err(TextError::DuplicateArgument {
                function,
                argument: params[index],
            });
        }
        slots[index] = Some(&arg.value);
    }

    let mut free = 0;
    for (position, arg) in args.iter().enumerate() {
        if arg.name.is_some() {
            continue;
        }
        while free < N && slots[free].is_some() {
            free += 1;
        }
        if free == N {
            return Err(TextError::UnexpectedArgument {
                function,
                argument: format!("positional argument {}", position + 1),
            });
        }
        slots[free] = Some(&arg.value);
    }

    Ok(slots)
}

fn expect_scalar(value: Evaluated, argument: &'static str) -> Result<Value, TextError> {
    match value {
        Evaluated::Scalar(value) => Ok(value),
        Evaluated::Vector(mut values) if values.len() == 1 => Ok(values.remove(0)),
        other => Err(invalid(CODE, argument, "a scalar literal", &other)),
    }
}

fn expect_string(value: Evaluated, argument: &'static str) -> Result<String, TextError> {
    expect_string_for(value, CODE, argument)
}

fn expect_string_for(
    value: Evaluated,
    function: &'static str,
    argument: &'static str,
) -> Result<String, TextError> {
    match value {
        Evaluated::Scalar(Value::String(s)) => Ok(s),
        other => Err(invalid(function, argument, "a string", &other)),
    }
}

fn expect_bool(value: Evaluated, argument: &'static str) -> Result<bool, TextError> {
    match value {
        Evaluated::Scalar(Value::Boolean(b)) => Ok(b),
        other => Err(invalid(CODE, argument, "TRUE or FALSE", &other)),
    }
}

fn expect_strings(value: Evaluated, argument: &'static str) -> Result<Vec<String>, TextError> {
    let values = match value {
        Evaluated::Scalar(value) => vec![value],
        Evaluated::Vector(values) => values,
        other => return Err(invalid(CODE, argument, "strings", &other)),
    };
    values
        .into_iter()
        .map(|value| match value {
            Value::String(s) => Ok(s),
            other => Err(TextError::InvalidArgument {
                function: CODE,
                argument,
                expected: "strings",
                found: format!("{} value {}", other.kind(), other.to_literal()),
            }),
        })
        .collect()
}

fn invalid(
    function: &'static str,
    argument: &'static str,
    expected: &'static str,
    found: &Evaluated,
) -> TextError {
    TextError::InvalidArgument {
        function,
        argument,
        expected,
        found: found.describe(),
    }
}
