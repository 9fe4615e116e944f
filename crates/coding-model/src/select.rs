//! Predicate-based selection over codings.
//!
//! Every selection re-assembles its result through [`Coding::new`], so the
//! output carries the same guarantees as any other coding. A selection that
//! matches nothing yields the empty coding rather than an error.

use std::collections::BTreeSet;

use crate::code::Code;
use crate::coding::Coding;
use crate::error::{CodingError, Result};
use crate::value::{Value, ValueKind};

/// Keep the codes for which `predicate` returns true, in original order.
///
/// The collection label is carried over.
pub fn select_codes_if<F>(coding: &Coding, mut predicate: F) -> Result<Coding>
where
    F: FnMut(&Code) -> bool,
{
    let selected: Vec<Code> = coding
        .iter()
        .filter(|&code| predicate(code))
        .cloned()
        .collect();
    tracing::debug!(
        from = coding.len(),
        selected = selected.len(),
        "selected codes"
    );
    if selected.is_empty() {
        return Ok(Coding::empty());
    }
    Coding::new(selected, coding.label().map(str::to_string))
}

/// Keep the codes whose label is in `labels`.
pub fn select_codes_by_label<S: AsRef<str>>(coding: &Coding, labels: &[S]) -> Result<Coding> {
    let wanted: BTreeSet<&str> = labels.iter().map(AsRef::as_ref).collect();
    select_codes_if(coding, |code| wanted.contains(code.label()))
}

/// [`select_codes_by_label`] for label sets read from untyped input, such as a
/// table column or an evaluated vector.
///
/// # Errors
///
/// Returns [`CodingError::InvalidLabelSet`] if any entry is not a string.
pub fn select_codes_by_label_values(coding: &Coding, labels: &[Value]) -> Result<Coding> {
    let mut wanted = Vec::with_capacity(labels.len());
    for value in labels {
        match value {
            Value::String(s) => wanted.push(s.as_str()),
            other => {
                return Err(CodingError::InvalidLabelSet {
                    found: format!("{} value {}", other.kind(), other.to_literal()),
                });
            }
        }
    }
    select_codes_by_label(coding, &wanted)
}

/// Keep the codes flagged as missing/non-response.
pub fn missing_codes(coding: &Coding) -> Result<Coding> {
    if coding.is_empty() {
        return Ok(Coding::empty());
    }
    select_codes_if(coding, Code::is_missing)
}

/// Ordered code values with a kind tag.
///
/// The values of the empty coding are an empty *logical* sequence, so callers
/// dispatching on [`CodingValues::kind`] always see
/// [`ValueKind::Boolean`] for "no data" regardless of what the coding would
/// have held.
#[derive(Debug, Clone, PartialEq)]
pub struct CodingValues {
    kind: ValueKind,
    values: Vec<Value>,
}

impl CodingValues {
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.values
    }
}

/// Every code's value, in order.
pub fn coding_values(coding: &Coding) -> CodingValues {
    let Some(kind) = coding.value_kind() else {
        return CodingValues {
            kind: ValueKind::Boolean,
            values: Vec::new(),
        };
    };
    CodingValues {
        kind,
        values: coding.iter().map(|c| c.value().clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::code;
    use crate::coding::{coding, empty_coding};

    fn yes_no_missing() -> Coding {
        coding([
            code("Yes", 1),
            code("No", 0),
            code("Missing", None::<i32>).with_missing(true),
        ])
        .unwrap()
    }

    #[test]
    fn always_true_is_identity() {
        let c = yes_no_missing().with_label("yn");
        assert_eq!(select_codes_if(&c, |_| true).unwrap(), c);
    }

    #[test]
    fn no_match_is_empty_coding() {
        let c = yes_no_missing();
        let none = select_codes_if(&c, |_| false).unwrap();
        assert!(none.is_empty());
        assert_eq!(none, empty_coding());
    }

    #[test]
    fn by_label_keeps_original_order() {
        let c = yes_no_missing();
        let picked = select_codes_by_label(&c, &["Missing", "Yes"]).unwrap();
        assert_eq!(picked.code_labels(), ["Yes", "Missing"]);
        assert_eq!(picked.position("Missing"), Some(2));
    }

    #[test]
    fn untyped_label_sets_must_be_strings() {
        let c = yes_no_missing();
        let picked = select_codes_by_label_values(&c, &[Value::from("No")]).unwrap();
        assert_eq!(picked.code_labels(), ["No"]);
        let err = select_codes_by_label_values(&c, &[Value::from("No"), Value::Integer(1)])
            .unwrap_err();
        assert!(matches!(err, CodingError::InvalidLabelSet { .. }));
    }

    #[test]
    fn missing_codes_selects_flagged() {
        let missing = missing_codes(&yes_no_missing()).unwrap();
        assert_eq!(missing.code_labels(), ["Missing"]);
        assert_eq!(missing_codes(&empty_coding()).unwrap(), empty_coding());
        let none_flagged = coding([code("A", 1)]).unwrap();
        assert!(missing_codes(&none_flagged).unwrap().is_empty());
    }

    #[test]
    fn values_in_order() {
        let values = coding_values(&yes_no_missing());
        assert_eq!(values.kind(), ValueKind::Integer);
        assert_eq!(
            values.as_slice(),
            [Value::Integer(1), Value::Integer(0), Value::Missing]
        );
    }

    #[test]
    fn empty_values_are_logical() {
        let values = coding_values(&empty_coding());
        assert!(values.is_empty());
        assert_eq!(values.kind(), ValueKind::Boolean);
    }
}
