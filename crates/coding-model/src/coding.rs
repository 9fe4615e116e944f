//! Ordered, uniquely-labelled collections of codes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::code::Code;
use crate::error::{CodingError, Result};
use crate::value::ValueKind;

/// An ordered, named collection of [`Code`]s.
///
/// A coding is immutable once built. All invariants (non-empty labels,
/// unique labels, consistent value types) are checked in [`Coding::new`];
/// derived operations build a new coding through the same constructor.
///
/// The zero-code coding is the *empty coding*: it carries no collection label
/// and every empty coding compares equal to every other.
///
/// # Example
///
/// ```
/// use coding_model::{code, Coding};
///
/// let yesno = Coding::new(
///     vec![code("Yes", 1), code("No", 0)],
///     Some("yesno".to_string()),
/// )?;
/// assert_eq!(yesno.position("No"), Some(2));
/// assert_eq!(yesno.label(), Some("yesno"));
/// # Ok::<(), coding_model::CodingError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CodingRepr")]
pub struct Coding {
    codes: Vec<Code>,
    /// Label -> 1-based position, derived at construction.
    #[serde(skip)]
    labels: BTreeMap<String, usize>,
    label: Option<String>,
}

/// Wire shape for deserialization; converted through [`Coding::new`].
#[derive(Deserialize)]
struct CodingRepr {
    codes: Vec<Code>,
    #[serde(default)]
    label: Option<String>,
}

impl TryFrom<CodingRepr> for Coding {
    type Error = CodingError;

    fn try_from(repr: CodingRepr) -> Result<Self> {
        Coding::new(repr.codes, repr.label)
    }
}

impl Coding {
    /// Assemble a coding from codes and an optional collection label.
    ///
    /// Zero codes yield the empty coding (the collection label is dropped).
    ///
    /// # Errors
    ///
    /// - [`CodingError::EmptyLabel`] if a code has an empty label
    /// - [`CodingError::DuplicateLabel`] if two codes share a label
    /// - [`CodingError::MixedValueTypes`] if non-missing values differ in type
    pub fn new(codes: Vec<Code>, label: Option<String>) -> Result<Self> {
        if codes.is_empty() {
            return Ok(Self::empty());
        }

        let mut labels = BTreeMap::new();
        for (index, code) in codes.iter().enumerate() {
            if code.label().is_empty() {
                return Err(CodingError::EmptyLabel {
                    position: index + 1,
                });
            }
            if labels.insert(code.label().to_string(), index + 1).is_some() {
                return Err(CodingError::DuplicateLabel {
                    label: code.label().to_string(),
                });
            }
        }

        check_value_kinds(&codes)?;

        tracing::trace!(
            codes = codes.len(),
            label = label.as_deref().unwrap_or(""),
            "assembled coding"
        );

        Ok(Self {
            codes,
            labels,
            label,
        })
    }

    /// The empty coding: no codes, no collection label.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a copy of this coding with a different collection label.
    ///
    /// The empty coding stays unlabelled.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        if !self.is_empty() {
            self.label = Some(label.into());
        }
        self
    }

    /// Returns true for the empty coding.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Codes in insertion order.
    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Code> {
        self.codes.iter()
    }

    /// Label -> 1-based position index.
    pub fn labels(&self) -> &BTreeMap<String, usize> {
        &self.labels
    }

    /// Collection-level label (the name of the variable this coding describes).
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// 1-based position of the code with this label.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    /// Look up a code by label.
    pub fn get(&self, label: &str) -> Option<&Code> {
        self.position(label).map(|pos| &self.codes[pos - 1])
    }

    /// Code labels in insertion order.
    pub fn code_labels(&self) -> Vec<&str> {
        self.codes.iter().map(Code::label).collect()
    }

    /// The value kind shared by this coding's codes.
    ///
    /// Returns `None` for the empty coding and [`ValueKind::Missing`] when
    /// every value is missing. Mixed integer/float codings report `Float`.
    pub fn value_kind(&self) -> Option<ValueKind> {
        if self.is_empty() {
            return None;
        }
        let mut kind = ValueKind::Missing;
        for code in &self.codes {
            match (kind, code.value().kind()) {
                (_, ValueKind::Missing) => {}
                (ValueKind::Missing | ValueKind::Integer, next) => kind = next,
                _ => {}
            }
        }
        Some(kind)
    }

    /// Consume the coding and return its codes and collection label.
    pub fn into_parts(self) -> (Vec<Code>, Option<String>) {
        (self.codes, self.label)
    }
}

impl<'a> IntoIterator for &'a Coding {
    type Item = &'a Code;
    type IntoIter = std::slice::Iter<'a, Code>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// Assemble an unlabelled coding. Shorthand for [`Coding::new`].
pub fn coding(codes: impl IntoIterator<Item = Code>) -> Result<Coding> {
    Coding::new(codes.into_iter().collect(), None)
}

/// Assemble a coding with a collection label.
pub fn coding_with_label(
    codes: impl IntoIterator<Item = Code>,
    label: impl Into<String>,
) -> Result<Coding> {
    Coding::new(codes.into_iter().collect(), Some(label.into()))
}

/// The empty coding.
pub fn empty_coding() -> Coding {
    Coding::empty()
}

pub fn is_empty_coding(coding: &Coding) -> bool {
    coding.is_empty()
}

/// Collection label of a coding, if any.
pub fn coding_label(coding: &Coding) -> Option<&str> {
    coding.label()
}

/// Ordered code labels of a coding.
pub fn code_labels(coding: &Coding) -> Vec<&str> {
    coding.code_labels()
}

/// All-missing codings are valid; otherwise every non-missing value must
/// belong to one kind family.
fn check_value_kinds(codes: &[Code]) -> Result<()> {
    let kinds: BTreeSet<ValueKind> = codes
        .iter()
        .map(|code| code.value().kind())
        .filter(|kind| *kind != ValueKind::Missing)
        .collect();

    let mut iter = kinds.iter();
    let Some(first) = iter.next() else {
        return Ok(());
    };
    if iter.all(|kind| first.is_compatible_with(*kind)) {
        return Ok(());
    }

    let kinds = kinds
        .iter()
        .map(ValueKind::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Err(CodingError::MixedValueTypes { kinds })
}
