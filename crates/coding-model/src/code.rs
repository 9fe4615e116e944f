//! A single value-to-label mapping.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// One value-to-label mapping plus lineage, description, and missing-ness metadata.
///
/// Codes are plain values: construction never fails. Checks that need sibling
/// codes (label uniqueness, value types, non-empty labels) run when codes are
/// assembled into a [`Coding`](crate::Coding).
///
/// # Example
///
/// ```
/// use coding_model::{code, Value};
///
/// let refused = code("Refused", None::<i32>).with_missing(true);
/// assert_eq!(refused.label(), "Refused");
/// assert_eq!(refused.value(), &Value::Missing);
/// assert_eq!(refused.links_from(), ["Refused"]);
/// assert_eq!(refused.description(), "Refused");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    label: String,
    value: Value,
    #[serde(default)]
    missing: bool,
    links_from: Vec<String>,
    description: String,
}

impl Code {
    /// Create a code with default metadata.
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        let label = label.into();
        Self {
            links_from: vec![label.clone()],
            description: label.clone(),
            label,
            value: value.into(),
            missing: false,
        }
    }

    /// Mark this code as a missing/non-response category.
    #[must_use]
    pub fn with_missing(mut self, missing: bool) -> Self {
        self.missing = missing;
        self
    }

    /// Record the source labels this code was recoded from.
    ///
    /// An empty source list keeps the default lineage (the code's own label).
    #[must_use]
    pub fn with_links_from<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sources: Vec<String> = sources.into_iter().map(Into::into).collect();
        if !sources.is_empty() {
            self.links_from = sources;
        }
        self
    }

    /// Set a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_missing(&self) -> bool {
        self.missing
    }

    /// Returns the lineage: labels this code was derived from.
    pub fn links_from(&self) -> &[String] {
        &self.links_from
    }

    /// Returns the description text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns true if the lineage differs from the code's own label.
    pub fn has_lineage(&self) -> bool {
        self.links_from.len() != 1 || self.links_from[0] != self.label
    }

    /// Returns true if the description differs from the label.
    pub fn has_description(&self) -> bool {
        self.description != self.label
    }
}

/// Shorthand for [`Code::new`].
pub fn code(label: impl Into<String>, value: impl Into<Value>) -> Code {
    Code::new(label, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_label() {
        let yes = code("Yes", 1);
        assert!(!yes.is_missing());
        assert_eq!(yes.links_from(), ["Yes"]);
        assert_eq!(yes.description(), "Yes");
        assert!(!yes.has_lineage());
        assert!(!yes.has_description());
    }

    #[test]
    fn builder_overrides_metadata() {
        let agree = code("Agree", 1)
            .with_links_from(["Agree", "Strongly agree"])
            .with_description("Any agreement")
            .with_missing(false);
        assert!(agree.has_lineage());
        assert!(agree.has_description());
        assert_eq!(agree.links_from().len(), 2);
    }

    #[test]
    fn empty_lineage_keeps_default() {
        let no = code("No", 0).with_links_from(Vec::<String>::new());
        assert_eq!(no.links_from(), ["No"]);
    }
}
