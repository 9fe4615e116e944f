//! XLSForm (ODK) choice-list adapter.
//!
//! XLSForm's terminology is inverted relative to codings: a choice's `name`
//! becomes the code label and the choice's `label` becomes the code value.
//!
//! ```text
//! list_name | name | label        coding 'yesno'
//! yesno     | yes  | Yes     ->     code("yes", "Yes")
//! yesno     | no   | No             code("no", "No")
//! ```

use std::collections::BTreeSet;

use polars::prelude::{BooleanChunked, DataFrame, IntoColumn, NamedFrom, Series};

use crate::code::Code;
use crate::coding::Coding;
use crate::error::Result;
use crate::frame::{has_column, string_column, value_column, value_series};
use crate::value::Value;

pub const LIST_NAME: &str = "list_name";
pub const NAME: &str = "name";
pub const LABEL: &str = "label";

/// Build a coding from one choice list.
///
/// The caller filters the choices sheet to a single `list_name` beforehand.
/// If a `list_name` column is present and holds exactly one distinct value,
/// it becomes the coding's collection label.
///
/// # Errors
///
/// Fails if `name` or `label` is missing, or if the rows violate coding
/// invariants (duplicate names, mixed label types).
pub fn odk_to_coding(choices: &DataFrame) -> Result<Coding> {
    let names = string_column(choices, NAME)?;
    let labels = value_column(choices, LABEL)?;

    let list_name = if has_column(choices, LIST_NAME) {
        let distinct: BTreeSet<String> = string_column(choices, LIST_NAME)?
            .into_iter()
            .flatten()
            .collect();
        if distinct.len() == 1 {
            distinct.into_iter().next()
        } else {
            None
        }
    } else {
        None
    };

    let codes: Vec<Code> = names
        .into_iter()
        .zip(labels)
        .map(|(name, label)| Code::new(name.unwrap_or_default(), label))
        .collect();
    tracing::debug!(
        rows = codes.len(),
        list_name = list_name.as_deref().unwrap_or(""),
        "read choice list"
    );
    Coding::new(codes, list_name)
}

/// Emit a choice list (`list_name | name | label`) from a coding.
///
/// `list_name` is the coding's collection label, null when it has none.
pub fn coding_to_odk(coding: &Coding) -> Result<DataFrame> {
    let list_name: Vec<Option<&str>> = vec![coding.label(); coding.len()];
    let names: Vec<&str> = coding.iter().map(Code::label).collect();
    let values: Vec<&Value> = coding.iter().map(Code::value).collect();

    let df = DataFrame::new(vec![
        Series::new(LIST_NAME.into(), list_name).into_column(),
        Series::new(NAME.into(), names).into_column(),
        value_series(LABEL, &values, coding.value_kind()).into_column(),
    ])?;
    Ok(df)
}

/// Split a full choices sheet into one labelled coding per `list_name`,
/// in order of first appearance.
///
/// Rows without a `list_name` are skipped.
pub fn split_choices(choices: &DataFrame) -> Result<Vec<Coding>> {
    let list_names = string_column(choices, LIST_NAME)?;

    let mut order: Vec<&str> = Vec::new();
    let mut skipped = 0usize;
    for name in &list_names {
        match name.as_deref() {
            Some(name) if !order.contains(&name) => order.push(name),
            Some(_) => {}
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::warn!(rows = skipped, "choice rows without list_name were skipped");
    }

    let mut codings = Vec::with_capacity(order.len());
    for name in order {
        let mask: BooleanChunked = list_names
            .iter()
            .map(|candidate| candidate.as_deref() == Some(name))
            .collect();
        let subset = choices.filter(&mask)?;
        codings.push(odk_to_coding(&subset)?);
    }
    Ok(codings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::code;
    use crate::coding::{coding, empty_coding};
    use polars::prelude::DataType;

    fn choices() -> DataFrame {
        DataFrame::new(vec![
            Series::new(LIST_NAME.into(), ["yesno", "yesno", "color", "color", "color"])
                .into_column(),
            Series::new(NAME.into(), ["yes", "no", "red", "green", "blue"]).into_column(),
            Series::new(LABEL.into(), ["Yes", "No", "Red", "Green", "Blue"]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn names_become_labels_and_labels_become_values() {
        let yesno = choices().head(Some(2));
        let c = odk_to_coding(&yesno).unwrap();
        assert_eq!(c.label(), Some("yesno"));
        assert_eq!(c.code_labels(), ["yes", "no"]);
        assert_eq!(c.get("yes").unwrap().value(), &Value::from("Yes"));
    }

    #[test]
    fn mixed_list_names_leave_coding_unlabelled() {
        let c = odk_to_coding(&choices().head(Some(3))).unwrap();
        assert_eq!(c.label(), None);
    }

    #[test]
    fn duplicate_names_rejected() {
        let df = DataFrame::new(vec![
            Series::new(NAME.into(), ["a", "a"]).into_column(),
            Series::new(LABEL.into(), ["A", "B"]).into_column(),
        ])
        .unwrap();
        assert!(odk_to_coding(&df).is_err());
    }

    #[test]
    fn odk_round_trip_preserves_name_and_label() {
        let yesno = choices().head(Some(2));
        let back = coding_to_odk(&odk_to_coding(&yesno).unwrap()).unwrap();
        assert!(back.equals(&yesno));
    }

    #[test]
    fn unlabelled_coding_has_null_list_name() {
        let c = coding([code("a", 1)]).unwrap();
        let df = coding_to_odk(&c).unwrap();
        assert_eq!(df.column(LIST_NAME).unwrap().null_count(), 1);
        assert_eq!(df.column(LABEL).unwrap().dtype(), &DataType::Int64);
        assert_eq!(coding_to_odk(&empty_coding()).unwrap().height(), 0);
    }

    #[test]
    fn split_groups_by_first_appearance() {
        let codings = split_choices(&choices()).unwrap();
        let names: Vec<_> = codings.iter().map(|c| c.label()).collect();
        assert_eq!(names, [Some("yesno"), Some("color")]);
        assert_eq!(codings[1].len(), 3);
    }
}
