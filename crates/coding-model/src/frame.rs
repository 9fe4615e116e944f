//! Tabular bridge: codings to and from polars `DataFrame`s.
//!
//! A coding flattens to one row per code with the columns
//! `link | label | value | description`. `link` holds the lineage as a
//! list of labels so multi-source codes stay on one row.

use std::fmt;
use std::num::NonZeroU32;

use polars::prelude::{AnyValue, Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};

use crate::code::Code;
use crate::coding::Coding;
use crate::error::{CodingError, Result};
use crate::value::{Value, ValueKind};

pub const LINK: &str = "link";
pub const LABEL: &str = "label";
pub const VALUE: &str = "value";
pub const DESCRIPTION: &str = "description";
/// Optional column read by [`coding_from_contents`].
pub const MISSING: &str = "missing";

/// Column-name suffix used when placing several codings side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suffix {
    Text(String),
    Index(NonZeroU32),
}

impl Suffix {
    /// Text suffix; must be non-empty.
    pub fn text(suffix: impl Into<String>) -> Result<Self> {
        let suffix = suffix.into();
        if suffix.is_empty() {
            return Err(CodingError::InvalidSuffix);
        }
        Ok(Self::Text(suffix))
    }

    /// Integer suffix; must be positive.
    pub fn index(index: i64) -> Result<Self> {
        u32::try_from(index)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self::Index)
            .ok_or(CodingError::InvalidSuffix)
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Index(n) => write!(f, "{n}"),
        }
    }
}

/// Flatten a coding to a `link | label | value | description` table.
///
/// The empty coding gives zero rows with a stable schema: `link` is a list
/// of strings, `value` is logical, the rest are strings.
pub fn coding_contents(coding: &Coding) -> Result<DataFrame> {
    if coding.is_empty() {
        return empty_contents();
    }

    let link: Vec<Series> = coding
        .iter()
        .map(|code| Series::new("".into(), code.links_from()))
        .collect();
    let label: Vec<&str> = coding.iter().map(Code::label).collect();
    let description: Vec<&str> = coding.iter().map(Code::description).collect();
    let values: Vec<&Value> = coding.iter().map(Code::value).collect();

    let df = DataFrame::new(vec![
        Series::new(LINK.into(), link).into_column(),
        Series::new(LABEL.into(), label).into_column(),
        value_series(VALUE, &values, coding.value_kind()).into_column(),
        Series::new(DESCRIPTION.into(), description).into_column(),
    ])?;
    tracing::debug!(rows = df.height(), "flattened coding to table");
    Ok(df)
}

/// [`coding_contents`] plus a logical `missing` column.
///
/// This is the lossless export: [`coding_from_contents`] rebuilds an equal
/// coding from it, missing flags included.
pub fn coding_contents_with_missing(coding: &Coding) -> Result<DataFrame> {
    let mut df = coding_contents(coding)?;
    let flags: Vec<bool> = coding.iter().map(Code::is_missing).collect();
    df.with_column(Series::new(MISSING.into(), flags))?;
    Ok(df)
}

/// [`coding_contents`] with every column except `link` renamed to
/// `<column>_<suffix>` when a suffix is given.
pub fn coding_to_data_frame(coding: &Coding, suffix: Option<&Suffix>) -> Result<DataFrame> {
    let mut df = coding_contents(coding)?;
    if let Some(suffix) = suffix {
        if matches!(suffix, Suffix::Text(s) if s.is_empty()) {
            return Err(CodingError::InvalidSuffix);
        }
        for column in [LABEL, VALUE, DESCRIPTION] {
            df.rename(column, format!("{column}_{suffix}").into())?;
        }
    }
    Ok(df)
}

/// Rebuild a coding from a table shaped like [`coding_contents_with_missing`]
/// output.
///
/// `label` and `value` are required. `link` may be a list or plain string
/// column; `description` and a logical `missing` column are optional. Without
/// a `missing` column every code is read as not missing, so plain
/// [`coding_contents`] output loses the flags.
pub fn coding_from_contents(df: &DataFrame) -> Result<Coding> {
    let labels = string_column(df, LABEL)?;
    let values = value_column(df, VALUE)?;
    let links = optional_link_column(df)?;
    let descriptions = if has_column(df, DESCRIPTION) {
        Some(string_column(df, DESCRIPTION)?)
    } else {
        None
    };
    let missing = if has_column(df, MISSING) {
        Some(value_column(df, MISSING)?)
    } else {
        None
    };

    let mut codes = Vec::with_capacity(df.height());
    for (row, (label, value)) in labels.into_iter().zip(values).enumerate() {
        let mut code = Code::new(label.unwrap_or_default(), value);
        if let Some(sources) = links.as_ref().and_then(|l| l[row].clone()) {
            code = code.with_links_from(sources);
        }
        if let Some(Some(description)) = descriptions.as_ref().map(|d| d[row].clone()) {
            code = code.with_description(description);
        }
        if let Some(flags) = &missing {
            code = code.with_missing(is_truthy(&flags[row]));
        }
        codes.push(code);
    }
    Coding::new(codes, None)
}

fn empty_contents() -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new_empty(LINK.into(), &DataType::List(Box::new(DataType::String))).into_column(),
        Series::new_empty(LABEL.into(), &DataType::String).into_column(),
        Series::new_empty(VALUE.into(), &DataType::Boolean).into_column(),
        Series::new_empty(DESCRIPTION.into(), &DataType::String).into_column(),
    ])?;
    Ok(df)
}

/// Build a typed value column. All-missing and empty columns are logical.
pub(crate) fn value_series(name: &str, values: &[&Value], kind: Option<ValueKind>) -> Series {
    match kind {
        Some(ValueKind::Integer) => {
            let data: Vec<Option<i64>> = values
                .iter()
                .map(|v| match v {
                    Value::Integer(i) => Some(*i),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), data)
        }
        Some(ValueKind::Float) => {
            let data: Vec<Option<f64>> = values.iter().map(|v| v.as_f64()).collect();
            Series::new(name.into(), data)
        }
        Some(ValueKind::String) => {
            let data: Vec<Option<&str>> = values.iter().map(|v| v.as_str()).collect();
            Series::new(name.into(), data)
        }
        Some(ValueKind::Boolean | ValueKind::Missing) | None => {
            let data: Vec<Option<bool>> = values.iter().map(|v| v.as_bool()).collect();
            Series::new(name.into(), data)
        }
    }
}

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

fn required_column<'a>(df: &'a DataFrame, name: &'static str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| CodingError::MissingColumn { column: name })
}

/// Read a column as optional strings, casting non-string columns.
pub(crate) fn string_column(df: &DataFrame, name: &'static str) -> Result<Vec<Option<String>>> {
    let column = required_column(df, name)?.cast(&DataType::String)?;
    let values = column
        .as_materialized_series()
        .str()?
        .iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

/// Read a column cell by cell as code values, preserving its type.
pub(crate) fn value_column(df: &DataFrame, name: &'static str) -> Result<Vec<Value>> {
    let column = required_column(df, name)?;
    let mut values = Vec::with_capacity(column.len());
    for row in 0..column.len() {
        values.push(any_to_value(column.get(row)?));
    }
    Ok(values)
}

fn optional_link_column(df: &DataFrame) -> Result<Option<Vec<Option<Vec<String>>>>> {
    if !has_column(df, LINK) {
        return Ok(None);
    }
    let column = required_column(df, LINK)?;
    let links = match column.dtype() {
        DataType::List(_) => {
            let mut links = Vec::with_capacity(column.len());
            for cell in column.as_materialized_series().list()? {
                let sources = match cell {
                    Some(series) => Some(
                        series
                            .cast(&DataType::String)?
                            .str()?
                            .iter()
                            .flatten()
                            .map(str::to_string)
                            .collect(),
                    ),
                    None => None,
                };
                links.push(sources);
            }
            links
        }
        DataType::String => string_column(df, LINK)?
            .into_iter()
            .map(|cell| cell.map(|s| vec![s]))
            .collect(),
        other => {
            return Err(CodingError::UnsupportedColumn {
                column: LINK.to_string(),
                dtype: other.to_string(),
            });
        }
    };
    Ok(Some(links))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Boolean(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Convert a polars cell to a code value.
pub(crate) fn any_to_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Missing,
        AnyValue::Boolean(b) => Value::Boolean(b),
        AnyValue::Int32(v) => Value::Integer(i64::from(v)),
        AnyValue::Int64(v) => Value::Integer(v),
        AnyValue::UInt32(v) => Value::Integer(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).map_or(Value::Float(v as f64), Value::Integer),
        AnyValue::Float32(v) => Value::Float(f64::from(v)),
        AnyValue::Float64(v) => Value::Float(v),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        other => {
            let dtype = other.dtype();
            if dtype.is_integer() {
                other.extract::<i64>().map_or(Value::Missing, Value::Integer)
            } else if dtype.is_float() {
                other.extract::<f64>().map_or(Value::Missing, Value::Float)
            } else {
                Value::String(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::code;
    use crate::coding::{coding, empty_coding};

    #[test]
    fn contents_have_one_row_per_code() {
        let c = coding([
            code("Agree", 1).with_links_from(["Agree", "Strongly agree"]),
            code("Disagree", 2),
        ])
        .unwrap();
        let df = coding_contents(&c).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(
            df.get_column_names_str(),
            [LINK, LABEL, VALUE, DESCRIPTION]
        );
        assert_eq!(df.column(VALUE).unwrap().dtype(), &DataType::Int64);
        let first_link = df
            .column(LINK)
            .unwrap()
            .as_materialized_series()
            .list()
            .unwrap()
            .get_as_series(0)
            .unwrap();
        assert_eq!(first_link.len(), 2);
    }

    #[test]
    fn empty_contents_keep_schema() {
        let df = coding_contents(&empty_coding()).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.column(VALUE).unwrap().dtype(), &DataType::Boolean);
        assert_eq!(
            df.column(LINK).unwrap().dtype(),
            &DataType::List(Box::new(DataType::String))
        );
        assert_eq!(df.column(LABEL).unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn suffix_renames_all_but_link() {
        let c = coding([code("A", "a")]).unwrap();
        let suffix = Suffix::text("q1").unwrap();
        let df = coding_to_data_frame(&c, Some(&suffix)).unwrap();
        assert_eq!(
            df.get_column_names_str(),
            ["link", "label_q1", "value_q1", "description_q1"]
        );
        let df = coding_to_data_frame(&c, Some(&Suffix::index(2).unwrap())).unwrap();
        assert!(has_column(&df, "value_2"));
    }

    #[test]
    fn invalid_suffixes_rejected() {
        assert!(matches!(Suffix::text(""), Err(CodingError::InvalidSuffix)));
        assert!(matches!(Suffix::index(0), Err(CodingError::InvalidSuffix)));
        assert!(matches!(Suffix::index(-3), Err(CodingError::InvalidSuffix)));
    }

    #[test]
    fn contents_round_trip() {
        let c = coding([
            code("Yes", 1.0).with_description("Said yes"),
            code("No", 0.0).with_links_from(["No", "Nope"]),
            code("Skipped", None::<f64>),
        ])
        .unwrap();
        let back = coding_from_contents(&coding_contents(&c).unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn missing_flags_survive_full_export() {
        let c = coding([
            code("Yes", 1),
            code("Refused", None::<i32>).with_missing(true),
            code("Unknown", -99).with_missing(true),
        ])
        .unwrap();
        let df = coding_contents_with_missing(&c).unwrap();
        assert_eq!(df.column(MISSING).unwrap().dtype(), &DataType::Boolean);
        let back = coding_from_contents(&df).unwrap();
        assert!(back.get("Refused").unwrap().is_missing());
        assert!(back.get("Unknown").unwrap().is_missing());
        assert_eq!(back, c);

        let lossy = coding_from_contents(&coding_contents(&c).unwrap()).unwrap();
        assert!(!lossy.get("Refused").unwrap().is_missing());
    }

    #[test]
    fn empty_full_export_has_missing_column() {
        let df = coding_contents_with_missing(&empty_coding()).unwrap();
        assert_eq!(df.height(), 0);
        assert!(has_column(&df, MISSING));
        assert_eq!(coding_from_contents(&df).unwrap(), empty_coding());
    }

    #[test]
    fn from_contents_requires_label_and_value() {
        let df = DataFrame::new(vec![Series::new("label".into(), ["A"]).into_column()]).unwrap();
        assert!(matches!(
            coding_from_contents(&df),
            Err(CodingError::MissingColumn { column: "value" })
        ));
    }
}
