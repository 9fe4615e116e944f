//! Portable, introspectable categorical codings.
//!
//! A [`Code`] maps one value to a label and records lineage, a description,
//! and whether it stands for a missing/non-response category. A [`Coding`]
//! is an ordered, uniquely-labelled collection of codes, independent of any
//! data vector.
//!
//! # Module Organization
//!
//! - [`value`]: scalar code values and kind tags
//! - [`code`] / [`coding`]: the data model and its construction invariants
//! - [`select`]: predicate-based selection producing new codings
//! - [`frame`]: tabular export/import via polars `DataFrame`
//! - [`odk`]: XLSForm choice-list adapter
//! - [`text`]: single-line textual form and its restricted deserializer
//! - [`display`]: printing
//!
//! # Example
//!
//! ```
//! use coding_model::{as_character, code, coding, missing_codes, SerializeOptions, Coding};
//!
//! let yesno = coding([
//!     code("Yes", 1),
//!     code("No", 0),
//!     code("Refused", None::<i32>).with_missing(true),
//! ])?
//! .with_label("yesno");
//!
//! assert_eq!(missing_codes(&yesno)?.code_labels(), ["Refused"]);
//!
//! let text = as_character(&yesno, SerializeOptions::default());
//! let back: Coding = text.parse()?;
//! assert_eq!(back, yesno);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod code;
pub mod coding;
pub mod display;
pub mod error;
pub mod frame;
pub mod odk;
pub mod select;
pub mod text;
pub mod value;

pub use code::{Code, code};
pub use coding::{
    Coding, code_labels, coding, coding_label, coding_with_label, empty_coding, is_empty_coding,
};
pub use display::{print_coding, render};
pub use error::{CodingError, Result, TextError};
pub use frame::{
    Suffix, coding_contents, coding_contents_with_missing, coding_from_contents,
    coding_to_data_frame,
};
pub use odk::{coding_to_odk, odk_to_coding, split_choices};
pub use select::{
    CodingValues, coding_values, missing_codes, select_codes_by_label, select_codes_by_label_values,
    select_codes_if,
};
pub use text::{SerializeOptions, as_character, eval_coding, parse_expr};
pub use value::{Value, ValueKind};
