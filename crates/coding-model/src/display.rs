//! Human-readable rendering of codings.

use std::fmt;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::coding::Coding;
use crate::frame::{DESCRIPTION, LABEL, LINK, MISSING, VALUE};
use crate::value::Value;

/// Line printed for the empty coding.
pub const EMPTY_CODING_LINE: &str = "<Empty Coding>";

/// Render a coding: a header line followed by its contents table.
///
/// Columns follow [`coding_contents_with_missing`](crate::frame::coding_contents_with_missing);
/// flagged codes show `TRUE` under `missing`.
///
/// ```
/// use coding_model::{code, coding, display::render};
///
/// let yn = coding([code("Yes", 1), code("No", 0)])?.with_label("yesno");
/// let text = render(&yn);
/// assert!(text.starts_with("<Coding: 'yesno'>"));
/// # Ok::<(), coding_model::CodingError>(())
/// ```
pub fn render(coding: &Coding) -> String {
    if coding.is_empty() {
        return EMPTY_CODING_LINE.to_string();
    }
    let header = match coding.label() {
        Some(label) => format!("<Coding: '{label}'>"),
        None => "<Coding>".to_string(),
    };
    format!("{header}\n{}", contents_table(coding))
}

/// Print [`render`] output to stdout.
pub fn print_coding(coding: &Coding) {
    println!("{}", render(coding));
}

fn contents_table(coding: &Coding) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            header_cell(LINK),
            header_cell(LABEL),
            header_cell(VALUE),
            header_cell(DESCRIPTION),
            header_cell(MISSING),
        ]);

    for code in coding {
        let mut label = Cell::new(code.label());
        if code.is_missing() {
            label = label.add_attribute(Attribute::Italic);
        }
        table.add_row(vec![
            Cell::new(code.links_from().join(", ")),
            label,
            value_cell(code.value()),
            Cell::new(code.description()),
            Cell::new(if code.is_missing() { "TRUE" } else { "" }),
        ]);
    }
    table
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn value_cell(value: &Value) -> Cell {
    let cell = Cell::new(value.to_string());
    match value {
        Value::Integer(_) | Value::Float(_) => cell.set_alignment(CellAlignment::Right),
        Value::Missing => cell.add_attribute(Attribute::Dim),
        _ => cell,
    }
}

impl fmt::Display for Coding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::code;
    use crate::coding::{coding, empty_coding};

    #[test]
    fn empty_coding_prints_sentinel() {
        assert_eq!(render(&empty_coding()), EMPTY_CODING_LINE);
    }

    #[test]
    fn unlabelled_header() {
        let c = coding([code("Yes", 1)]).unwrap();
        let text = c.to_string();
        assert!(text.starts_with("<Coding>\n"));
        assert!(text.contains("Yes"));
        assert!(text.contains("description"));
    }

    #[test]
    fn missing_flag_is_plain_text() {
        let c = coding([code("Yes", 1), code("Unknown", -99).with_missing(true)]).unwrap();
        let text = render(&c);
        let header = text.lines().find(|l| l.contains("description")).unwrap();
        assert!(header.contains("missing"));
        let unknown = text.lines().find(|l| l.contains("Unknown")).unwrap();
        assert!(unknown.contains("TRUE"));
        let yes = text.lines().find(|l| l.contains("Yes")).unwrap();
        assert!(!yes.contains("TRUE"));
    }

    #[test]
    fn missing_values_show_as_na() {
        let c = coding([code("Yes", 1), code("Skip", None::<i32>).with_missing(true)]).unwrap();
        let text = render(&c).lines().skip(1).collect::<Vec<_>>().join("\n");
        assert!(text.contains("NA"));
        assert!(text.contains("Skip"));
    }
}
