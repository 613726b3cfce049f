//! Two-row CSV encoding of a flattened field list.
//!
//! Row 1 holds the escaped field names, row 2 the escaped values, in the
//! same order. Cells are comma-separated and every row ends with a single
//! `\n`. The delimiter is fixed.

use std::borrow::Cow;

use crate::field::TerminalField;

/// Escape a single cell.
///
/// `None` becomes an empty cell. A cell containing a comma, a double quote,
/// `\n` or `\r` is wrapped in double quotes with internal quotes doubled;
/// any other cell is returned unchanged.
pub fn escape_cell(value: Option<&str>) -> Cow<'_, str> {
    let Some(text) = value else {
        return Cow::Borrowed("");
    };
    if text.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", text.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(text)
    }
}

/// Encode one row: escaped cells joined with `,`, terminated by `\n`.
pub fn encode_row<'a, I>(cells: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut row = String::new();
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            row.push(',');
        }
        row.push_str(&escape_cell(cell));
    }
    row.push('\n');
    row
}

/// Encode ordered `(name, value)` pairs as a header row and a value row.
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let (names, values): (Vec<&str>, Vec<Option<&str>>) = pairs.into_iter().unzip();
    let mut out = encode_row(names.into_iter().map(Some));
    out.push_str(&encode_row(values));
    out
}

/// Encode collected terminal fields, names first, then values.
pub fn encode_fields(fields: &[&TerminalField]) -> String {
    encode_pairs(
        fields
            .iter()
            .map(|field| (field.name.as_str(), field.value_as_str())),
    )
}
