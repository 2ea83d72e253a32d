//! Column layout for tabular output.
//!
//! Widths are measured on display columns with ANSI codes ignored, so cells
//! that arrive already styled line up with plain ones. Rows must all have the
//! same number of cells; a ragged table is rejected with
//! [`UiError::MalformedTable`] rather than patched.

use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

use crate::error::{Result, UiError};
use crate::format::{display_width, pad_to};

/// Check that every row has as many cells as the first one.
///
/// Returns the column count (0 for an empty table).
fn column_count<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<usize> {
    let Some(first) = rows.first() else {
        return Ok(0);
    };
    let expected = first.len();
    for (i, row) in rows.iter().enumerate() {
        if row.len() != expected {
            return Err(UiError::malformed_table(i, expected, row.len()));
        }
    }
    Ok(expected)
}

/// Width of each of the first `columns` columns: widest cell plus `padding`.
fn column_widths<S: AsRef<str>>(rows: &[Vec<S>], columns: usize, padding: usize) -> Vec<usize> {
    (0..columns)
        .map(|col| {
            rows.iter()
                .map(|row| display_width(row[col].as_ref()))
                .max()
                .unwrap_or(0)
                + padding
        })
        .collect()
}

/// Lay out `rows` as aligned columns.
///
/// Every column but the last is padded to its widest cell plus `padding`;
/// the last column is written as-is. Each line starts with `prefix` and ends
/// with `\n`.
///
/// # Example
///
/// ```
/// use clidisplay::layout;
///
/// let rows = vec![
///     vec!["name", "state"],
///     vec!["dora", "started"],
/// ];
/// let text = layout("", &rows, 2).unwrap();
/// assert_eq!(text, "name  state\ndora  started\n");
/// ```
pub fn layout<S: AsRef<str>>(prefix: &str, rows: &[Vec<S>], padding: usize) -> Result<String> {
    let columns = column_count(rows)?;
    let widths = column_widths(rows, columns.saturating_sub(1), padding);

    let mut out = String::new();
    for row in rows {
        out.push_str(prefix);
        for (cell, width) in row.iter().zip(&widths) {
            out.push_str(&pad_to(cell.as_ref(), *width));
        }
        if let Some(last) = row.last() {
            out.push_str(last.as_ref());
        }
        out.push('\n');
    }
    Ok(out)
}

/// Split `text` into lines no wider than `budget`, breaking at spaces.
///
/// Line breaks already in `text` are kept. A word wider than `budget`
/// occupies a line of its own, unbroken. Empty text yields a single empty
/// line.
pub fn wrap_words(text: &str, budget: usize) -> Vec<String> {
    let options = Options::new(budget)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit);

    text.split('\n')
        .flat_map(|part| {
            let part = part.strip_suffix('\r').unwrap_or(part);
            if part.trim().is_empty() {
                return vec![String::new()];
            }
            textwrap::wrap(part, &options)
                .into_iter()
                .map(|line| line.into_owned())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Lay out `rows` with the last column reflowed to fit `width`.
///
/// `width` is the full line width. The last column gets whatever remains
/// after the prefix and the leading columns. Continuation lines are indented
/// with blanks the width of the prefix plus the leading columns, so wrapped
/// text stays under the first line of its cell.
///
/// Tables with fewer than two columns have nothing to reflow against and are
/// laid out with [`layout`].
pub fn layout_wrapped<S: AsRef<str>>(
    prefix: &str,
    rows: &[Vec<S>],
    padding: usize,
    width: usize,
) -> Result<String> {
    let columns = column_count(rows)?;
    if columns < 2 {
        return layout(prefix, rows, padding);
    }

    let widths = column_widths(rows, columns - 1, padding);
    let spillover = display_width(prefix) + widths.iter().sum::<usize>();
    let budget = width.saturating_sub(spillover);
    let indent = " ".repeat(spillover);

    let mut out = String::new();
    for row in rows {
        out.push_str(prefix);
        for (cell, col_width) in row.iter().zip(&widths) {
            out.push_str(&pad_to(cell.as_ref(), *col_width));
        }

        let last = row[columns - 1].as_ref();
        for (i, line) in wrap_words(last, budget).iter().enumerate() {
            if i > 0 {
                out.push('\n');
                out.push_str(&indent);
            }
            out.push_str(line);
        }
        out.push('\n');
    }
    Ok(out)
}
