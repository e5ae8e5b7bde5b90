//! Delimited-text export and import of the item catalog.
//!
//! One header line, then one line per item:
//!
//! ```text
//! id<d>title<d>contributors<d>category<d>year<d>extent<d>available
//! ```
//!
//! `<d>` is chosen by the caller and must not contain `,`, which joins the
//! contributors. Fields are written verbatim: a title or contributor
//! containing the delimiter produces a line with the wrong field count, which
//! import then skips.

use crate::error::{LibraryError, LibraryResult};
use crate::model::{Category, Item, UnknownCategory};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::warn;

/// Header line written on export and skipped on import.
pub const ITEM_CSV_HEADER: &str = "id;title;contributors;category;year;extent;available";

/// Separator placed between contributors inside the contributors field.
pub const CONTRIBUTOR_SEPARATOR: char = ',';

/// Number of fields on every data line.
const FIELD_COUNT: usize = 7;

/// Why a data line was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineError {
    /// The line did not split into the expected number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Expected field count.
        expected: usize,
        /// Actual field count.
        found: usize,
    },

    /// The year was not an integer.
    #[error("invalid year: {0:?}")]
    Year(String),

    /// The extent was not a non-negative integer.
    #[error("invalid extent: {0:?}")]
    Extent(String),

    /// The category name is not known.
    #[error("{0}")]
    Category(#[from] UnknownCategory),

    /// The availability flag was neither `true` nor `false`.
    #[error("invalid availability flag: {0:?}")]
    Available(String),

    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    Encoding,
}

/// A data line rejected during import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the file, header included.
    pub line: usize,
    /// Reason for rejection.
    pub error: LineError,
}

/// Parsed data lines, in file order.
#[derive(Debug, Default)]
pub struct ParsedCatalog {
    /// Items that parsed cleanly.
    pub items: Vec<Item>,
    /// Lines that did not.
    pub skipped: Vec<SkippedLine>,
}

fn check_delimiter(delimiter: &str) -> LibraryResult<()> {
    if delimiter.is_empty() {
        return Err(LibraryError::invalid_argument("delimiter must not be empty"));
    }
    if delimiter.contains(CONTRIBUTOR_SEPARATOR) {
        return Err(LibraryError::invalid_argument(format!(
            "delimiter must not contain the contributor separator {:?}",
            CONTRIBUTOR_SEPARATOR
        )));
    }
    Ok(())
}

fn strip_line_ending(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    raw.strip_suffix(b"\r").unwrap_or(raw)
}

/// Renders one item as a data line (no trailing newline).
pub fn format_item(item: &Item, delimiter: &str) -> String {
    let contributors = item
        .contributors()
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(&CONTRIBUTOR_SEPARATOR.to_string());

    [
        item.id().to_string(),
        item.title().to_string(),
        contributors,
        item.category().to_string(),
        item.year().to_string(),
        item.extent().to_string(),
        item.is_available().to_string(),
    ]
    .join(delimiter)
}

/// Parses one data line.
pub fn parse_line(line: &str, delimiter: &str) -> Result<Item, LineError> {
    let fields: Vec<&str> = line.split(delimiter).collect();
    if fields.len() != FIELD_COUNT {
        return Err(LineError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let year: i32 = fields[4]
        .trim()
        .parse()
        .map_err(|_| LineError::Year(fields[4].to_string()))?;
    let extent: u32 = fields[5]
        .trim()
        .parse()
        .map_err(|_| LineError::Extent(fields[5].to_string()))?;
    let category: Category = fields[3].trim().parse()?;
    let available = fields[6].trim();
    if !available.eq_ignore_ascii_case("true") && !available.eq_ignore_ascii_case("false") {
        return Err(LineError::Available(available.to_string()));
    }

    let contributors = fields[2]
        .split(CONTRIBUTOR_SEPARATOR)
        .filter(|name| !name.is_empty());

    Ok(Item::new(fields[0], fields[1], year, category)
        .with_contributors(contributors)
        .with_extent(extent))
}

/// Writes the header and one line per item. Returns the number of items written.
pub fn write_items<'a, W, I>(writer: &mut W, items: I, delimiter: &str) -> LibraryResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Item>,
{
    check_delimiter(delimiter)?;

    writeln!(writer, "{}", ITEM_CSV_HEADER)?;
    let mut written = 0;
    for item in items {
        writeln!(writer, "{}", format_item(item, delimiter))?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Reads a catalog file: skips the header and blank lines, parses the rest.
///
/// Malformed lines, including lines that are not valid UTF-8, are collected
/// in [`ParsedCatalog::skipped`]; only I/O failures and a bad delimiter are
/// errors. A first line other than [`ITEM_CSV_HEADER`] is logged and parsed
/// as data.
pub fn read_items<R: BufRead>(mut reader: R, delimiter: &str) -> LibraryResult<ParsedCatalog> {
    check_delimiter(delimiter)?;

    let mut parsed = ParsedCatalog::default();
    let mut buf = Vec::new();
    let mut number = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        number += 1;

        let Ok(line) = std::str::from_utf8(strip_line_ending(&buf)) else {
            parsed.skipped.push(SkippedLine {
                line: number,
                error: LineError::Encoding,
            });
            continue;
        };
        if number == 1 {
            if line == ITEM_CSV_HEADER {
                continue;
            }
            warn!(first_line = line, "catalog file has no header");
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line, delimiter) {
            Ok(item) => parsed.items.push(item),
            Err(error) => parsed.skipped.push(SkippedLine {
                line: number,
                error,
            }),
        }
    }
    Ok(parsed)
}
