//! Reading tag records from exported text

use std::path::Path;

use anyhow::{bail, Context, Result};
use itertools::Itertools;

use crate::TagRecord;

/// Column name used in the tag collection exports.
pub const DEFAULT_COLUMN: &str = "tag_name";

/// Textual layout of the record input.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Format {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// One tag name per line.
    Lines,
}

impl Format {
    /// Guess format from file extension, `.txt` files are line lists and
    /// everything else is CSV.
    pub fn detect(path: impl AsRef<Path>) -> Format {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("txt") => Format::Lines,
            _ => Format::Csv,
        }
    }
}

pub fn read_records(
    text: &str,
    format: Format,
    column: &str,
) -> Result<Vec<TagRecord>> {
    let ret = match format {
        Format::Csv => read_csv(text, column)?,
        Format::Lines => read_lines(text)?,
    };
    log::debug!("read_records: {} records as {format:?}", ret.len());
    Ok(ret)
}

/// Read the tag names in `column` of a CSV table with a header row.
pub fn read_csv(text: &str, column: &str) -> Result<Vec<TagRecord>> {
    let mut rdr = csv::Reader::from_reader(text.as_bytes());

    let headers = rdr.headers()?.clone();
    // No header at all means no records.
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let Some(idx) = headers.iter().position(|h| h.trim() == column) else {
        bail!(
            "read_csv: no column {column:?} in header [{}]",
            headers.iter().join(", ")
        );
    };

    let mut ret = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        // Data rows are numbered from 1, the header isn't counted.
        let row = row.with_context(|| format!("read_csv: bad row {}", i + 1))?;
        let tag = row.get(idx).unwrap_or_default();
        ret.push(
            TagRecord::new(tag)
                .with_context(|| format!("read_csv: row {}", i + 1))?,
        );
    }

    Ok(ret)
}

/// Read one tag name per line, blank lines are skipped.
pub fn read_lines(text: &str) -> Result<Vec<TagRecord>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(TagRecord::new)
        .collect()
}
