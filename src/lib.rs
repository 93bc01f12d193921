use std::{cmp::Reverse, fmt};

use anyhow::{bail, Result};
use derive_more::Deref;
use indexmap::IndexMap;
use itertools::Itertools;

pub mod read;
pub use read::{read_csv, read_lines, read_records, Format, DEFAULT_COLUMN};

/// A single tag assignment.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TagRecord {
    tag_name: String,
}

impl TagRecord {
    /// Create a record, tag name must not be blank.
    pub fn new(tag_name: impl Into<String>) -> Result<Self> {
        let tag_name = tag_name.into();
        if tag_name.trim().is_empty() {
            bail!("empty tag name");
        }
        Ok(TagRecord { tag_name })
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }
}

/// Occurrence counts per tag name, in the order the names were first seen.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deref)]
pub struct TagCounts(IndexMap<String, usize>);

impl TagCounts {
    /// Consume into a histogram sorted by descending count.
    ///
    /// The sort is stable, so tags with equal counts stay in first-seen
    /// order.
    pub fn ranked(self) -> Vec<(String, usize)> {
        self.0
            .into_iter()
            .sorted_by_key(|(_, n)| Reverse(*n))
            .collect()
    }
}

impl<'a> FromIterator<&'a TagRecord> for TagCounts {
    fn from_iter<T: IntoIterator<Item = &'a TagRecord>>(iter: T) -> Self {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for r in iter {
            *counts.entry(r.tag_name.clone()).or_default() += 1;
        }
        TagCounts(counts)
    }
}

pub fn count_all(records: &[TagRecord]) -> usize {
    records.len()
}

/// Count records whose tag name is exactly `name`. Case-sensitive.
pub fn count_by_name(records: &[TagRecord], name: &str) -> usize {
    records.iter().filter(|r| r.tag_name == name).count()
}

pub fn tag_counts(records: &[TagRecord]) -> TagCounts {
    records.iter().collect()
}

/// The `n` most frequent tags with their counts, most frequent first.
///
/// Ties are broken by first-seen order in `records`.
pub fn top_n(records: &[TagRecord], n: usize) -> Vec<(String, usize)> {
    if n == 0 {
        return Vec::new();
    }

    let mut ret = tag_counts(records).ranked();
    ret.truncate(n);
    log::debug!("top_n: {} of {} records", ret.len(), records.len());
    ret
}

/// Results of the total count, single tag count and top-N queries.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    pub total: usize,
    pub tag_name: String,
    pub tag_count: usize,
    pub top: Vec<(String, usize)>,
}

impl Report {
    pub fn new(records: &[TagRecord], tag_name: &str, n: usize) -> Self {
        Report {
            total: count_all(records),
            tag_name: tag_name.to_owned(),
            tag_count: count_by_name(records, tag_name),
            top: top_n(records, n),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tags count: {}", self.total)?;
        writeln!(f, "{} tags count: {}", self.tag_name, self.tag_count)?;
        writeln!(f, "top {} tags:", self.top.len())?;
        for (tag, n) in &self.top {
            writeln!(f, "{tag:32} {n}")?;
        }
        Ok(())
    }
}
