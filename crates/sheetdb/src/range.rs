//! Range descriptors.
//!
//! An append echoes the range it actually wrote, e.g. `Sheet1!A5:C7`. The
//! locator reduces such a descriptor to 1-based start and end rows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Range as returned by a store: A1 notation or a bare row number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeDescriptor {
    /// Bare 1-based row number.
    Row(u64),
    /// A1 notation, optionally prefixed with a sheet name.
    A1(String),
}

impl fmt::Display for RangeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(row) => write!(f, "{row}"),
            Self::A1(text) => f.write_str(text),
        }
    }
}

impl From<u64> for RangeDescriptor {
    fn from(row: u64) -> Self {
        Self::Row(row)
    }
}

impl From<&str> for RangeDescriptor {
    fn from(text: &str) -> Self {
        Self::A1(text.to_string())
    }
}

/// 1-based row span; a side is `None` when the descriptor does not name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    /// First row.
    pub start: Option<u64>,
    /// Last row.
    pub end: Option<u64>,
}

/// Reduces a descriptor to its row span.
///
/// A bare row `n` gives `{n, n + 1}`. For A1 text, the sheet-name prefix up
/// to the last `!` is dropped, everything except digits and `:` is discarded,
/// and the remainder is split on `:`.
#[must_use]
pub fn locate(range: &RangeDescriptor) -> RowSpan {
    match range {
        RangeDescriptor::Row(row) => single_row(*row),
        RangeDescriptor::A1(text) => {
            if let Some(row) = as_row_number(text) {
                return single_row(row);
            }
            let cells = text.rsplit('!').next().unwrap_or_default();
            let digits: String = cells
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == ':')
                .collect();
            let mut sides = digits.split(':');
            RowSpan {
                start: sides.next().and_then(parse_side),
                end: sides.next().and_then(parse_side),
            }
        }
    }
}

fn single_row(row: u64) -> RowSpan {
    RowSpan {
        start: Some(row),
        end: row.checked_add(1),
    }
}

fn as_row_number(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        trimmed.parse().ok()
    } else {
        None
    }
}

fn parse_side(side: &str) -> Option<u64> {
    if side.is_empty() {
        None
    } else {
        side.parse().ok()
    }
}

#[cfg(test)]
#[path = "range_tests.rs"]
mod tests;
