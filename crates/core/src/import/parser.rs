//! Tab-separated row parsing for collection imports.
//!
//! Column order is fixed:
//!
//! ```text
//! Name  Quantity  TotalVolumes  Pending  Completed  Priority  Format  Publisher
//! ```
//!
//! Trailing columns may be missing. Malformed numeric or boolean cells fall
//! back to their defaults instead of failing the row.

use crate::collection::UNKNOWN_LOOKUP_NAME;
use crate::types::DbId;

pub const COL_NAME: usize = 0;
pub const COL_QUANTITY: usize = 1;
pub const COL_TOTAL_VOLUMES: usize = 2;
pub const COL_PENDING: usize = 3;
pub const COL_COMPLETED: usize = 4;
pub const COL_PRIORITY: usize = 5;
pub const COL_FORMAT: usize = 6;
pub const COL_PUBLISHER: usize = 7;

/// Field separator. Embedded tabs cannot be represented.
pub const FIELD_SEPARATOR: char = '\t';

/// One data row of an import file, bound to the profile being imported into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub manga_name: String,
    pub quantity: i32,
    pub total_volumes: Option<i32>,
    /// `None` when the column is missing; `Some("")` when present but empty.
    pub pending: Option<String>,
    /// Read for completeness but never persisted. Completion is derived from
    /// quantity and volume count.
    pub completed: bool,
    pub priority: bool,
    pub format_name: String,
    pub publisher_name: String,
    pub profile_id: DbId,
}

/// Parse one data row. Returns `None` when the name column is blank.
///
/// The header line must not be passed here; the coordinator skips it.
pub fn parse_row(line: &str, profile_id: DbId) -> Option<ImportRecord> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let columns: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

    let manga_name = columns.get(COL_NAME).map(|s| s.trim()).unwrap_or_default();
    if manga_name.is_empty() {
        return None;
    }

    Some(ImportRecord {
        manga_name: manga_name.to_string(),
        quantity: columns
            .get(COL_QUANTITY)
            .and_then(|s| parse_int(s))
            .map(|q| q.max(0))
            .unwrap_or(0),
        total_volumes: columns
            .get(COL_TOTAL_VOLUMES)
            .and_then(|s| parse_int(s))
            .filter(|v| *v > 0),
        pending: columns.get(COL_PENDING).map(|s| s.to_string()),
        completed: columns
            .get(COL_COMPLETED)
            .is_some_and(|s| parse_lenient_bool(s)),
        priority: columns
            .get(COL_PRIORITY)
            .is_some_and(|s| parse_lenient_bool(s)),
        format_name: lookup_column(&columns, COL_FORMAT),
        publisher_name: lookup_column(&columns, COL_PUBLISHER),
        profile_id,
    })
}

/// Parse a boolean cell. Anything not recognised is `false`.
///
/// Accepts `true`/`false` in any case, plus the spreadsheet-style markers
/// `1`, `yes`, `y` and `x`.
pub fn parse_lenient_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y" | "x"
    )
}

fn parse_int(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok()
}

fn lookup_column(columns: &[&str], index: usize) -> String {
    columns
        .get(index)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| UNKNOWN_LOOKUP_NAME.to_string())
}
