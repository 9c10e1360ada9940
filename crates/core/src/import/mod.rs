//! Bulk import of a collection from a tab-separated file.
//!
//! The coordinator walks the file line by line: the header row is skipped,
//! each data row is parsed ([`parser`]), its format and publisher are
//! resolved ([`resolver`]), the manga is matched by name or created, and a
//! new entry is written for the target profile.
//!
//! Rows are processed strictly in order because later rows may match manga
//! created by earlier ones. There is no wrapping transaction: when a manga
//! or entry write fails the import stops and everything already written
//! stays persisted.

pub mod parser;
pub mod resolver;

use std::path::Path;
use std::pin::pin;

use futures::{Stream, StreamExt};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::collection::{LookupKind, NewEntry, NewManga};
use crate::store::{CollectionStore, StoreError};
use crate::types::DbId;

pub use parser::{parse_lenient_bool, parse_row, ImportRecord};
pub use resolver::{normalize_lookup_name, resolve_lookup};

/// The only accepted file extension (compared case-insensitively).
pub const IMPORT_FILE_EXTENSION: &str = "tsv";

/// Number of leading header rows ignored by the importer.
pub const HEADER_ROWS: usize = 1;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures that abort an import.
///
/// Malformed cells and failed format/publisher lookups are not errors; they
/// degrade to defaults and the import continues.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Invalid file type '{0}': only .tsv files can be imported")]
    InvalidFileType(String),

    #[error("Failed to read import file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Storage error during import: {0}")]
    Storage(#[source] StoreError),

    #[error("Import cancelled after {entries_created} entries")]
    Cancelled { entries_created: u64 },
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Counters reported by a completed import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub entries_created: u64,
    pub mangas_created: u64,
    pub mangas_updated: u64,
    pub rows_skipped: u64,
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Reject anything that is not a `.tsv` file.
pub fn validate_file_name(file_name: &str) -> Result<(), ImportError> {
    let is_tsv = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(IMPORT_FILE_EXTENSION));

    if is_tsv {
        Ok(())
    } else {
        Err(ImportError::InvalidFileType(file_name.to_string()))
    }
}

/// Validate the file name, then import every data row into `profile_id`.
///
/// Nothing is read from `lines` when the extension is rejected.
pub async fn import_file<S, L>(
    store: &S,
    file_name: &str,
    lines: L,
    profile_id: DbId,
    cancel: &CancellationToken,
) -> Result<ImportSummary, ImportError>
where
    S: CollectionStore + ?Sized,
    L: Stream<Item = std::io::Result<String>>,
{
    validate_file_name(file_name)?;
    import_lines(store, lines, profile_id, cancel).await
}

/// Import an already-validated line stream. The first line is the header.
///
/// Cancellation is observed between rows; rows written before it stay.
pub async fn import_lines<S, L>(
    store: &S,
    lines: L,
    profile_id: DbId,
    cancel: &CancellationToken,
) -> Result<ImportSummary, ImportError>
where
    S: CollectionStore + ?Sized,
    L: Stream<Item = std::io::Result<String>>,
{
    let mut lines = pin!(lines);
    let mut summary = ImportSummary::default();
    let mut row_index: usize = 0;

    loop {
        if cancel.is_cancelled() {
            tracing::info!(
                profile_id,
                entries_created = summary.entries_created,
                "Import cancelled"
            );
            return Err(ImportError::Cancelled {
                entries_created: summary.entries_created,
            });
        }

        let Some(line) = lines.next().await else {
            break;
        };
        let line = line.map_err(ImportError::Read)?;

        let index = row_index;
        row_index += 1;
        if index < HEADER_ROWS {
            continue;
        }

        let Some(record) = parse_row(&line, profile_id) else {
            summary.rows_skipped += 1;
            continue;
        };

        import_record(store, &record, &mut summary).await?;
    }

    tracing::info!(
        profile_id,
        entries_created = summary.entries_created,
        mangas_created = summary.mangas_created,
        mangas_updated = summary.mangas_updated,
        rows_skipped = summary.rows_skipped,
        "Import completed"
    );
    Ok(summary)
}

/// Write one parsed row: resolve lookups, match or create the manga, then
/// always create a fresh entry.
async fn import_record<S>(
    store: &S,
    record: &ImportRecord,
    summary: &mut ImportSummary,
) -> Result<(), ImportError>
where
    S: CollectionStore + ?Sized,
{
    let format_id = resolve_lookup(store, LookupKind::Format, &record.format_name).await;
    let publisher_id = resolve_lookup(store, LookupKind::Publisher, &record.publisher_name).await;

    let existing = store
        .find_manga_by_name_case_insensitive(&record.manga_name)
        .await
        .map_err(ImportError::Storage)?;

    let manga_id = match existing {
        Some(manga) => {
            // Last import wins for format/publisher.
            if manga.format_id != format_id || manga.publisher_id != publisher_id {
                store
                    .update_manga_lookups(manga.id, format_id, publisher_id)
                    .await
                    .map_err(ImportError::Storage)?;
                summary.mangas_updated += 1;
            }
            manga.id
        }
        None => {
            let created = store
                .create_manga(&NewManga {
                    name: record.manga_name.clone(),
                    volumes: record.total_volumes,
                    format_id,
                    publisher_id,
                })
                .await
                .map_err(ImportError::Storage)?;
            summary.mangas_created += 1;
            created.id
        }
    };

    // Entries are never matched against existing ones: re-importing a file
    // adds another entry per row.
    store
        .create_entry(&NewEntry {
            manga_id,
            profile_id: record.profile_id,
            quantity: record.quantity,
            pending: record.pending.clone(),
            priority: record.priority,
        })
        .await
        .map_err(ImportError::Storage)?;
    summary.entries_created += 1;

    Ok(())
}
