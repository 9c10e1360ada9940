//! The persistence seam used by the import pipeline and the aggregator.

use async_trait::async_trait;

use crate::collection::{EntryRecord, MangaRecord, NewEntry, NewManga, OwnedEntry};
use crate::types::DbId;

/// Errors surfaced by a [`CollectionStore`] implementation.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operations the collection logic depends on.
///
/// Implementations assign identifiers on create. Each call is an independent
/// statement; nothing here opens a transaction.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// First manga (lowest id) whose name matches ignoring case.
    async fn find_manga_by_name_case_insensitive(
        &self,
        name: &str,
    ) -> StoreResult<Option<MangaRecord>>;

    async fn create_manga(&self, input: &NewManga) -> StoreResult<MangaRecord>;

    /// Reassign a manga's format and publisher.
    async fn update_manga_lookups(
        &self,
        id: DbId,
        format_id: DbId,
        publisher_id: DbId,
    ) -> StoreResult<()>;

    /// Exact, case-sensitive name match.
    async fn find_format_by_name(&self, name: &str) -> StoreResult<Option<DbId>>;

    async fn create_format(&self, name: &str) -> StoreResult<DbId>;

    /// Exact, case-sensitive name match.
    async fn find_publisher_by_name(&self, name: &str) -> StoreResult<Option<DbId>>;

    async fn create_publisher(&self, name: &str) -> StoreResult<DbId>;

    async fn create_entry(&self, input: &NewEntry) -> StoreResult<EntryRecord>;

    /// All entries held by either profile, joined with their manga.
    async fn find_entries_by_profile_ids(
        &self,
        first: DbId,
        second: DbId,
    ) -> StoreResult<Vec<OwnedEntry>>;
}
