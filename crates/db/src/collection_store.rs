//! PostgreSQL implementation of the collection store used by imports and
//! the shared-collection query.

use async_trait::async_trait;
use sqlx::PgPool;
use tankobon_core::collection::{EntryRecord, MangaRecord, NewEntry, NewManga, OwnedEntry};
use tankobon_core::store::{CollectionStore, StoreResult};
use tankobon_core::types::DbId;

use crate::models::entry::CreateEntry;
use crate::models::format::CreateFormat;
use crate::models::manga::CreateManga;
use crate::models::publisher::CreatePublisher;
use crate::repositories::{EntryRepo, FormatRepo, MangaRepo, PublisherRepo};

/// Adapts the repositories to [`CollectionStore`]. Every call runs as its own
/// statement on the pool; no transaction spans an import.
#[derive(Clone)]
pub struct PgCollectionStore {
    pool: PgPool,
}

impl PgCollectionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore for PgCollectionStore {
    async fn find_manga_by_name_case_insensitive(
        &self,
        name: &str,
    ) -> StoreResult<Option<MangaRecord>> {
        let manga = MangaRepo::find_by_name_case_insensitive(&self.pool, name).await?;
        Ok(manga.map(MangaRecord::from))
    }

    async fn create_manga(&self, input: &NewManga) -> StoreResult<MangaRecord> {
        let manga = MangaRepo::create(
            &self.pool,
            &CreateManga {
                name: input.name.clone(),
                volumes: input.volumes,
                format_id: Some(input.format_id),
                publisher_id: Some(input.publisher_id),
            },
        )
        .await?;
        Ok(manga.into())
    }

    async fn update_manga_lookups(
        &self,
        id: DbId,
        format_id: DbId,
        publisher_id: DbId,
    ) -> StoreResult<()> {
        if !MangaRepo::update_lookups(&self.pool, id, format_id, publisher_id).await? {
            return Err(format!("manga {id} disappeared during import").into());
        }
        Ok(())
    }

    async fn find_format_by_name(&self, name: &str) -> StoreResult<Option<DbId>> {
        let format = FormatRepo::find_by_name(&self.pool, name).await?;
        Ok(format.map(|f| f.id))
    }

    async fn create_format(&self, name: &str) -> StoreResult<DbId> {
        let input = CreateFormat {
            name: name.to_string(),
        };
        Ok(FormatRepo::create(&self.pool, &input).await?.id)
    }

    async fn find_publisher_by_name(&self, name: &str) -> StoreResult<Option<DbId>> {
        let publisher = PublisherRepo::find_by_name(&self.pool, name).await?;
        Ok(publisher.map(|p| p.id))
    }

    async fn create_publisher(&self, name: &str) -> StoreResult<DbId> {
        let input = CreatePublisher {
            name: name.to_string(),
        };
        Ok(PublisherRepo::create(&self.pool, &input).await?.id)
    }

    async fn create_entry(&self, input: &NewEntry) -> StoreResult<EntryRecord> {
        let entry = EntryRepo::create(
            &self.pool,
            &CreateEntry {
                manga_id: input.manga_id,
                profile_id: input.profile_id,
                quantity: Some(input.quantity),
                pending: input.pending.clone(),
                priority: Some(input.priority),
            },
        )
        .await?;
        Ok(entry.into())
    }

    async fn find_entries_by_profile_ids(
        &self,
        first: DbId,
        second: DbId,
    ) -> StoreResult<Vec<OwnedEntry>> {
        let rows = EntryRepo::find_by_profile_ids(&self.pool, first, second).await?;
        Ok(rows.into_iter().map(OwnedEntry::from).collect())
    }
}
