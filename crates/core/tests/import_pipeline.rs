//! End-to-end tests for the TSV import coordinator and the shared-collection
//! query, run against an in-memory `CollectionStore`.

use std::sync::Mutex;

use assert_matches::assert_matches;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use tankobon_core::collection::{
    EntryRecord, MangaRecord, NewEntry, NewManga, OwnedEntry, UNKNOWN_LOOKUP_ID,
};
use tankobon_core::import::{import_file, ImportError};
use tankobon_core::shared::shared_manga;
use tankobon_core::store::{CollectionStore, StoreResult};
use tankobon_core::types::DbId;

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Tables {
    mangas: Vec<MangaRecord>,
    formats: Vec<(DbId, String)>,
    publishers: Vec<(DbId, String)>,
    entries: Vec<EntryRecord>,
}

/// Mirrors the seeded database: id 1 is "Unknown" in both lookup tables.
struct MemoryStore {
    tables: Mutex<Tables>,
    fail_format_create: bool,
    fail_entry_create_after: Option<usize>,
}

impl MemoryStore {
    fn new() -> Self {
        let tables = Tables {
            formats: vec![(1, "Unknown".to_string())],
            publishers: vec![(1, "Unknown".to_string())],
            ..Tables::default()
        };
        Self {
            tables: Mutex::new(tables),
            fail_format_create: false,
            fail_entry_create_after: None,
        }
    }

    fn mangas(&self) -> Vec<MangaRecord> {
        self.tables.lock().unwrap().mangas.clone()
    }

    fn entries(&self) -> Vec<EntryRecord> {
        self.tables.lock().unwrap().entries.clone()
    }

    fn formats(&self) -> Vec<(DbId, String)> {
        self.tables.lock().unwrap().formats.clone()
    }

    fn insert_manga(&self, name: &str, volumes: Option<i32>) -> DbId {
        let mut t = self.tables.lock().unwrap();
        let id = t.mangas.len() as DbId + 1;
        t.mangas.push(MangaRecord {
            id,
            name: name.to_string(),
            volumes,
            format_id: 1,
            publisher_id: 1,
        });
        id
    }

    fn insert_entry(&self, manga_id: DbId, profile_id: DbId, quantity: i32) {
        let mut t = self.tables.lock().unwrap();
        let id = t.entries.len() as DbId + 1;
        t.entries.push(EntryRecord {
            id,
            manga_id,
            profile_id,
            quantity,
            pending: None,
            priority: false,
        });
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn find_manga_by_name_case_insensitive(
        &self,
        name: &str,
    ) -> StoreResult<Option<MangaRecord>> {
        let t = self.tables.lock().unwrap();
        let needle = name.to_lowercase();
        Ok(t.mangas
            .iter()
            .find(|m| m.name.to_lowercase() == needle)
            .cloned())
    }

    async fn create_manga(&self, input: &NewManga) -> StoreResult<MangaRecord> {
        // Same rule as the `manga.volumes` CHECK constraint.
        if input.volumes.is_some_and(|v| v <= 0) {
            return Err("volumes must be positive".into());
        }
        let mut t = self.tables.lock().unwrap();
        let manga = MangaRecord {
            id: t.mangas.len() as DbId + 1,
            name: input.name.clone(),
            volumes: input.volumes,
            format_id: input.format_id,
            publisher_id: input.publisher_id,
        };
        t.mangas.push(manga.clone());
        Ok(manga)
    }

    async fn update_manga_lookups(
        &self,
        id: DbId,
        format_id: DbId,
        publisher_id: DbId,
    ) -> StoreResult<()> {
        let mut t = self.tables.lock().unwrap();
        let manga = t
            .mangas
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or("manga not found")?;
        manga.format_id = format_id;
        manga.publisher_id = publisher_id;
        Ok(())
    }

    async fn find_format_by_name(&self, name: &str) -> StoreResult<Option<DbId>> {
        let t = self.tables.lock().unwrap();
        Ok(t.formats.iter().find(|(_, n)| n == name).map(|(id, _)| *id))
    }

    async fn create_format(&self, name: &str) -> StoreResult<DbId> {
        if self.fail_format_create {
            return Err("connection reset".into());
        }
        let mut t = self.tables.lock().unwrap();
        let id = t.formats.len() as DbId + 1;
        t.formats.push((id, name.to_string()));
        Ok(id)
    }

    async fn find_publisher_by_name(&self, name: &str) -> StoreResult<Option<DbId>> {
        let t = self.tables.lock().unwrap();
        Ok(t.publishers.iter().find(|(_, n)| n == name).map(|(id, _)| *id))
    }

    async fn create_publisher(&self, name: &str) -> StoreResult<DbId> {
        let mut t = self.tables.lock().unwrap();
        let id = t.publishers.len() as DbId + 1;
        t.publishers.push((id, name.to_string()));
        Ok(id)
    }

    async fn create_entry(&self, input: &NewEntry) -> StoreResult<EntryRecord> {
        let mut t = self.tables.lock().unwrap();
        if self
            .fail_entry_create_after
            .is_some_and(|limit| t.entries.len() >= limit)
        {
            return Err("disk full".into());
        }
        let entry = EntryRecord {
            id: t.entries.len() as DbId + 1,
            manga_id: input.manga_id,
            profile_id: input.profile_id,
            quantity: input.quantity,
            pending: input.pending.clone(),
            priority: input.priority,
        };
        t.entries.push(entry.clone());
        Ok(entry)
    }

    async fn find_entries_by_profile_ids(
        &self,
        first: DbId,
        second: DbId,
    ) -> StoreResult<Vec<OwnedEntry>> {
        let t = self.tables.lock().unwrap();
        let owned = t
            .entries
            .iter()
            .filter(|e| e.profile_id == first || e.profile_id == second)
            .map(|e| {
                let manga = t
                    .mangas
                    .iter()
                    .find(|m| m.id == e.manga_id)
                    .expect("entry references a missing manga");
                OwnedEntry {
                    entry_id: e.id,
                    manga_id: e.manga_id,
                    manga_name: manga.name.clone(),
                    volumes: manga.volumes,
                    profile_id: e.profile_id,
                    quantity: e.quantity,
                    pending: e.pending.clone(),
                    priority: e.priority,
                }
            })
            .collect();
        Ok(owned)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const HEADER: &str = "Name\tQuantity\tTotalVolumes\tPending\tCompleted\tPriority\tFormat\tPublisher";

fn lines(rows: &[&str]) -> impl futures::Stream<Item = std::io::Result<String>> {
    let all: Vec<std::io::Result<String>> = std::iter::once(HEADER)
        .chain(rows.iter().copied())
        .map(|l| Ok(l.to_string()))
        .collect();
    futures::stream::iter(all)
}

async fn run(store: &MemoryStore, rows: &[&str], profile_id: DbId) -> Result<u64, ImportError> {
    let summary = import_file(
        store,
        "collection.tsv",
        lines(rows),
        profile_id,
        &CancellationToken::new(),
    )
    .await?;
    Ok(summary.entries_created)
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[tokio::test]
async fn imports_rows_after_header() {
    let store = MemoryStore::new();
    let created = run(
        &store,
        &[
            "Berserk\t12\t41\t\tfalse\ttrue\tTankobon\tDark Horse",
            "Monster\t9\t9\t\ttrue\tfalse\tKanzenban\tViz",
        ],
        1,
    )
    .await
    .unwrap();

    assert_eq!(created, 2);
    let mangas = store.mangas();
    assert_eq!(mangas.len(), 2);
    assert_eq!(mangas[0].name, "Berserk");
    assert_eq!(mangas[0].volumes, Some(41));

    let entries = store.entries();
    assert_eq!(entries[0].quantity, 12);
    assert!(entries[0].priority);
    assert_eq!(entries[0].pending.as_deref(), Some(""));
    assert_eq!(entries[1].manga_id, mangas[1].id);
}

#[tokio::test]
async fn header_only_file_imports_nothing() {
    let store = MemoryStore::new();
    assert_eq!(run(&store, &[], 1).await.unwrap(), 0);
    assert!(store.mangas().is_empty());
}

#[tokio::test]
async fn blank_name_rows_have_no_side_effects() {
    let store = MemoryStore::new();
    let summary = import_file(
        &store,
        "collection.tsv",
        lines(&["\t4\t10\t\t\t\tOmnibus\tSeven Seas", "   \t1"]),
        1,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(summary.rows_skipped, 2);
    assert_eq!(summary.entries_created, 0);
    assert!(store.mangas().is_empty());
    assert!(store.entries().is_empty());
    assert_eq!(store.formats().len(), 1, "no format created for skipped row");
}

#[tokio::test]
async fn unparseable_quantity_becomes_zero() {
    let store = MemoryStore::new();
    run(&store, &["Akira\tsix\t6"], 1).await.unwrap();
    assert_eq!(store.entries()[0].quantity, 0);
}

#[tokio::test]
async fn unparseable_volumes_stay_unknown() {
    let store = MemoryStore::new();
    run(&store, &["Akira\t2\tn/a", "Dorohedoro\t3"], 1).await.unwrap();
    let mangas = store.mangas();
    assert_eq!(mangas[0].volumes, None);
    assert_eq!(mangas[1].volumes, None);
}

#[tokio::test]
async fn non_positive_volumes_do_not_abort_import() {
    let store = MemoryStore::new();
    let created = run(
        &store,
        &["Akira\t2\t6", "Berserk\t3\t0", "Pluto\t1\t-8", "Monster\t1\t18"],
        1,
    )
    .await
    .unwrap();

    assert_eq!(created, 4);
    let mangas = store.mangas();
    assert_eq!(mangas[1].volumes, None);
    assert_eq!(mangas[2].volumes, None);
    assert_eq!(mangas[3].volumes, Some(18));
}

#[tokio::test]
async fn reimport_duplicates_entries() {
    let store = MemoryStore::new();
    let rows = ["Berserk\t12\t41", "Monster\t9\t9"];
    run(&store, &rows, 1).await.unwrap();
    run(&store, &rows, 1).await.unwrap();

    assert_eq!(store.mangas().len(), 2, "manga are reused");
    let entries = store.entries();
    assert_eq!(entries.len(), 4, "entries are not deduplicated");
    for manga in store.mangas() {
        let count = entries.iter().filter(|e| e.manga_id == manga.id).count();
        assert_eq!(count, 2, "manga: {}", manga.name);
    }
}

#[tokio::test]
async fn manga_matched_ignoring_case() {
    let store = MemoryStore::new();
    let existing = store.insert_manga("One Piece", Some(107));

    run(&store, &["one piece\t100"], 1).await.unwrap();

    assert_eq!(store.mangas().len(), 1);
    assert_eq!(store.entries()[0].manga_id, existing);
}

#[tokio::test]
async fn existing_manga_lookups_reassigned_by_later_import() {
    let store = MemoryStore::new();
    run(&store, &["Vagabond\t10\t37\t\t\t\tTankobon\tViz"], 1)
        .await
        .unwrap();
    let summary = import_file(
        &store,
        "again.tsv",
        lines(&["VAGABOND\t10\t37\t\t\t\tVizbig\tViz"]),
        2,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(summary.mangas_updated, 1);
    let mangas = store.mangas();
    assert_eq!(mangas.len(), 1);
    let vizbig = store
        .formats()
        .into_iter()
        .find(|(_, n)| n == "Vizbig")
        .map(|(id, _)| id)
        .unwrap();
    assert_eq!(mangas[0].format_id, vizbig);
}

#[tokio::test]
async fn unchanged_lookups_do_not_update_manga() {
    let store = MemoryStore::new();
    let rows = ["Vagabond\t10\t37\t\t\t\tTankobon\tViz"];
    run(&store, &rows, 1).await.unwrap();
    let summary = import_file(&store, "a.tsv", lines(&rows), 2, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(summary.mangas_updated, 0);
    assert_eq!(summary.mangas_created, 0);
}

#[tokio::test]
async fn same_format_name_creates_one_format() {
    let store = MemoryStore::new();
    run(
        &store,
        &[
            "Berserk\t1\t41\t\t\t\tDeluxe\tDark Horse",
            "Akira\t1\t6\t\t\t\tDeluxe\tKodansha",
        ],
        1,
    )
    .await
    .unwrap();

    let deluxe: Vec<_> = store
        .formats()
        .into_iter()
        .filter(|(_, n)| n == "Deluxe")
        .collect();
    assert_eq!(deluxe.len(), 1);
    let mangas = store.mangas();
    assert!(mangas.iter().all(|m| m.format_id == deluxe[0].0));
}

#[tokio::test]
async fn format_lookup_is_case_sensitive() {
    let store = MemoryStore::new();
    run(
        &store,
        &["Berserk\t1\t\t\t\t\tDeluxe", "Akira\t1\t\t\t\t\tdeluxe"],
        1,
    )
    .await
    .unwrap();
    assert_eq!(store.formats().len(), 3);
}

#[tokio::test]
async fn missing_lookup_columns_use_unknown() {
    let store = MemoryStore::new();
    run(&store, &["Akira\t1\t6", "Monster\t1\t9\t\t\t\t  \t"], 1)
        .await
        .unwrap();
    for manga in store.mangas() {
        assert_eq!(manga.format_id, UNKNOWN_LOOKUP_ID);
        assert_eq!(manga.publisher_id, UNKNOWN_LOOKUP_ID);
    }
    assert_eq!(store.formats().len(), 1);
}

#[tokio::test]
async fn failed_format_creation_falls_back_to_unknown() {
    let mut store = MemoryStore::new();
    store.fail_format_create = true;

    run(&store, &["Akira\t1\t6\t\t\t\tDeluxe\tKodansha"], 1)
        .await
        .unwrap();

    let mangas = store.mangas();
    assert_eq!(mangas.len(), 1);
    assert_eq!(mangas[0].format_id, UNKNOWN_LOOKUP_ID);
    assert_ne!(mangas[0].publisher_id, UNKNOWN_LOOKUP_ID);
}

#[tokio::test]
async fn invalid_extension_rejected_before_reading() {
    let store = MemoryStore::new();
    let result = import_file(
        &store,
        "collection.csv",
        lines(&["Akira\t1"]),
        1,
        &CancellationToken::new(),
    )
    .await;

    assert_matches!(result, Err(ImportError::InvalidFileType(name)) if name == "collection.csv");
    assert!(store.mangas().is_empty());
}

#[tokio::test]
async fn storage_failure_aborts_and_keeps_earlier_rows() {
    let mut store = MemoryStore::new();
    store.fail_entry_create_after = Some(1);

    let result = run(&store, &["Akira\t1", "Monster\t2", "Pluto\t3"], 1).await;

    assert_matches!(result, Err(ImportError::Storage(_)));
    assert_eq!(store.entries().len(), 1, "first row stays committed");
    assert_eq!(store.mangas().len(), 2, "second manga was written before the entry failed");
}

#[tokio::test]
async fn read_error_aborts_import() {
    let store = MemoryStore::new();
    let stream = futures::stream::iter(vec![
        Ok(HEADER.to_string()),
        Ok("Akira\t1".to_string()),
        Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated")),
        Ok("Monster\t2".to_string()),
    ]);

    let result = import_file(&store, "c.tsv", stream, 1, &CancellationToken::new()).await;
    assert_matches!(result, Err(ImportError::Read(_)));
    assert_eq!(store.entries().len(), 1);
}

#[tokio::test]
async fn cancelled_import_stops_at_row_boundary() {
    let store = MemoryStore::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = import_file(&store, "c.tsv", lines(&["Akira\t1"]), 1, &cancel).await;
    assert_matches!(result, Err(ImportError::Cancelled { entries_created: 0 }));
    assert!(store.entries().is_empty());
}

// ---------------------------------------------------------------------------
// Shared manga
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shared_manga_requires_both_profiles() {
    let store = MemoryStore::new();
    let first = store.insert_manga("Berserk", None);
    let second = store.insert_manga("Akira", None);
    store.insert_entry(first, 1, 5);
    store.insert_entry(first, 2, 3);
    store.insert_entry(second, 2, 10);

    let shared = shared_manga(&store, 1, 2).await.unwrap();

    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].manga_id, first);
    assert_eq!(shared[0].combined_quantity, 8);
    assert!(!shared[0].is_collection_complete);
}

#[tokio::test]
async fn shared_manga_completion_flag() {
    let store = MemoryStore::new();
    let complete = store.insert_manga("Akira", Some(10));
    let partial = store.insert_manga("Berserk", Some(10));
    let unknown = store.insert_manga("Chainsaw Man", None);
    store.insert_entry(complete, 1, 4);
    store.insert_entry(complete, 2, 6);
    store.insert_entry(partial, 1, 4);
    store.insert_entry(partial, 2, 5);
    store.insert_entry(unknown, 1, 50);
    store.insert_entry(unknown, 2, 50);

    let shared = shared_manga(&store, 1, 2).await.unwrap();
    let flags: Vec<_> = shared
        .iter()
        .map(|v| (v.manga_name.as_str(), v.is_collection_complete))
        .collect();

    assert_eq!(
        flags,
        vec![("Akira", true), ("Berserk", false), ("Chainsaw Man", false)]
    );
}

#[tokio::test]
async fn imported_collections_can_be_compared() {
    let store = MemoryStore::new();
    run(&store, &["Berserk\t5\t10", "Akira\t6\t6"], 1)
        .await
        .unwrap();
    run(&store, &["BERSERK\t5", "Pluto\t8\t8"], 2).await.unwrap();

    let shared = shared_manga(&store, 1, 2).await.unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].manga_name, "Berserk");
    assert_eq!(shared[0].combined_quantity, 10);
    assert!(shared[0].is_collection_complete);
}
