//! Shared-collection comparison between two profiles.
//!
//! A manga is "shared" when both profiles hold at least one entry for it.
//! For each shared manga the aggregator reports what each profile owns and
//! whether their combined volumes complete the series.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::collection::OwnedEntry;
use crate::store::{CollectionStore, StoreResult};
use crate::types::DbId;

/// One profile's side of a shared manga.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileHolding {
    pub profile_id: DbId,
    pub quantity: i32,
    pub pending: Option<String>,
    pub priority: bool,
}

impl ProfileHolding {
    fn empty(profile_id: DbId) -> Self {
        Self {
            profile_id,
            quantity: 0,
            pending: None,
            priority: false,
        }
    }
}

/// A manga held by both compared profiles.
///
/// When a profile holds several entries for the manga (for example after
/// importing the same file twice), only its oldest entry is reported and
/// counted in `combined_quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedMangaView {
    pub manga_id: DbId,
    pub manga_name: String,
    pub volumes: Option<i32>,
    pub first: ProfileHolding,
    pub second: ProfileHolding,
    /// Sum of both holdings. Widened so two large quantities cannot overflow.
    pub combined_quantity: i64,
    pub is_collection_complete: bool,
}

/// A series is complete only when its volume count is known and the owned
/// quantity reaches it.
pub fn is_collection_complete(volumes: Option<i32>, quantity: i64) -> bool {
    volumes.is_some_and(|total| quantity >= i64::from(total))
}

/// Fetch both profiles' entries in one query and aggregate them.
pub async fn shared_manga<S>(
    store: &S,
    first: DbId,
    second: DbId,
) -> StoreResult<Vec<SharedMangaView>>
where
    S: CollectionStore + ?Sized,
{
    let entries = store.find_entries_by_profile_ids(first, second).await?;
    Ok(aggregate_shared(&entries, first, second))
}

/// Group entries by manga and keep those held by both profiles.
///
/// When a profile has several entries for the same manga (repeated imports),
/// its lowest-id entry represents it. Results are ordered by manga name,
/// ignoring case, then by id.
pub fn aggregate_shared(entries: &[OwnedEntry], first: DbId, second: DbId) -> Vec<SharedMangaView> {
    if first == second {
        return Vec::new();
    }

    let mut by_manga: BTreeMap<DbId, Vec<&OwnedEntry>> = BTreeMap::new();
    for entry in entries
        .iter()
        .filter(|e| e.profile_id == first || e.profile_id == second)
    {
        by_manga.entry(entry.manga_id).or_default().push(entry);
    }

    let mut shared: Vec<SharedMangaView> = by_manga
        .into_values()
        .filter(|group| {
            let has_first = group.iter().any(|e| e.profile_id == first);
            let has_second = group.iter().any(|e| e.profile_id == second);
            has_first && has_second
        })
        .map(|group| build_view(&group, first, second))
        .collect();

    shared.sort_by(|a, b| {
        a.manga_name
            .to_lowercase()
            .cmp(&b.manga_name.to_lowercase())
            .then(a.manga_id.cmp(&b.manga_id))
    });
    shared
}

fn build_view(group: &[&OwnedEntry], first: DbId, second: DbId) -> SharedMangaView {
    let sample = group[0];
    let first = holding_for(group, first);
    let second = holding_for(group, second);
    let combined_quantity = i64::from(first.quantity) + i64::from(second.quantity);

    SharedMangaView {
        manga_id: sample.manga_id,
        manga_name: sample.manga_name.clone(),
        volumes: sample.volumes,
        combined_quantity,
        is_collection_complete: is_collection_complete(sample.volumes, combined_quantity),
        first,
        second,
    }
}

fn holding_for(group: &[&OwnedEntry], profile_id: DbId) -> ProfileHolding {
    group
        .iter()
        .filter(|e| e.profile_id == profile_id)
        .min_by_key(|e| e.entry_id)
        .map(|e| ProfileHolding {
            profile_id,
            quantity: e.quantity,
            pending: e.pending.clone(),
            priority: e.priority,
        })
        .unwrap_or_else(|| ProfileHolding::empty(profile_id))
}
