//! Name-to-id resolution for formats and publishers.

use crate::collection::{LookupKind, UNKNOWN_LOOKUP_ID, UNKNOWN_LOOKUP_NAME};
use crate::store::{CollectionStore, StoreResult};
use crate::types::DbId;

/// Resolve a format or publisher name to its id, creating the row if no
/// exact (case-sensitive) match exists.
///
/// Blank names resolve as `"Unknown"`. Storage failures are logged and
/// resolve to [`UNKNOWN_LOOKUP_ID`]; they never reach the caller, so a single
/// bad lookup cannot abort a bulk import.
pub async fn resolve_lookup<S>(store: &S, kind: LookupKind, name: &str) -> DbId
where
    S: CollectionStore + ?Sized,
{
    let name = normalize_lookup_name(name);
    match find_or_create(store, kind, name).await {
        Ok(id) => id,
        Err(err) => {
            tracing::warn!(
                kind = %kind,
                name,
                error = %err,
                "Lookup resolution failed, falling back to Unknown"
            );
            UNKNOWN_LOOKUP_ID
        }
    }
}

/// Trim the name and substitute `"Unknown"` for blanks.
pub fn normalize_lookup_name(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        UNKNOWN_LOOKUP_NAME
    } else {
        trimmed
    }
}

async fn find_or_create<S>(store: &S, kind: LookupKind, name: &str) -> StoreResult<DbId>
where
    S: CollectionStore + ?Sized,
{
    let existing = match kind {
        LookupKind::Format => store.find_format_by_name(name).await?,
        LookupKind::Publisher => store.find_publisher_by_name(name).await?,
    };
    if let Some(id) = existing {
        return Ok(id);
    }

    let id = match kind {
        LookupKind::Format => store.create_format(name).await?,
        LookupKind::Publisher => store.create_publisher(name).await?,
    };
    tracing::debug!(kind = %kind, name, id, "Created lookup row");
    Ok(id)
}
