//! Handlers for the `/profiles` resource.
//!
//! Deleting a profile deactivates it; the row and its entries are kept.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tankobon_core::collection::validate_name;
use tankobon_core::error::CoreError;
use tankobon_core::types::DbId;
use tankobon_db::models::entry::EntryWithManga;
use tankobon_db::models::profile::{CreateProfile, Profile, UpdateProfile};
use tankobon_db::repositories::{EntryRepo, ProfileRepo};
use tankobon_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// An entry in a profile's collection with its derived completion flag.
#[derive(Debug, Serialize)]
pub struct ProfileEntry {
    #[serde(flatten)]
    pub entry: EntryWithManga,
    pub is_complete: bool,
}

/// Load an active profile or fail with 404.
pub(crate) async fn ensure_active_profile(pool: &DbPool, id: DbId) -> AppResult<Profile> {
    ProfileRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))
}

/// POST /api/v1/profiles
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProfile>,
) -> AppResult<(StatusCode, Json<DataResponse<Profile>>)> {
    validate_name("name", &input.name)?;
    let profile = ProfileRepo::create(&state.pool, &input).await?;
    tracing::info!(profile_id = profile.id, "Profile created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(profile))))
}

/// GET /api/v1/profiles?include_inactive=false
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Profile>>>> {
    let profiles = ProfileRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse::new(profiles)))
}

/// GET /api/v1/profiles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ensure_active_profile(&state.pool, id).await?;
    Ok(Json(DataResponse::new(profile)))
}

/// PUT /api/v1/profiles/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<Profile>>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    let profile = ProfileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))?;
    Ok(Json(DataResponse::new(profile)))
}

/// DELETE /api/v1/profiles/{id}
///
/// Soft delete: the profile becomes inactive.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deactivated = ProfileRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        tracing::info!(profile_id = id, "Profile deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))
    }
}

/// GET /api/v1/profiles/{id}/entries
pub async fn list_entries(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProfileEntry>>>> {
    ensure_active_profile(&state.pool, id).await?;
    let entries = EntryRepo::list_by_profile(&state.pool, id)
        .await?
        .into_iter()
        .map(|entry| ProfileEntry {
            is_complete: entry.is_complete(),
            entry,
        })
        .collect();
    Ok(Json(DataResponse::new(entries)))
}
