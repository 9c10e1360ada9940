//! Handlers for the `/formats` resource.
//!
//! Formats are usually created by imports; these endpoints let the client
//! curate them. The seeded "Unknown" format cannot be deleted.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tankobon_core::collection::{validate_name, UNKNOWN_LOOKUP_ID};
use tankobon_core::error::CoreError;
use tankobon_core::types::DbId;
use tankobon_db::models::format::{CreateFormat, Format, UpdateFormat};
use tankobon_db::repositories::FormatRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Format",
        id,
    })
}

/// POST /api/v1/formats
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFormat>,
) -> AppResult<(StatusCode, Json<DataResponse<Format>>)> {
    validate_name("name", &input.name)?;
    let format = FormatRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(format))))
}

/// GET /api/v1/formats
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Format>>>> {
    let formats = FormatRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(formats)))
}

/// GET /api/v1/formats/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Format>>> {
    let format = FormatRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(format)))
}

/// PUT /api/v1/formats/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFormat>,
) -> AppResult<Json<DataResponse<Format>>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    let format = FormatRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(format)))
}

/// DELETE /api/v1/formats/{id}
///
/// Returns 409 while manga still reference the format.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if id == UNKNOWN_LOOKUP_ID {
        return Err(AppError::Core(CoreError::Conflict(
            "The Unknown format cannot be deleted".to_string(),
        )));
    }
    if FormatRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
