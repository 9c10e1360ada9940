//! Handlers for the `/publishers` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tankobon_core::collection::{validate_name, UNKNOWN_LOOKUP_ID};
use tankobon_core::error::CoreError;
use tankobon_core::types::DbId;
use tankobon_db::models::publisher::{CreatePublisher, Publisher, UpdatePublisher};
use tankobon_db::repositories::PublisherRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Publisher",
        id,
    })
}

/// POST /api/v1/publishers
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePublisher>,
) -> AppResult<(StatusCode, Json<DataResponse<Publisher>>)> {
    validate_name("name", &input.name)?;
    let publisher = PublisherRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(publisher))))
}

/// GET /api/v1/publishers
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Publisher>>>> {
    let publishers = PublisherRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(publishers)))
}

/// GET /api/v1/publishers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Publisher>>> {
    let publisher = PublisherRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(publisher)))
}

/// PUT /api/v1/publishers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePublisher>,
) -> AppResult<Json<DataResponse<Publisher>>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    let publisher = PublisherRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(publisher)))
}

/// DELETE /api/v1/publishers/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if id == UNKNOWN_LOOKUP_ID {
        return Err(AppError::Core(CoreError::Conflict(
            "The Unknown publisher cannot be deleted".to_string(),
        )));
    }
    if PublisherRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
