use axum::routing::get;
use axum::Router;

use crate::handlers::format;
use crate::state::AppState;

/// Routes mounted at `/formats`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(format::list).post(format::create))
        .route(
            "/{id}",
            get(format::get_by_id).put(format::update).delete(format::delete),
        )
}
