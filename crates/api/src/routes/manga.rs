//! Route definitions for manga. Deleting a manga removes its entries.

use axum::routing::get;
use axum::Router;

use crate::handlers::manga;
use crate::state::AppState;

/// Routes mounted at `/manga`.
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
        .route("/", get(manga::list).post(manga::create))
        .route(
            "/{id}",
            get(manga::get_by_id).put(manga::update).delete(manga::delete),
        )
}
