//! Route definitions for profiles and the collection operations scoped to
//! one profile. The import upload is mounted by
//! [`upload_routes`](super::upload_routes).

use axum::routing::get;
use axum::Router;

use crate::handlers::{profile, shared};
use crate::state::AppState;

/// Routes mounted at `/profiles`.
///
/// ```text
/// GET    /                          -> list (?include_inactive=true)
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete (deactivate)
/// GET    /{id}/entries              -> list_entries
/// GET    /{id}/shared/{other_id}    -> list_shared
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::list).post(profile::create))
        .route(
            "/{id}",
            get(profile::get_by_id)
                .put(profile::update)
                .delete(profile::delete),
        )
        .route("/{id}/entries", get(profile::list_entries))
        .route("/{id}/shared/{other_id}", get(shared::list_shared))
}
