pub mod entry;
pub mod format;
pub mod health;
pub mod manga;
pub mod profile;
pub mod publisher;

use axum::routing::post;
use axum::Router;

use crate::handlers::import;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /profiles                                list, create
/// /profiles/{id}                           get, update, deactivate
/// /profiles/{id}/entries                   collection of one profile
/// /profiles/{id}/shared/{other_id}         manga owned by both profiles
///
/// /manga                                   list, create
/// /manga/{id}                              get, update, delete
///
/// /formats                                 list, create
/// /formats/{id}                            get, update, delete
///
/// /publishers                              list, create
/// /publishers/{id}                         get, update, delete
///
/// /entries                                 list, create
/// /entries/{id}                            get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/profiles", profile::router())
        .nest("/manga", manga::router())
        .nest("/formats", format::router())
        .nest("/publishers", publisher::router())
        .nest("/entries", entry::router())
}

/// Upload routes, kept apart so they run under the longer import timeout.
///
/// ```text
/// /profiles/{id}/import                    upload a .tsv export (POST)
/// ```
pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/profiles/{id}/import", post(import::import_collection))
}
