//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! CRUD handlers delegate to the corresponding repository in `tankobon_db`;
//! import and shared-collection handlers go through `tankobon_core` with a
//! [`PgCollectionStore`](tankobon_db::PgCollectionStore). Errors are mapped
//! via [`AppError`](crate::error::AppError).

pub mod entry;
pub mod format;
pub mod import;
pub mod manga;
pub mod profile;
pub mod publisher;
pub mod shared;
