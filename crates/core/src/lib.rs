//! Tankobon core: pure domain logic for the manga collection tracker.
//!
//! Nothing in this crate talks to a database directly. Persistence is reached
//! through the [`store::CollectionStore`] trait, which the `tankobon-db`
//! crate implements for PostgreSQL.

pub mod collection;
pub mod error;
pub mod import;
pub mod shared;
pub mod store;
pub mod types;
