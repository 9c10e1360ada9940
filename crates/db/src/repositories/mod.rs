//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod entry_repo;
pub mod format_repo;
pub mod manga_repo;
pub mod profile_repo;
pub mod publisher_repo;

pub use entry_repo::EntryRepo;
pub use format_repo::FormatRepo;
pub use manga_repo::MangaRepo;
pub use profile_repo::ProfileRepo;
pub use publisher_repo::PublisherRepo;
