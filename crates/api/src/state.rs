use std::sync::Arc;

use tankobon_db::PgCollectionStore;
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tankobon_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cancelled when the server begins shutting down. Running imports stop
    /// at the next row boundary.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Collection store over the shared pool.
    pub fn store(&self) -> PgCollectionStore {
        PgCollectionStore::new(self.pool.clone())
    }
}
