use std::sync::Arc;

use crate::config::ServerConfig;
use crate::mail::Mailer;
use crate::storage::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: panotour_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Disk storage for uploaded images.
    pub uploads: UploadStore,
    /// Outgoing mail. `None` when SMTP is not configured.
    pub mailer: Option<Arc<Mailer>>,
}
