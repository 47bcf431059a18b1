use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::export::FontDatabase;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one resume and the wizard position. Writers hold the lock across
    /// persistence so stored snapshots land in dispatch order.
    pub store: Arc<RwLock<ResumeStore>>,
    pub config: Config,
    /// Fonts used when rasterizing a rendered resume for export.
    pub fonts: Arc<FontDatabase>,
}
