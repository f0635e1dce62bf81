//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::PreferenceRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Preference store shared by every request
    pub repository: Arc<dyn PreferenceRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn PreferenceRepository>) -> Self {
        Self { repository }
    }
}
