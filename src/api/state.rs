use std::sync::Arc;

use crate::db::WatchlistStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WatchlistStore>,
}

impl AppState {
    /// Creates application state around a watchlist store
    pub fn new(store: Arc<dyn WatchlistStore>) -> Self {
        Self { store }
    }
}
