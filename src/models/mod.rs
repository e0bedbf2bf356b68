/// Longest watchlist item accepted, in Unicode code points
pub const MAX_WATCHLIST_ITEM_LENGTH: usize = 300;

/// A row of the `watchlist_items` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistItem {
    /// Zero-based display order, unique within the table
    pub position: i32,
    /// The movie title
    pub contents: String,
}

impl WatchlistItem {
    pub fn new(position: i32, contents: impl Into<String>) -> Self {
        Self {
            position,
            contents: contents.into(),
        }
    }
}
