pub mod postgres;
pub mod watchlist;

pub use postgres::{create_pool, run_migrations};
pub use watchlist::{PgWatchlistStore, WatchlistStore};
