use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::WatchlistItem,
};

/// Rows per INSERT statement; two bind parameters each keeps a batch well
/// under PostgreSQL's 65535 parameter limit.
const INSERT_BATCH_SIZE: usize = 1000;

/// Persistent storage for the watchlist
///
/// Callers validate items before handing them to the store; the store does
/// not re-check lengths.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WatchlistStore: Send + Sync {
    /// Returns every item, ordered by position
    async fn get_watchlist(&self) -> AppResult<Vec<String>>;

    /// Atomically replaces the whole watchlist with `items`
    async fn replace_watchlist(&self, items: Vec<String>) -> AppResult<()>;
}

/// `WatchlistStore` backed by the `watchlist_items` table
#[derive(Clone)]
pub struct PgWatchlistStore {
    pool: PgPool,
}

impl PgWatchlistStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Pairs each item with its zero-based index
fn number_items(items: Vec<String>) -> AppResult<Vec<WatchlistItem>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, contents)| {
            let position = i32::try_from(index).map_err(|_| {
                AppError::Internal(format!("watchlist position {} out of range", index))
            })?;
            Ok(WatchlistItem::new(position, contents))
        })
        .collect()
}

#[async_trait::async_trait]
impl WatchlistStore for PgWatchlistStore {
    async fn get_watchlist(&self) -> AppResult<Vec<String>> {
        let watchlist = sqlx::query_scalar::<_, String>(
            r#"
            SELECT contents
            FROM watchlist_items
            ORDER BY position
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = watchlist.len(), "Loaded watchlist");

        Ok(watchlist)
    }

    async fn replace_watchlist(&self, items: Vec<String>) -> AppResult<()> {
        let rows = number_items(items)?;

        // Dropping `tx` without committing rolls the delete back.
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM watchlist_items")
            .execute(&mut *tx)
            .await?;

        // An empty watchlist runs no INSERT at all; an empty VALUES list is invalid SQL.
        for batch in rows.chunks(INSERT_BATCH_SIZE) {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO watchlist_items (position, contents) ");
            builder.push_values(batch, |mut row, item| {
                row.push_bind(item.position).push_bind(item.contents.clone());
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::info!(count = rows.len(), "Replaced watchlist");

        Ok(())
    }
}
