use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::Config;

/// Server encoding needed for `VARCHAR(300)` to hold 300 multi-byte characters
const REQUIRED_SERVER_ENCODING: &str = "UTF8";

/// Creates a PostgreSQL connection pool
///
/// Connections are checked out per store operation and returned to the pool
/// when the guard drops, whether the operation succeeded or not.
pub async fn create_pool(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(config.connect_options())
        .await?;

    Ok(pool)
}

/// Checks the database encoding, then creates the `watchlist_items` table if
/// it does not exist yet
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    check_server_encoding(pool).await?;
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Fails when the server does not store text as UTF-8
///
/// Under `SQL_ASCII`, for example, `VARCHAR(300)` counts bytes and rejects
/// titles of 300 astral-plane characters that validation accepts.
async fn check_server_encoding(pool: &PgPool) -> anyhow::Result<()> {
    let encoding: String = sqlx::query_scalar("SHOW server_encoding")
        .fetch_one(pool)
        .await?;

    if !is_supported_encoding(&encoding) {
        anyhow::bail!(
            "database server_encoding is {}, but {} is required",
            encoding,
            REQUIRED_SERVER_ENCODING
        );
    }

    tracing::debug!(encoding = %encoding, "Database encoding checked");
    Ok(())
}

fn is_supported_encoding(encoding: &str) -> bool {
    encoding.eq_ignore_ascii_case(REQUIRED_SERVER_ENCODING)
}
