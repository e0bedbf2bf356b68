use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Database user
    #[serde(default = "default_db_user")]
    pub db_user: String,

    /// Database password
    #[serde(default)]
    pub db_password: String,

    /// Database host
    #[serde(default = "default_db_host")]
    pub db_host: String,

    /// Database port
    #[serde(default = "default_db_port")]
    pub db_port: u16,

    /// Database name
    #[serde(default = "default_db_name")]
    pub db_name: String,

    /// Upper bound on pooled database connections
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "cultural_touchstones".to_string()
}

fn default_db_max_connections() -> u32 {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would only fail later, at the first request
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.db_user.trim().is_empty() {
            anyhow::bail!("DB_USER must not be empty");
        }
        if self.db_host.trim().is_empty() {
            anyhow::bail!("DB_HOST must not be empty");
        }
        if self.db_name.trim().is_empty() {
            anyhow::bail!("DB_NAME must not be empty");
        }
        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        Ok(())
    }

    /// PostgreSQL connection options built from the `DB_*` settings
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .database(&self.db_name);

        if self.db_password.is_empty() {
            options
        } else {
            options.password(&self.db_password)
        }
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
