//! Data source configuration, connection pool and schema management.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};

use crate::entities::ENTITY_TABLES;

/// Embedded migrations that create the tables for every entity.
pub static MIGRATOR: Migrator = sqlx::migrate!("src/migrations");

/// Application name reported to PostgreSQL in `pg_stat_activity`.
const APPLICATION_NAME: &str = "hotel-booking";

/// Errors raised while preparing the data source.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Invalid data source configuration: {0}")]
    InvalidConfig(String),

    #[error("Database connection failed: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Schema synchronization failed: {0}")]
    Migration(#[from] MigrateError),

    #[error("Schema is missing entity tables: {}", .0.join(", "))]
    MissingTables(Vec<String>),
}

/// Connection settings for the relational store.
///
/// Defaults reproduce a local development database: `postgres:postgres` on
/// `localhost:5432`, database `hotel_booking`, schema synchronization on.
#[derive(Clone, Deserialize)]
pub struct DataSourceConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,

    #[serde(default = "default_database")]
    pub database: String,

    /// Apply the embedded migrations at startup.
    #[serde(default = "default_synchronize")]
    pub synchronize: bool,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    5432
}
fn default_username() -> String {
    "postgres".to_string()
}
fn default_password() -> String {
    "postgres".to_string()
}
fn default_database() -> String {
    "hotel_booking".to_string()
}
fn default_synchronize() -> bool {
    true
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    5
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: default_password(),
            database: default_database(),
            synchronize: default_synchronize(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

// Keeps the password out of logs and panic messages.
impl fmt::Debug for DataSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .field("synchronize", &self.synchronize)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .finish()
    }
}

/// Percent-encodes every byte outside the RFC 3986 unreserved set.
fn encode_userinfo(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(char::from(byte))
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

impl DataSourceConfig {
    /// Connection descriptor built from the discrete settings.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database)
            .application_name(APPLICATION_NAME)
    }

    /// `postgres://` URL equivalent to [`connect_options`](Self::connect_options).
    /// Credentials are percent-encoded so `@`, `:` and `/` stay inside them.
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            encode_userinfo(&self.username),
            encode_userinfo(&self.password),
            self.host,
            self.port,
            self.database
        )
    }

    /// Connection URL safe to write to logs.
    pub fn redacted_url(&self) -> String {
        format!(
            "postgres://{}:***@{}:{}/{}",
            self.username, self.host, self.port, self.database
        )
    }

    /// Validate the settings before any connection attempt.
    pub fn validate(&self) -> Result<(), DataSourceError> {
        if self.host.trim().is_empty() {
            return Err(DataSourceError::InvalidConfig(
                "database host must be set".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(DataSourceError::InvalidConfig(
                "database port cannot be 0".to_string(),
            ));
        }

        if self.username.trim().is_empty() {
            return Err(DataSourceError::InvalidConfig(
                "database username must be set".to_string(),
            ));
        }

        if self.database.trim().is_empty() {
            return Err(DataSourceError::InvalidConfig(
                "database name must be set".to_string(),
            ));
        }

        if self.max_connections == 0 {
            return Err(DataSourceError::InvalidConfig(
                "max_connections must be at least 1".to_string(),
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(DataSourceError::InvalidConfig(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        Ok(())
    }
}

/// Creates a PostgreSQL connection pool with the given configuration.
pub async fn create_pool(config: &DataSourceConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_with(config.connect_options())
        .await
}

/// Applies the embedded migrations, creating or altering entity tables.
pub async fn synchronize_schema(pool: &PgPool) -> Result<(), DataSourceError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Returns the entity tables that do not exist in the current schema.
pub async fn missing_entity_tables(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    let expected: Vec<String> = ENTITY_TABLES.iter().map(|t| t.to_string()).collect();

    let present: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT table_name::text
        FROM information_schema.tables
        WHERE table_schema = current_schema()
          AND table_name = ANY($1)
        "#,
    )
    .bind(&expected)
    .fetch_all(pool)
    .await?;

    Ok(expected
        .into_iter()
        .filter(|table| !present.iter().any(|(name,)| name == table))
        .collect())
}

/// Fails unless every entity table exists.
pub async fn verify_schema(pool: &PgPool) -> Result<(), DataSourceError> {
    let missing = missing_entity_tables(pool).await?;
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataSourceError::MissingTables(missing))
    }
}

/// Synchronizes or verifies the schema depending on `config.synchronize`.
pub async fn prepare_schema(
    pool: &PgPool,
    config: &DataSourceConfig,
) -> Result<(), DataSourceError> {
    if config.synchronize {
        info!("Synchronizing database schema...");
        synchronize_schema(pool).await?;
        info!("Schema synchronized");
    } else {
        warn!("Schema synchronization disabled, verifying entity tables");
        verify_schema(pool).await?;
        info!(tables = ENTITY_TABLES.len(), "Schema verified");
    }
    Ok(())
}
