//! # Database Module
//!
//! This module handles all database operations for the Pokedex backend.
//! PostgreSQL stores two tables, `type` and `pokemon` (see [`models`]).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      DATABASE LAYER                              │
//! │                                                                  │
//! │  ┌──────────────────────────────────────────────────────────┐   │
//! │  │              PokemonStore (trait, used by handlers)       │   │
//! │  └──────────────────────────────────────────────────────────┘   │
//! │                              │                                   │
//! │  ┌──────────────────────────────────────────────────────────┐   │
//! │  │                   Connection Pool                         │   │
//! │  │                  (deadpool-postgres)                      │   │
//! │  └──────────────────────────────────────────────────────────┘   │
//! │                              │                                   │
//! │                ┌─────────────┴─────────────┐                     │
//! │                ▼                           ▼                     │
//! │         ┌────────────┐              ┌────────────┐               │
//! │         │   type     │─────────────<│  pokemon   │               │
//! │         └────────────┘              └────────────┘               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers never see the pool directly. They talk to a
//! `dyn PokemonStore`, which is [`Database`] in production and
//! `memory::MemoryStore` in tests.

#[cfg(test)]
pub mod memory;
pub mod models;
pub mod queries;

use async_trait::async_trait;
use deadpool_postgres::{Config, Pool, Runtime};
use thiserror::Error;
use tokio_postgres::{Config as TokioConfig, NoTls};
use tracing::{error, info};

use crate::models::ValidatedPokemon;
use models::{PokemonRecord, TypeRecord};

/// The bootstrap schema, executed on every startup.
const INITIAL_SCHEMA: &str = include_str!("../../migrations/001_initial_schema.sql");

/// Database-related errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to connect to the database
    #[error("Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryError(#[from] tokio_postgres::Error),

    /// Migration failed
    #[error("Migration failed: {0}")]
    MigrationError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A write referenced a type that does not exist
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),
}

/// Storage operations the API needs.
///
/// `update_pokemon` and `delete_pokemon` return `false` when no row had
/// the given id.
#[async_trait]
pub trait PokemonStore: Send + Sync {
    /// All pokemon with their type names, ordered by id.
    async fn list_pokemon(&self) -> Result<Vec<PokemonRecord>, DatabaseError>;

    async fn get_pokemon(&self, id: i32) -> Result<Option<PokemonRecord>, DatabaseError>;

    async fn get_type(&self, id: i32) -> Result<Option<TypeRecord>, DatabaseError>;

    /// Insert a pokemon and return its generated id.
    async fn create_pokemon(&self, pokemon: &ValidatedPokemon) -> Result<i32, DatabaseError>;

    /// Overwrite every mutable column of an existing pokemon.
    async fn update_pokemon(&self, id: i32, pokemon: &ValidatedPokemon) -> Result<bool, DatabaseError>;

    async fn delete_pokemon(&self, id: i32) -> Result<bool, DatabaseError>;

    /// Whether the backing store is reachable.
    async fn ping(&self) -> bool;
}

/// Database connection wrapper.
///
/// This struct wraps the connection pool and implements [`PokemonStore`]
/// on top of the functions in [`queries`].
///
/// ## Usage
///
/// ```rust,ignore
/// let db = Database::connect("postgres://...", 10).await?;
/// db.run_migrations().await?;
/// let all = db.list_pokemon().await?;
/// ```
#[derive(Clone)]
pub struct Database {
    /// The connection pool
    pool: Pool,
}

impl Database {
    /// Connect to the PostgreSQL database.
    ///
    /// ## Arguments
    ///
    /// * `database_url` - PostgreSQL connection string
    /// * `pool_size` - Maximum number of pooled connections
    ///
    /// ## Returns
    ///
    /// * `Ok(Database)` - Connected successfully
    /// * `Err(DatabaseError)` - Connection failed
    pub async fn connect(database_url: &str, pool_size: usize) -> Result<Self, DatabaseError> {
        info!("Connecting to database...");

        // Parse the connection string using tokio_postgres::Config
        let tokio_config = database_url
            .parse::<TokioConfig>()
            .map_err(|e| DatabaseError::ConfigError(format!("Invalid database URL: {}", e)))?;

        // Convert to deadpool config
        let mut config = Config::new();

        if let Some(dbname) = tokio_config.get_dbname() {
            config.dbname = Some(dbname.to_string());
        }
        if let Some(user) = tokio_config.get_user() {
            config.user = Some(user.to_string());
        }
        if let Some(password) = tokio_config.get_password() {
            // Password is &[u8]
            config.password = Some(String::from_utf8_lossy(password).to_string());
        }
        if let Some(tokio_postgres::config::Host::Tcp(host)) = tokio_config.get_hosts().first() {
            config.host = Some(host.clone());
        }
        if let Some(port) = tokio_config.get_ports().first() {
            config.port = Some(*port);
        }

        config.pool = Some(deadpool_postgres::PoolConfig {
            max_size: pool_size,
            ..Default::default()
        });

        let pool = config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        let db = Self { pool };
        if !db.ping().await {
            return Err(DatabaseError::ConnectionError(
                "database did not answer SELECT 1".to_string(),
            ));
        }

        info!("Database connection established (pool size {})", pool_size);

        Ok(db)
    }

    /// Create the `type` and `pokemon` tables if they are missing.
    ///
    /// The script in `migrations/001_initial_schema.sql` only uses
    /// `IF NOT EXISTS` statements, so running it against an existing
    /// database is a no-op.
    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        info!("Running database migrations...");

        let client = self
            .pool
            .get()
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        client.batch_execute(INITIAL_SCHEMA).await.map_err(|e| {
            let detail = e
                .as_db_error()
                .and_then(|db_err| db_err.detail())
                .unwrap_or("No detail available");
            error!("Migration execution error: {} ({})", e, detail);
            DatabaseError::MigrationError(e.to_string())
        })?;

        info!("Migrations completed successfully");
        Ok(())
    }
}

#[async_trait]
impl PokemonStore for Database {
    async fn list_pokemon(&self) -> Result<Vec<PokemonRecord>, DatabaseError> {
        queries::list_pokemon(&self.pool).await
    }

    async fn get_pokemon(&self, id: i32) -> Result<Option<PokemonRecord>, DatabaseError> {
        queries::get_pokemon_by_id(&self.pool, id).await
    }

    async fn get_type(&self, id: i32) -> Result<Option<TypeRecord>, DatabaseError> {
        queries::get_type_by_id(&self.pool, id).await
    }

    async fn create_pokemon(&self, pokemon: &ValidatedPokemon) -> Result<i32, DatabaseError> {
        queries::create_pokemon(&self.pool, pokemon).await
    }

    async fn update_pokemon(&self, id: i32, pokemon: &ValidatedPokemon) -> Result<bool, DatabaseError> {
        queries::update_pokemon(&self.pool, id, pokemon).await
    }

    async fn delete_pokemon(&self, id: i32) -> Result<bool, DatabaseError> {
        queries::delete_pokemon(&self.pool, id).await
    }

    async fn ping(&self) -> bool {
        match self.pool.get().await {
            Ok(client) => client.query_one("SELECT 1", &[]).await.is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creates_both_tables() {
        assert!(INITIAL_SCHEMA.contains("CREATE TABLE IF NOT EXISTS \"type\""));
        assert!(INITIAL_SCHEMA.contains("CREATE TABLE IF NOT EXISTS pokemon"));
        assert!(INITIAL_SCHEMA.contains("REFERENCES \"type\"(id)"));
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let result = Database::connect("postgres://user@host:notaport/db", 1).await;
        assert!(matches!(result, Err(DatabaseError::ConfigError(_))));
    }
}
