//! # Database Queries
//!
//! This module contains all the SQL queries for interacting with the database.
//! Each function performs a specific database operation.
//!
//! ## Query Organization
//!
//! - `type` lookups
//! - `pokemon` CRUD, always joined to `type` on reads
//!
//! ## Error Handling
//!
//! All queries return `Result<T, DatabaseError>`. Common errors:
//! - `ConnectionError` - No connection could be taken from the pool
//! - `ForeignKeyViolation` - A write referenced a missing type
//! - `QueryError` - Any other SQL failure

use deadpool_postgres::{Client, Pool};
use tokio_postgres::error::SqlState;
use tokio_postgres::Row;
use tracing::{debug, info};

use super::models::*;
use super::DatabaseError;
use crate::models::ValidatedPokemon;

// ============================================
// HELPER FUNCTIONS
// ============================================

/// Columns selected by every pokemon read.
const POKEMON_SELECT: &str = r#"
    SELECT
        p.id, p.name, p.description, p.type_id,
        t.type_name
    FROM pokemon p
    JOIN "type" t ON t.id = p.type_id
"#;

async fn client(pool: &Pool) -> Result<Client, DatabaseError> {
    pool.get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))
}

/// Helper to convert a joined row to PokemonRecord
fn row_to_pokemon(row: &Row) -> PokemonRecord {
    PokemonRecord {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get::<_, Option<String>>("description").unwrap_or_default(),
        type_id: row.get("type_id"),
        type_name: row.get("type_name"),
    }
}

/// Surface a foreign key violation as its own variant.
fn map_write_error(e: tokio_postgres::Error) -> DatabaseError {
    if e.code() == Some(&SqlState::FOREIGN_KEY_VIOLATION) {
        let detail = e
            .as_db_error()
            .and_then(|db_err| db_err.detail())
            .unwrap_or("referenced type does not exist")
            .to_string();
        DatabaseError::ForeignKeyViolation(detail)
    } else {
        DatabaseError::QueryError(e)
    }
}

// ============================================
// TYPE QUERIES
// ============================================

/// Get a type by primary key.
pub async fn get_type_by_id(pool: &Pool, id: i32) -> Result<Option<TypeRecord>, DatabaseError> {
    debug!("Fetching type: {}", id);

    let client = client(pool).await?;
    let row = client
        .query_opt(r#"SELECT id, type_name FROM "type" WHERE id = $1"#, &[&id])
        .await?;

    Ok(row.map(|row| TypeRecord {
        id: row.get("id"),
        type_name: row.get("type_name"),
    }))
}

// ============================================
// POKEMON QUERIES
// ============================================

/// Get every pokemon with its type name.
pub async fn list_pokemon(pool: &Pool) -> Result<Vec<PokemonRecord>, DatabaseError> {
    debug!("Fetching all pokemon");

    let sql = format!("{} ORDER BY p.id", POKEMON_SELECT);
    let client = client(pool).await?;
    let rows = client.query(sql.as_str(), &[]).await?;

    Ok(rows.iter().map(row_to_pokemon).collect())
}

/// Get a pokemon by primary key.
pub async fn get_pokemon_by_id(pool: &Pool, id: i32) -> Result<Option<PokemonRecord>, DatabaseError> {
    debug!("Fetching pokemon: {}", id);

    let sql = format!("{} WHERE p.id = $1", POKEMON_SELECT);
    let client = client(pool).await?;
    let row = client.query_opt(sql.as_str(), &[&id]).await?;

    Ok(row.as_ref().map(row_to_pokemon))
}

/// Insert a new pokemon and return the generated id.
pub async fn create_pokemon(pool: &Pool, pokemon: &ValidatedPokemon) -> Result<i32, DatabaseError> {
    debug!("Creating pokemon: {}", pokemon.name);

    let client = client(pool).await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO pokemon (name, description, type_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
            &[&pokemon.name, &pokemon.description, &pokemon.type_id],
        )
        .await
        .map_err(map_write_error)?;

    let id: i32 = row.get("id");
    info!("Pokemon {} stored with id {}", pokemon.name, id);
    Ok(id)
}

/// Overwrite name, description and type of a pokemon.
///
/// Returns `false` if no row has this id.
pub async fn update_pokemon(
    pool: &Pool,
    id: i32,
    pokemon: &ValidatedPokemon,
) -> Result<bool, DatabaseError> {
    debug!("Updating pokemon: {}", id);

    let client = client(pool).await?;
    let rows_affected = client
        .execute(
            r#"
            UPDATE pokemon
            SET
                name = $2,
                description = $3,
                type_id = $4
            WHERE id = $1
            "#,
            &[&id, &pokemon.name, &pokemon.description, &pokemon.type_id],
        )
        .await
        .map_err(map_write_error)?;

    Ok(rows_affected > 0)
}

/// Delete a pokemon.
///
/// Returns `false` if no row has this id.
pub async fn delete_pokemon(pool: &Pool, id: i32) -> Result<bool, DatabaseError> {
    debug!("Deleting pokemon: {}", id);

    let client = client(pool).await?;
    let rows_affected = client
        .execute("DELETE FROM pokemon WHERE id = $1", &[&id])
        .await?;

    Ok(rows_affected > 0)
}
