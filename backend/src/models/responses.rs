//! # API Response Models
//!
//! Structures for outgoing API response bodies.
//!
//! Unlike a wrapped `{success, data, error}` envelope, these bodies keep the
//! flat shapes existing Pokedex clients already parse: bare arrays and
//! objects for data, `{message}` for status, `{message, errors}` for
//! rejected writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::requests::ValidationErrors;
use crate::db::models::PokemonRecord;

/// Message shown by the list endpoint when the catalog is empty.
pub const EMPTY_CATALOG_MESSAGE: &str = "No pokemon available as of now.";

/// Plain status message.
///
/// ```json
/// { "message": "Item not found" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Returned by `POST /api/v2/pokemons`.
///
/// ```json
/// { "message": "Pokemon Pikachu created successfully", "id": 1 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,

    /// Generated primary key of the new row.
    pub id: i32,
}

/// A rejected write.
///
/// ```json
/// {
///     "message": "Invalid request body",
///     "errors": { "name": "name is required" }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub errors: ValidationErrors,
}

impl ValidationErrorResponse {
    pub fn new(errors: ValidationErrors) -> Self {
        Self {
            message: "Invalid request body".to_string(),
            errors,
        }
    }
}

/// One entry of `GET /api/v2/pokemons`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: i32,
    pub name: String,
    pub description: String,

    /// The resolved type name.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl From<PokemonRecord> for PokemonSummary {
    fn from(record: PokemonRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            type_name: record.type_name,
        }
    }
}

/// Returned by `GET /api/v2/pokemon/{id}`.
///
/// Carries the raw `type_id` on top of everything in [`PokemonSummary`].
///
/// ```json
/// {
///     "id": 1,
///     "name": "Pikachu",
///     "description": "Electric mouse",
///     "type_id": 1,
///     "type": "Electric"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub type_id: i32,

    #[serde(rename = "type")]
    pub type_name: String,
}

impl From<PokemonRecord> for PokemonDetail {
    fn from(record: PokemonRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            type_id: record.type_id,
            type_name: record.type_name,
        }
    }
}

/// Health check response.
///
/// Returned by `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status ("healthy" or "unhealthy").
    pub status: String,

    /// Whether the database answered.
    pub database: bool,

    /// Backend version.
    pub version: String,

    /// Response timestamp.
    pub timestamp: DateTime<Utc>,
}
