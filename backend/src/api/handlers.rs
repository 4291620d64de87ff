//! # API Request Handlers
//!
//! This module contains the handler functions for each API endpoint.
//! Each write handler:
//! 1. Validates the JSON body
//! 2. Checks the referenced type exists
//! 3. Calls the store
//! 4. Returns a formatted response
//!
//! ## Error Handling
//!
//! | Failure | Status | Body |
//! |---------|--------|------|
//! | Invalid body or unknown `type_id` | 400 | `{"message": "Invalid request body", "errors": {...}}` |
//! | Unknown pokemon id | 404 | `{"message": "Item not found"}` or `{"message": "Pokemon not found"}` |
//! | Storage failure | 500 | `{"message": "Internal server error"}` |

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::db::DatabaseError;
use crate::models::{
    validate_pokemon,
    CreatedResponse,
    HealthResponse,
    MessageResponse,
    PokemonDetail,
    PokemonSummary,
    ValidatedPokemon,
    ValidationErrorResponse,
    ValidationErrors,
    EMPTY_CATALOG_MESSAGE,
};
use crate::AppState;

// ============================================
// RESPONSE HELPERS
// ============================================

fn internal_error(context: &str, e: DatabaseError) -> HttpResponse {
    error!("{} failed: {}", context, e);
    HttpResponse::InternalServerError().json(MessageResponse::new("Internal server error"))
}

fn invalid_body(errors: ValidationErrors) -> HttpResponse {
    warn!(
        "Rejected pokemon body, invalid fields: {}",
        errors.fields().collect::<Vec<_>>().join(", ")
    );
    HttpResponse::BadRequest().json(ValidationErrorResponse::new(errors))
}

fn unknown_type(type_id: i32) -> HttpResponse {
    let mut errors = ValidationErrors::new();
    errors.add("type_id", format!("Type with id {} does not exist", type_id));
    invalid_body(errors)
}

fn pokemon_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(MessageResponse::new("Pokemon not found"))
}

/// Validate a write body and confirm its type exists.
///
/// `Err` carries the response to send back unchanged.
async fn checked_body(state: &AppState, body: &Value) -> Result<ValidatedPokemon, HttpResponse> {
    let pokemon = validate_pokemon(body).map_err(invalid_body)?;

    match state.store.get_type(pokemon.type_id).await {
        Ok(Some(pokemon_type)) => {
            debug!("type_id {} resolves to {}", pokemon_type.id, pokemon_type.type_name);
            Ok(pokemon)
        }
        Ok(None) => Err(unknown_type(pokemon.type_id)),
        Err(e) => Err(internal_error("Type lookup", e)),
    }
}

// ============================================
// INFO & HEALTH
// ============================================

/// API information endpoint (root).
///
/// ## Endpoint
///
/// `GET /`
pub async fn api_info() -> HttpResponse {
    let info = json!({
        "name": "Pokedex API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "endpoints": {
            "health": { "method": "GET", "path": "/health" },
            "pokemon": {
                "list": { "method": "GET", "path": "/api/v2/pokemons" },
                "create": { "method": "POST", "path": "/api/v2/pokemons" },
                "get": { "method": "GET", "path": "/api/v2/pokemon/{id}" },
                "update": { "method": "PUT", "path": "/api/v2/pokemon/{id}" },
                "delete": { "method": "DELETE", "path": "/api/v2/pokemon/{id}" }
            }
        }
    });

    HttpResponse::Ok().json(info)
}

/// Health check endpoint.
///
/// ## Endpoint
///
/// `GET /health`
///
/// ## Response
///
/// ```json
/// {
///     "status": "healthy",
///     "database": true,
///     "version": "0.1.0",
///     "timestamp": "2025-12-08T12:00:00Z"
/// }
/// ```
///
/// Answers 503 when the database does not respond.
pub async fn health_check(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let db_healthy = state.store.ping().await;

    let response = HealthResponse {
        status: if db_healthy { "healthy" } else { "unhealthy" }.to_string(),
        database: db_healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    };

    if db_healthy {
        HttpResponse::Ok().json(response)
    } else {
        warn!("Health check failed: database unreachable");
        HttpResponse::ServiceUnavailable().json(response)
    }
}

// ============================================
// POKEMON
// ============================================

/// List every pokemon.
///
/// ## Endpoint
///
/// `GET /api/v2/pokemons`
///
/// ## Response
///
/// ```json
/// [
///     { "id": 1, "name": "Pikachu", "description": "Electric mouse", "type": "Electric" }
/// ]
/// ```
///
/// An empty catalog answers with an object instead of `[]`:
///
/// ```json
/// { "message": "No pokemon available as of now." }
/// ```
pub async fn list_pokemons(state: web::Data<Arc<AppState>>) -> HttpResponse {
    match state.store.list_pokemon().await {
        Ok(records) if records.is_empty() => {
            HttpResponse::Ok().json(MessageResponse::new(EMPTY_CATALOG_MESSAGE))
        }
        Ok(records) => {
            let pokemons: Vec<PokemonSummary> = records.into_iter().map(Into::into).collect();
            HttpResponse::Ok().json(pokemons)
        }
        Err(e) => internal_error("List pokemon", e),
    }
}

/// Get one pokemon.
///
/// ## Endpoint
///
/// `GET /api/v2/pokemon/{id}`
///
/// ## Example
///
/// ```bash
/// curl http://127.0.0.1:5000/api/v2/pokemon/1
/// ```
///
/// ## Response
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
pub async fn get_pokemon(state: web::Data<Arc<AppState>>, path: web::Path<i32>) -> HttpResponse {
    let id = path.into_inner();

    match state.store.get_pokemon(id).await {
        Ok(Some(record)) => HttpResponse::Ok().json(PokemonDetail::from(record)),
        Ok(None) => HttpResponse::NotFound().json(MessageResponse::new("Item not found")),
        Err(e) => internal_error("Get pokemon", e),
    }
}

/// Create a pokemon.
///
/// ## Endpoint
///
/// `POST /api/v2/pokemons`
///
/// ## Example
///
/// ```bash
/// curl -X POST http://127.0.0.1:5000/api/v2/pokemons \
///   -H "Content-Type: application/json" \
///   -d '{"name": "Pikachu", "description": "Electric mouse", "type_id": 1}'
/// ```
///
/// ## Response (201)
///
/// ```json
/// { "message": "Pokemon Pikachu created successfully", "id": 1 }
/// ```
pub async fn create_pokemon(
    state: web::Data<Arc<AppState>>,
    body: web::Json<Value>,
) -> HttpResponse {
    let pokemon = match checked_body(&state, &body).await {
        Ok(pokemon) => pokemon,
        Err(response) => return response,
    };

    match state.store.create_pokemon(&pokemon).await {
        Ok(id) => {
            info!("Created pokemon {} ({})", id, pokemon.name);
            HttpResponse::Created().json(CreatedResponse {
                message: format!("Pokemon {} created successfully", pokemon.name),
                id,
            })
        }
        // The type vanished between the check and the insert
        Err(DatabaseError::ForeignKeyViolation(_)) => unknown_type(pokemon.type_id),
        Err(e) => internal_error("Create pokemon", e),
    }
}

/// Replace a pokemon.
///
/// `name`, `description` and `type_id` are all overwritten. Omitting
/// `description` clears it. The id is looked up before the body is
/// parsed, so an unknown id answers 404 whatever the body holds.
///
/// ## Endpoint
///
/// `PUT /api/v2/pokemon/{id}`
///
/// ## Response
///
/// ```json
/// { "message": "Pokemon with id: 1 updated successfully" }
/// ```
pub async fn update_pokemon(
    state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    body: Result<web::Json<Value>, actix_web::Error>,
) -> HttpResponse {
    let id = path.into_inner();

    match state.store.get_pokemon(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return pokemon_not_found(),
        Err(e) => return internal_error("Get pokemon", e),
    }

    // A missing row wins over a malformed body
    let body = match body {
        Ok(body) => body,
        Err(e) => return e.error_response(),
    };

    let pokemon = match checked_body(&state, &body).await {
        Ok(pokemon) => pokemon,
        Err(response) => return response,
    };

    match state.store.update_pokemon(id, &pokemon).await {
        Ok(true) => {
            info!("Updated pokemon {}", id);
            HttpResponse::Ok().json(MessageResponse::new(format!(
                "Pokemon with id: {} updated successfully",
                id
            )))
        }
        Ok(false) => pokemon_not_found(),
        Err(DatabaseError::ForeignKeyViolation(_)) => unknown_type(pokemon.type_id),
        Err(e) => internal_error("Update pokemon", e),
    }
}

/// Delete a pokemon.
///
/// ## Endpoint
///
/// `DELETE /api/v2/pokemon/{id}`
///
/// ## Response
///
/// ```json
/// { "message": "Pikachu deleted successfully" }
/// ```
pub async fn delete_pokemon(state: web::Data<Arc<AppState>>, path: web::Path<i32>) -> HttpResponse {
    let id = path.into_inner();

    let record = match state.store.get_pokemon(id).await {
        Ok(Some(record)) => record,
        Ok(None) => return pokemon_not_found(),
        Err(e) => return internal_error("Get pokemon", e),
    };

    match state.store.delete_pokemon(id).await {
        Ok(true) => {
            info!("Deleted pokemon {} ({})", id, record.name);
            HttpResponse::Ok().json(MessageResponse::new(format!(
                "{} deleted successfully",
                record.name
            )))
        }
        Ok(false) => pokemon_not_found(),
        Err(e) => internal_error("Delete pokemon", e),
    }
}
