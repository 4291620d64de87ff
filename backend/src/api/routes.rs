//! # API Route Configuration
//!
//! This module sets up all the HTTP routes for the API.

use actix_web::{error, http::Method, web, HttpResponse};

use super::handlers;
use crate::models::MessageResponse;

/// Configure all API routes.
///
/// Called from `main.rs` and from the handler tests.
///
/// ## Route Structure
///
/// ```text
/// /
/// ├── /health                 GET - Health check
/// └── /api/v2
///     ├── /pokemons           GET - List, POST - Create
///     └── /pokemon/{id}       GET - Show, PUT - Replace, DELETE - Remove
/// ```
///
/// An `{id}` that is not an `i32` can never match a row, so it answers
/// the same JSON 404 as a missing row.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Malformed bodies get the same {message} shape as everything else
        .app_data(json_config())
        .app_data(path_config())

        // Root endpoint - API information
        .route("/", web::get().to(handlers::api_info))

        // Health check endpoint
        .route("/health", web::get().to(handlers::health_check))

        // Pokemon endpoints
        .service(
            web::scope("/api/v2")
                .route("/pokemons", web::get().to(handlers::list_pokemons))
                .route("/pokemons", web::post().to(handlers::create_pokemon))
                .route("/pokemon/{id}", web::get().to(handlers::get_pokemon))
                .route("/pokemon/{id}", web::put().to(handlers::update_pokemon))
                .route("/pokemon/{id}", web::delete().to(handlers::delete_pokemon)),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest()
            .json(MessageResponse::new(format!("Invalid JSON body: {}", err)));
        error::InternalError::from_response(err, response).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        // Same bodies the handlers send for an unknown id
        let message = if *req.method() == Method::GET {
            "Item not found"
        } else {
            "Pokemon not found"
        };
        let response = HttpResponse::NotFound().json(MessageResponse::new(message));
        error::InternalError::from_response(err, response).into()
    })
}
