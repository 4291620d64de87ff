//! # REST API Module
//!
//! This module defines all HTTP endpoints for the Pokedex API.
//!
//! ## Endpoint Overview
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | API information |
//! | GET | `/health` | Health check |
//! | GET | `/api/v2/pokemons` | List all pokemon |
//! | POST | `/api/v2/pokemons` | Create a pokemon |
//! | GET | `/api/v2/pokemon/{id}` | Get one pokemon |
//! | PUT | `/api/v2/pokemon/{id}` | Replace a pokemon |
//! | DELETE | `/api/v2/pokemon/{id}` | Delete a pokemon |
//!
//! ## Request/Response Format
//!
//! All requests and responses use JSON. Status messages are returned as
//! `{"message": "..."}`; rejected writes add an `errors` object keyed by
//! field name.

pub mod routes;
pub mod handlers;

pub use routes::configure_routes;
