//! # API Models
//!
//! This module defines the request and response structures for the REST API.
//! These are separate from database models to allow API-specific formatting.
//!
//! ## Organization
//!
//! - `requests.rs` - Request body validation
//! - `responses.rs` - Outgoing response bodies
//!
//! ## Serialization
//!
//! All models use Serde for JSON serialization. Field names stay
//! snake_case on the wire (`type_id`), matching the existing API.

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
