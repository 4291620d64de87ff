//! # Database Models
//!
//! This module defines the data structures that map to database tables.
//!
//! ## Table Overview
//!
//! | Table | Description |
//! |-------|-------------|
//! | `type` | Elemental types (Electric, Water, ...) |
//! | `pokemon` | Catalog entries, each referencing one type |
//!
//! ## Relationship Diagram
//!
//! ```text
//! ┌─────────────┐       ┌──────────────────┐
//! │    type     │──────<│     pokemon      │
//! │             │       │                  │
//! │ id (PK)     │       │ id (PK)          │
//! │ type_name   │       │ name             │
//! │             │       │ description      │
//! │             │       │ type_id (FK)     │
//! └─────────────┘       └──────────────────┘
//! ```
//!
//! Deleting a type does not cascade to its pokemon.

use serde::{Deserialize, Serialize};

/// Maximum length of `type.type_name` and `pokemon.name`.
pub const NAME_MAX_LEN: usize = 50;

/// Maximum length of `pokemon.description`.
pub const DESCRIPTION_MAX_LEN: usize = 200;

/// A row of the `type` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub id: i32,
    pub type_name: String,
}

/// A row of the `pokemon` table joined with its type name.
///
/// Every read path returns this shape; the API layer decides how much of
/// it to expose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    /// Primary key, generated by the database.
    pub id: i32,

    pub name: String,

    /// Empty string when the column holds `NULL`.
    pub description: String,

    /// Foreign key into `type`.
    pub type_id: i32,

    /// `type.type_name` for `type_id`.
    pub type_name: String,
}
