//! # API Request Models
//!
//! Write endpoints accept an untyped JSON body and run it through
//! [`validate_pokemon`] before anything touches the database. The result is
//! either a [`ValidatedPokemon`] or a [`ValidationErrors`] naming every
//! offending field.
//!
//! ## Expected JSON
//!
//! ```json
//! {
//!     "name": "Pikachu",
//!     "description": "Electric mouse",
//!     "type_id": 1
//! }
//! ```
//!
//! | Field | Rule |
//! |-------|------|
//! | `name` | required string, at most 50 characters |
//! | `description` | optional string, at most 200 characters, defaults to `""` |
//! | `type_id` | required integer |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::models::{DESCRIPTION_MAX_LEN, NAME_MAX_LEN};

/// A request body that passed validation.
///
/// Used for both create and update. Updates overwrite every field, so an
/// omitted `description` arrives here as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedPokemon {
    pub name: String,
    pub description: String,
    pub type_id: i32,
}

/// Field-level validation failures, keyed by field name.
///
/// Serializes as a plain JSON object with keys in sorted order:
///
/// ```json
/// { "name": "name is required", "type_id": "type_id must be an integer" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`. A second failure on the same field
    /// replaces the first.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Names of the failing fields, sorted.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Validate a pokemon create/update body.
///
/// Every field is checked; failures are collected rather than returned on
/// the first hit. A body that is not a JSON object reports every required
/// field as missing.
pub fn validate_pokemon(body: &Value) -> Result<ValidatedPokemon, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = required_string(body, "name", NAME_MAX_LEN, &mut errors);
    let description = optional_string(body, "description", DESCRIPTION_MAX_LEN, &mut errors);
    let type_id = required_integer(body, "type_id", &mut errors);

    match (name, description, type_id) {
        (Some(name), Some(description), Some(type_id)) if errors.is_empty() => Ok(ValidatedPokemon {
            name,
            description,
            type_id,
        }),
        _ => Err(errors),
    }
}

/// Treats JSON `null` the same as a missing key.
fn field<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|value| !value.is_null())
}

fn required_string(
    body: &Value,
    key: &str,
    max_len: usize,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match field(body, key) {
        None => {
            errors.add(key, format!("{} is required", key));
            None
        }
        Some(value) => checked_string(value, key, max_len, errors),
    }
}

fn optional_string(
    body: &Value,
    key: &str,
    max_len: usize,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match field(body, key) {
        None => Some(String::new()),
        Some(value) => checked_string(value, key, max_len, errors),
    }
}

fn checked_string(
    value: &Value,
    key: &str,
    max_len: usize,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let Some(s) = value.as_str() else {
        errors.add(key, format!("{} must be a string", key));
        return None;
    };

    // VARCHAR(n) limits characters, not bytes
    if s.chars().count() > max_len {
        errors.add(key, format!("{} must be at most {} characters", key, max_len));
        return None;
    }

    Some(s.to_string())
}

fn required_integer(body: &Value, key: &str, errors: &mut ValidationErrors) -> Option<i32> {
    let Some(value) = field(body, key) else {
        errors.add(key, format!("{} is required", key));
        return None;
    };

    match value.as_i64().and_then(|n| i32::try_from(n).ok()) {
        Some(n) => Some(n),
        None => {
            errors.add(key, format!("{} must be an integer", key));
            None
        }
    }
}
