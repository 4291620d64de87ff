//! In-memory [`PokemonStore`] for handler tests.
//!
//! Mirrors the Postgres behavior the handlers depend on: ids come from a
//! sequence that never reuses values, reads are ordered by id, and writes
//! referencing an unknown type fail with `ForeignKeyViolation`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::{PokemonRecord, TypeRecord};
use super::{DatabaseError, PokemonStore};
use crate::models::ValidatedPokemon;

struct Tables {
    types: BTreeMap<i32, String>,
    pokemon: BTreeMap<i32, ValidatedPokemon>,
    next_pokemon_id: i32,
}

impl Tables {
    fn joined(&self, id: i32, pokemon: &ValidatedPokemon) -> Option<PokemonRecord> {
        let type_name = self.types.get(&pokemon.type_id)?;
        Some(PokemonRecord {
            id,
            name: pokemon.name.clone(),
            description: pokemon.description.clone(),
            type_id: pokemon.type_id,
            type_name: type_name.clone(),
        })
    }

    fn check_type(&self, type_id: i32) -> Result<(), DatabaseError> {
        if self.types.contains_key(&type_id) {
            Ok(())
        } else {
            Err(DatabaseError::ForeignKeyViolation(format!(
                "Key (type_id)=({}) is not present in table \"type\".",
                type_id
            )))
        }
    }
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    /// A store seeded with the given `type` rows.
    pub fn with_types(types: &[TypeRecord]) -> Self {
        let tables = Tables {
            types: types
                .iter()
                .map(|t| (t.id, t.type_name.clone()))
                .collect(),
            pokemon: BTreeMap::new(),
            next_pokemon_id: 1,
        };
        Self {
            tables: RwLock::new(tables),
            offline: AtomicBool::new(false),
        }
    }

    /// Make every operation fail as if the database were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored pokemon rows.
    pub async fn pokemon_count(&self) -> usize {
        self.tables.read().await.pokemon.len()
    }

    fn check_online(&self) -> Result<(), DatabaseError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(DatabaseError::ConnectionError("store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PokemonStore for MemoryStore {
    async fn list_pokemon(&self) -> Result<Vec<PokemonRecord>, DatabaseError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .pokemon
            .iter()
            .filter_map(|(id, pokemon)| tables.joined(*id, pokemon))
            .collect())
    }

    async fn get_pokemon(&self, id: i32) -> Result<Option<PokemonRecord>, DatabaseError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .pokemon
            .get(&id)
            .and_then(|pokemon| tables.joined(id, pokemon)))
    }

    async fn get_type(&self, id: i32) -> Result<Option<TypeRecord>, DatabaseError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables.types.get(&id).map(|type_name| TypeRecord {
            id,
            type_name: type_name.clone(),
        }))
    }

    async fn create_pokemon(&self, pokemon: &ValidatedPokemon) -> Result<i32, DatabaseError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        tables.check_type(pokemon.type_id)?;

        let id = tables.next_pokemon_id;
        tables.next_pokemon_id += 1;
        tables.pokemon.insert(id, pokemon.clone());
        Ok(id)
    }

    async fn update_pokemon(&self, id: i32, pokemon: &ValidatedPokemon) -> Result<bool, DatabaseError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        if !tables.pokemon.contains_key(&id) {
            return Ok(false);
        }
        tables.check_type(pokemon.type_id)?;
        tables.pokemon.insert(id, pokemon.clone());
        Ok(true)
    }

    async fn delete_pokemon(&self, id: i32) -> Result<bool, DatabaseError> {
        self.check_online()?;
        Ok(self.tables.write().await.pokemon.remove(&id).is_some())
    }

    async fn ping(&self) -> bool {
        self.check_online().is_ok()
    }
}
