use crate::world::record::{Record, World};
use dashmap::DashMap;
use serde_json::Value;

/// Canonical entity id -> record mapping.
///
/// Each entity lives in its own map entry; writers to the same entity are
/// serialized by the entry guard, writers to different entities proceed in
/// parallel.
pub struct EntityStore {
    entities: DashMap<String, Record>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: DashMap::new(),
        }
    }

    /// Overwrite the whole record of an entity, creating it if absent
    pub fn replace(&self, entity_id: &str, record: Record) -> Record {
        self.replace_then(entity_id, record, |_| {})
    }

    /// Replace a record and run `committed` while the entity is still locked.
    ///
    /// `committed` sees the stored record before any other writer to the
    /// same entity can touch it.
    pub fn replace_then<F>(&self, entity_id: &str, record: Record, committed: F) -> Record
    where
        F: FnOnce(&Record),
    {
        let mut entry = self.entities.entry(entity_id.to_string()).or_default();
        *entry.value_mut() = record;
        committed(entry.value());
        entry.value().clone()
    }

    /// Set a single field, keeping every other field of the entity
    pub fn merge(&self, entity_id: &str, field: &str, value: Value) -> Record {
        let mut entry = self.entities.entry(entity_id.to_string()).or_default();
        entry.value_mut().insert(field.to_string(), value);
        entry.value().clone()
    }

    /// Set every field of `fields` in one critical section
    pub fn merge_all(&self, entity_id: &str, fields: Record) -> Record {
        self.merge_all_then(entity_id, fields, |_| {})
    }

    /// Merge `fields` and run `committed` on the final record while the
    /// entity is still locked
    pub fn merge_all_then<F>(&self, entity_id: &str, fields: Record, committed: F) -> Record
    where
        F: FnOnce(&Record),
    {
        let mut entry = self.entities.entry(entity_id.to_string()).or_default();
        let record = entry.value_mut();
        for (field, value) in fields {
            record.insert(field, value);
        }
        committed(entry.value());
        entry.value().clone()
    }

    /// Record for an entity; unknown entities read as an empty record
    pub fn get(&self, entity_id: &str) -> Record {
        self.entities
            .get(entity_id)
            .map(|record| record.value().clone())
            .unwrap_or_default()
    }

    /// Copy of every entity in the world
    pub fn snapshot(&self) -> World {
        self.entities
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Discard the current world and install `world` in its place.
    ///
    /// Callers needing atomicity against other writers must exclude them
    /// (see `WorldService`).
    pub fn replace_world(&self, world: World) {
        self.entities.clear();
        for (entity_id, record) in world {
            self.entities.insert(entity_id, record);
        }
    }

    pub fn clear(&self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}
