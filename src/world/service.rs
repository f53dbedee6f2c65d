use crate::world::error::WorldError;
use crate::world::record::{Bucket, Record, World};
use crate::world::registry::ListenerRegistry;
use crate::world::store::EntityStore;
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

/// What a world reset does to registered listeners
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Empty every bucket but keep the listener ids registered
    #[default]
    KeepListeners,
    /// Remove every listener; clients must register again
    DropListeners,
}

/// Shared world state with per-listener change buckets.
///
/// Owns the entity store and the listener registry. Every write to a single
/// entity publishes the resulting full record into every registered bucket
/// before another writer can touch that entity, so buckets always end up
/// holding the last committed record.
pub struct WorldService {
    store: EntityStore,
    listeners: ListenerRegistry,
    reset_policy: ResetPolicy,

    /// Shared for per-entity operations, exclusive for world-wide ones
    gate: RwLock<()>,
}

impl WorldService {
    pub fn new() -> Self {
        Self::with_reset_policy(ResetPolicy::default())
    }

    pub fn with_reset_policy(reset_policy: ResetPolicy) -> Self {
        Self {
            store: EntityStore::new(),
            listeners: ListenerRegistry::new(),
            reset_policy,
            gate: RwLock::new(()),
        }
    }

    pub fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }

    /// Replace an entity's whole record and notify every listener
    pub fn set_entity(&self, entity_id: &str, record: Record) -> Record {
        let _shared = self.gate.read().unwrap_or_else(PoisonError::into_inner);

        let stored = self.store.replace_then(entity_id, record, |stored| {
            self.listeners.publish(entity_id, stored);
        });

        debug!(entity_id = %entity_id, fields = stored.len(), "Entity set");
        stored
    }

    /// Merge `fields` into an entity and notify every listener once with the
    /// final record.
    ///
    /// Listeners never observe a record with only part of `fields` applied.
    pub fn update_entity(&self, entity_id: &str, fields: Record) -> Record {
        let _shared = self.gate.read().unwrap_or_else(PoisonError::into_inner);

        let updated = fields.len();
        let stored = self.store.merge_all_then(entity_id, fields, |stored| {
            self.listeners.publish(entity_id, stored);
        });

        debug!(entity_id = %entity_id, updated, "Entity updated");
        stored
    }

    /// Record for an entity, empty if it was never written
    pub fn get_entity(&self, entity_id: &str) -> Record {
        let _shared = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        self.store.get(entity_id)
    }

    pub fn get_world(&self) -> World {
        let _shared = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        self.store.snapshot()
    }

    /// Install a whole new world. Listeners are not notified.
    pub fn replace_world(&self, world: World) {
        let _exclusive = self.gate.write().unwrap_or_else(PoisonError::into_inner);

        let entities = world.len();
        self.store.replace_world(world);

        info!(entities, "World replaced");
    }

    /// Empty the world and apply the reset policy to listeners.
    ///
    /// Returns the world as it stands afterwards (always empty).
    pub fn reset(&self) -> World {
        let _exclusive = self.gate.write().unwrap_or_else(PoisonError::into_inner);

        self.store.clear();
        match self.reset_policy {
            ResetPolicy::KeepListeners => self.listeners.clear_all(),
            ResetPolicy::DropListeners => self.listeners.clear_registrations(),
        }

        info!(policy = ?self.reset_policy, "World reset");
        self.store.snapshot()
    }

    /// Register (or reset) a listener and echo its id
    pub fn register_listener(&self, listener_id: &str) -> String {
        let _shared = self.gate.read().unwrap_or_else(PoisonError::into_inner);

        self.listeners.register(listener_id);

        info!(listener_id = %listener_id, "Listener registered");
        listener_id.to_string()
    }

    /// Everything published since the listener's last drain
    pub fn drain_listener(&self, listener_id: &str) -> Result<Bucket, WorldError> {
        let _shared = self.gate.read().unwrap_or_else(PoisonError::into_inner);

        let bucket = self.listeners.drain(listener_id)?;

        debug!(listener_id = %listener_id, entities = bucket.len(), "Listener drained");
        Ok(bucket)
    }

    pub fn entity_count(&self) -> usize {
        self.store.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for WorldService {
    fn default() -> Self {
        Self::new()
    }
}
