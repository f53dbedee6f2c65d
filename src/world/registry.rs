use crate::world::error::WorldError;
use crate::world::record::{Bucket, Record};
use dashmap::DashMap;

/// Independent observer buckets, each holding the latest snapshot per
/// entity since it was last drained
pub struct ListenerRegistry {
    buckets: DashMap<String, Bucket>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    /// Create an empty bucket, or reset an existing one
    pub fn register(&self, listener_id: &str) {
        self.buckets.insert(listener_id.to_string(), Bucket::new());
    }

    /// Store `record` as the latest snapshot of `entity_id` in every bucket.
    ///
    /// An unread snapshot of the same entity is replaced, never queued.
    pub fn publish(&self, entity_id: &str, record: &Record) {
        for mut bucket in self.buckets.iter_mut() {
            bucket.insert(entity_id.to_string(), record.clone());
        }
    }

    /// Take everything accumulated for a listener and leave its bucket empty
    pub fn drain(&self, listener_id: &str) -> Result<Bucket, WorldError> {
        let mut bucket = self
            .buckets
            .get_mut(listener_id)
            .ok_or_else(|| WorldError::UnknownListener(listener_id.to_string()))?;
        Ok(std::mem::take(bucket.value_mut()))
    }

    /// Empty every bucket; registrations survive
    pub fn clear_all(&self) {
        for mut bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
    }

    /// Forget every listener
    pub fn clear_registrations(&self) {
        self.buckets.clear();
    }

    pub fn is_registered(&self, listener_id: &str) -> bool {
        self.buckets.contains_key(listener_id)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
