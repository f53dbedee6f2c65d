// World state: entity store, listener buckets and the service tying them together

mod error;
mod record;
mod registry;
mod service;
mod store;

pub use error::WorldError;
pub use record::{Bucket, Record, World};
pub use registry::ListenerRegistry;
pub use service::{ResetPolicy, WorldService};
pub use store::EntityStore;

#[cfg(test)]
mod tests;
