use serde_json::{Map, Value};
use std::collections::HashMap;

/// Field map of a single entity (field name -> any JSON value)
pub type Record = Map<String, Value>;

/// Every entity currently in the world, keyed by entity id
pub type World = HashMap<String, Record>;

/// Latest unread snapshot per entity for one listener
pub type Bucket = HashMap<String, Record>;
