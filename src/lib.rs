// Entity store, listener buckets and the world service
pub mod world;

// HTTP adapter
pub mod api;

// TOML + environment configuration
pub mod config;
