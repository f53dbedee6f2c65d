use super::WorldConfig;
use crate::world::ResetPolicy;
use std::path::PathBuf;
use tracing::warn;

impl WorldConfig {
    /// Override fields from `WORLDSTATE_*` env vars.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env(self) -> Self {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    pub(crate) fn apply_vars<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var("WORLDSTATE_HOST") {
            self.server.host = v;
        }
        if let Some(v) = var("WORLDSTATE_PORT") {
            match v.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %v, "Ignoring invalid WORLDSTATE_PORT"),
            }
        }
        if let Some(v) = var("WORLDSTATE_STATIC_DIR") {
            self.server.static_dir = PathBuf::from(v);
        }
        if let Some(v) = var("WORLDSTATE_BODY_SIZE_LIMIT_BYTES") {
            match v.parse::<usize>() {
                Ok(n) => self.api.body_size_limit_bytes = n,
                Err(_) => warn!(value = %v, "Ignoring invalid WORLDSTATE_BODY_SIZE_LIMIT_BYTES"),
            }
        }
        if let Some(v) = var("WORLDSTATE_RESET_POLICY") {
            match parse_reset_policy(&v) {
                Some(policy) => self.listeners.reset_policy = policy,
                None => warn!(value = %v, "Ignoring invalid WORLDSTATE_RESET_POLICY"),
            }
        }

        self
    }
}

fn parse_reset_policy(value: &str) -> Option<ResetPolicy> {
    match value {
        "keep_listeners" => Some(ResetPolicy::KeepListeners),
        "drop_listeners" => Some(ResetPolicy::DropListeners),
        _ => None,
    }
}
