/// Failures surfaced by world operations.
///
/// Reads of unknown entities are not errors; only listener lookups can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// Drain requested for a listener id that was never registered
    #[error("unknown listener: {0}")]
    UnknownListener(String),
}
