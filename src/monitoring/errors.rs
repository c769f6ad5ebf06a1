use thiserror::Error;

/// Error type for monitor construction.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A counter could not be registered, typically a name collision on a
    /// registry shared with another component.
    #[error("Failed to register metrics collector: {0}")]
    Registration(#[from] prometheus::Error),
}
