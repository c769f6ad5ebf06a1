pub mod monitored;
pub mod severity;

pub use monitored::code;
pub use monitored::Metadata;
pub use monitored::MonitoredError;
pub use severity::Severity;
