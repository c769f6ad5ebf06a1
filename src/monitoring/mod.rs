pub mod errors;
pub mod events;
pub mod monitor;

pub use errors::MonitorError;
pub use events::AlertRecord;
pub use events::EventStatus;
pub use events::SecurityEvent;
pub use monitor::AlertSink;
pub use monitor::Monitor;
pub use monitor::NoopAlertSink;
