use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::error::Metadata;
use crate::error::Severity;

/// Outcome label for business events.
///
/// Closed on purpose: the value becomes a metric label, and free-form
/// outcome strings would blow up counter cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Success,
    Failure,
}

impl EventStatus {
    /// Lowercase label used in log lines and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Success => "success",
            EventStatus::Failure => "failure",
        }
    }
}

/// Security-relevant occurrence recorded by the monitor.
///
/// Captured once, timestamped at creation, and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityEvent {
    pub category: String,
    pub severity: Severity,
    pub metadata: Metadata,
    pub timestamp: DateTime<Utc>,
}

impl SecurityEvent {
    pub fn new(category: impl ToString, severity: Severity, metadata: Metadata) -> Self {
        Self {
            category: category.to_string(),
            severity,
            metadata,
            timestamp: Utc::now(),
        }
    }
}

/// Operator-facing alert produced when severity crosses the alerting
/// threshold.
#[derive(Debug, Clone, Serialize)]
pub struct AlertRecord {
    pub alert_type: String,
    pub message: String,
    pub severity: Severity,
    /// Set exactly when the severity is alerting (high or critical).
    pub requires_action: bool,
    pub metadata: Metadata,
    pub timestamp: DateTime<Utc>,
}

impl AlertRecord {
    /// Create an alert record; `requires_action` is derived from the
    /// severity, never chosen by the caller.
    pub fn new(
        alert_type: impl ToString,
        message: impl ToString,
        severity: Severity,
        metadata: Metadata,
    ) -> Self {
        Self {
            alert_type: alert_type.to_string(),
            message: message.to_string(),
            severity,
            requires_action: severity.is_alerting(),
            metadata,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_action_follows_severity() {
        let low = AlertRecord::new("probe", "scanner traffic", Severity::Low, Metadata::new());
        assert!(!low.requires_action);

        let critical = AlertRecord::new(
            "breach",
            "signing key misuse",
            Severity::Critical,
            Metadata::new(),
        );
        assert!(critical.requires_action);
    }

    #[test]
    fn test_event_status_labels() {
        assert_eq!(EventStatus::Success.as_str(), "success");
        assert_eq!(EventStatus::Failure.as_str(), "failure");
    }

    #[test]
    fn test_security_event_serializes_with_metadata() {
        let mut metadata = Metadata::new();
        metadata.insert("attempts".to_string(), serde_json::json!(7));

        let event = SecurityEvent::new("bruteforce", Severity::High, metadata);
        let json = serde_json::to_value(&event).expect("Failed to serialize security event");

        assert_eq!(json["category"], "bruteforce");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["metadata"]["attempts"], 7);
    }
}
