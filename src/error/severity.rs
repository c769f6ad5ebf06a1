use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Ordinal urgency classification attached to every monitored error and
/// security event.
///
/// Ordering follows urgency: `Low < Medium < High < Critical`. Alerting is
/// purely a function of this value — no error or event type participates in
/// escalation decisions on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Whether this severity is expected to page an operator.
    pub fn is_alerting(self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }

    /// Lowercase label used in log lines and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_urgency() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_only_high_and_critical_alert() {
        assert!(!Severity::Low.is_alerting());
        assert!(!Severity::Medium.is_alerting());
        assert!(Severity::High.is_alerting());
        assert!(Severity::Critical.is_alerting());
    }

    #[test]
    fn test_lowercase_labels() {
        assert_eq!(Severity::High.to_string(), "high");
        assert_eq!(
            serde_json::to_string(&Severity::Critical).expect("Failed to serialize severity"),
            "\"critical\""
        );
    }
}
