use std::sync::Arc;

use prometheus::IntCounterVec;
use prometheus::Opts;
use prometheus::Registry;
use serde_json::Value;

use super::errors::MonitorError;
use super::events::AlertRecord;
use super::events::EventStatus;
use super::events::SecurityEvent;
use crate::error::Metadata;
use crate::error::Severity;

/// Delivery port for operator-facing alerts.
///
/// The monitor already counts and logs every alert itself; implementations
/// only forward the record to whatever paging or ticketing integration the
/// host runs.
pub trait AlertSink: Send + Sync {
    fn deliver(&self, alert: &AlertRecord);
}

/// Sink used when no alerting integration is configured. Alerts still reach
/// the log and the alert counter.
#[derive(Debug, Default)]
pub struct NoopAlertSink;

impl AlertSink for NoopAlertSink {
    fn deliver(&self, _alert: &AlertRecord) {}
}

/// Monitoring adapter: counters plus structured log lines for business,
/// authentication, and security activity.
///
/// Counters are registered on an injected registry rather than a process
/// global, so hosts control exposition and tests run isolated. Whether an
/// event escalates to an alert is purely a function of its severity.
pub struct Monitor {
    business_events: IntCounterVec,
    auth_failures: IntCounterVec,
    security_events: IntCounterVec,
    alerts: IntCounterVec,
    sink: Arc<dyn AlertSink>,
}

impl Monitor {
    /// Create a monitor with its counters registered on `registry` and no
    /// external alert delivery.
    ///
    /// # Errors
    /// * `Registration` - a counter could not be registered
    pub fn new(registry: &Registry) -> Result<Self, MonitorError> {
        Self::with_sink(registry, Arc::new(NoopAlertSink))
    }

    /// Create a monitor that also delivers every alert record to `sink`.
    ///
    /// # Errors
    /// * `Registration` - a counter could not be registered
    pub fn with_sink(registry: &Registry, sink: Arc<dyn AlertSink>) -> Result<Self, MonitorError> {
        let business_events = IntCounterVec::new(
            Opts::new(
                "auth_business_events_total",
                "Business events by type and outcome",
            ),
            &["type", "status"],
        )?;
        let auth_failures = IntCounterVec::new(
            Opts::new("auth_failures_total", "Authentication failures by reason"),
            &["reason"],
        )?;
        let security_events = IntCounterVec::new(
            Opts::new(
                "auth_security_events_total",
                "Security events by category and risk level",
            ),
            &["category", "risk"],
        )?;
        let alerts = IntCounterVec::new(
            Opts::new("auth_alerts_total", "Alerts raised by type and severity"),
            &["type", "severity"],
        )?;

        registry.register(Box::new(business_events.clone()))?;
        registry.register(Box::new(auth_failures.clone()))?;
        registry.register(Box::new(security_events.clone()))?;
        registry.register(Box::new(alerts.clone()))?;

        Ok(Self {
            business_events,
            auth_failures,
            security_events,
            alerts,
            sink,
        })
    }

    /// Record the outcome of a business operation.
    pub fn track_business_event(&self, event_type: &str, status: EventStatus, metadata: Metadata) {
        self.business_events
            .with_label_values(&[event_type, status.as_str()])
            .inc();

        // Bound outside the macro: tracing's expansion scope would resolve a
        // bare `Value` to its own field trait.
        let metadata = Value::Object(metadata);
        tracing::info!(event_type, status = status.as_str(), %metadata, "Business event");
    }

    /// Record an authentication failure.
    ///
    /// Always logged at warn level with high priority, whatever the reason.
    /// The email, when present, goes to the log line for the audit trail
    /// only; it never becomes a metric label.
    pub fn track_auth_failure(&self, reason: &str, email: Option<&str>) {
        self.auth_failures.with_label_values(&[reason]).inc();

        tracing::warn!(reason, email, priority = "high", "Authentication failure");
    }

    /// Record a security event, escalating high-risk ones to an alert.
    ///
    /// # Returns
    /// The alert record when the risk level crossed the alerting threshold,
    /// `None` otherwise. At most one alert is raised per event.
    pub fn track_security_event(
        &self,
        category: &str,
        details: Metadata,
        risk: Severity,
    ) -> Option<AlertRecord> {
        let event = SecurityEvent::new(category, risk, details);

        self.security_events
            .with_label_values(&[category, risk.as_str()])
            .inc();

        let metadata = Value::Object(event.metadata.clone());
        tracing::warn!(
            category = %event.category,
            risk = %event.severity,
            %metadata,
            "Security event"
        );

        if !event.severity.is_alerting() {
            return None;
        }

        let message = format!("Security event: {}", event.category);
        Some(self.create_alert(&event.category, &message, event.severity, event.metadata))
    }

    /// Raise an operator-facing alert.
    ///
    /// The record is counted, logged at error level when the severity is
    /// alerting (warn otherwise), delivered to the sink, and returned to
    /// the caller. `requires_action` is derived from the severity.
    pub fn create_alert(
        &self,
        alert_type: &str,
        message: &str,
        severity: Severity,
        metadata: Metadata,
    ) -> AlertRecord {
        let alert = AlertRecord::new(alert_type, message, severity, metadata);

        self.alerts
            .with_label_values(&[alert_type, severity.as_str()])
            .inc();

        if alert.requires_action {
            tracing::error!(
                alert_type,
                severity = severity.as_str(),
                requires_action = alert.requires_action,
                message,
                "Alert raised"
            );
        } else {
            tracing::warn!(
                alert_type,
                severity = severity.as_str(),
                requires_action = alert.requires_action,
                message,
                "Alert raised"
            );
        }

        self.sink.deliver(&alert);
        alert
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;

    mock! {
        pub TestAlertSink {}

        impl AlertSink for TestAlertSink {
            fn deliver(&self, alert: &AlertRecord);
        }
    }

    fn test_monitor(registry: &Registry) -> Monitor {
        Monitor::new(registry).expect("Failed to create monitor")
    }

    #[test]
    fn test_business_events_count_by_type_and_status() {
        let registry = Registry::new();
        let monitor = test_monitor(&registry);

        monitor.track_business_event("login", EventStatus::Success, Metadata::new());
        monitor.track_business_event("login", EventStatus::Success, Metadata::new());
        monitor.track_business_event("login", EventStatus::Failure, Metadata::new());

        assert_eq!(
            monitor
                .business_events
                .with_label_values(&["login", "success"])
                .get(),
            2
        );
        assert_eq!(
            monitor
                .business_events
                .with_label_values(&["login", "failure"])
                .get(),
            1
        );
    }

    #[test]
    fn test_auth_failures_count_by_reason() {
        let registry = Registry::new();
        let monitor = test_monitor(&registry);

        monitor.track_auth_failure("invalid_credentials", Some("user@example.com"));
        monitor.track_auth_failure("invalid_credentials", None);
        monitor.track_auth_failure("invalid_refresh_token", None);

        assert_eq!(
            monitor
                .auth_failures
                .with_label_values(&["invalid_credentials"])
                .get(),
            2
        );
        assert_eq!(
            monitor
                .auth_failures
                .with_label_values(&["invalid_refresh_token"])
                .get(),
            1
        );
    }

    #[test]
    fn test_high_risk_security_event_raises_exactly_one_alert() {
        let registry = Registry::new();
        let mut sink = MockTestAlertSink::new();
        sink.expect_deliver()
            .withf(|alert| alert.alert_type == "bruteforce" && alert.requires_action)
            .times(1)
            .returning(|_| ());

        let monitor =
            Monitor::with_sink(&registry, Arc::new(sink)).expect("Failed to create monitor");

        let mut details = Metadata::new();
        details.insert("attempts".to_string(), serde_json::json!(14));

        let alert = monitor.track_security_event("bruteforce", details, Severity::High);

        let alert = alert.expect("High risk event must produce an alert");
        assert!(alert.requires_action);
        assert_eq!(alert.severity, Severity::High);
        assert_eq!(alert.metadata["attempts"], serde_json::json!(14));
        assert_eq!(
            monitor
                .alerts
                .with_label_values(&["bruteforce", "high"])
                .get(),
            1
        );
        assert_eq!(
            monitor
                .security_events
                .with_label_values(&["bruteforce", "high"])
                .get(),
            1
        );
    }

    #[test]
    fn test_low_risk_security_event_does_not_alert() {
        let registry = Registry::new();
        let mut sink = MockTestAlertSink::new();
        sink.expect_deliver().never();

        let monitor =
            Monitor::with_sink(&registry, Arc::new(sink)).expect("Failed to create monitor");

        let alert = monitor.track_security_event("port_scan", Metadata::new(), Severity::Low);

        assert!(alert.is_none());
        assert_eq!(
            monitor
                .security_events
                .with_label_values(&["port_scan", "low"])
                .get(),
            1
        );
        assert_eq!(
            monitor.alerts.with_label_values(&["port_scan", "low"]).get(),
            0
        );
    }

    #[test]
    fn test_direct_alert_below_threshold_is_informational() {
        let registry = Registry::new();
        let mut sink = MockTestAlertSink::new();
        sink.expect_deliver()
            .withf(|alert| !alert.requires_action)
            .times(1)
            .returning(|_| ());

        let monitor =
            Monitor::with_sink(&registry, Arc::new(sink)).expect("Failed to create monitor");

        let alert = monitor.create_alert(
            "quota",
            "Token issuance near quota",
            Severity::Medium,
            Metadata::new(),
        );

        assert!(!alert.requires_action);
        assert_eq!(alert.message, "Token issuance near quota");
    }

    #[test]
    fn test_counters_collide_on_shared_registry() {
        let registry = Registry::new();
        let _first = test_monitor(&registry);

        let second = Monitor::new(&registry);
        assert!(matches!(second, Err(MonitorError::Registration(_))));
    }
}
