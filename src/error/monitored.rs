use serde_json::Value;
use thiserror::Error;

use super::severity::Severity;
use crate::password::PasswordError;
use crate::token::TokenError;

/// Contextual key-value detail attached to errors, events, and alerts.
pub type Metadata = serde_json::Map<String, Value>;

/// Stable machine-readable error codes.
///
/// Callers and dashboards match on these values, so they are part of the
/// public contract: new codes may be added, existing ones are never renamed
/// or repurposed.
pub mod code {
    /// A domain rule was violated (validation failures, policy rejections).
    pub const BUSINESS_LOGIC_ERROR: &str = "BUSINESS_LOGIC_ERROR";
    /// A security boundary was touched (bad credentials, invalid tokens).
    pub const SECURITY_ERROR: &str = "SECURITY_ERROR";
    /// An external dependency misbehaved.
    pub const INTEGRATION_ERROR: &str = "INTEGRATION_ERROR";
    /// The password hashing primitive failed.
    pub const HASHING_FAILURE: &str = "HASHING_FAILURE";
    /// A token could not be signed.
    pub const TOKEN_SIGNING_FAILURE: &str = "TOKEN_SIGNING_FAILURE";
    /// Catch-all for faults with no more specific classification.
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Classified error carried across every fallible boundary of the crate.
///
/// Each variant has a fixed code and a default severity assigned at
/// construction. Severity may be escalated afterwards but never lowered,
/// so a classification cannot silently lose urgency on its way up the
/// stack.
#[derive(Debug, Clone, Error)]
pub enum MonitoredError {
    /// Fault that fits no fixed category; carries its own code and severity.
    #[error("{message}")]
    Generic {
        message: String,
        code: String,
        severity: Severity,
        metadata: Option<Metadata>,
    },

    /// A domain rule was violated. Defaults to medium severity.
    #[error("{message}")]
    BusinessLogic {
        message: String,
        severity: Severity,
        metadata: Option<Metadata>,
    },

    /// A security boundary was touched. Defaults to high severity.
    #[error("{message}")]
    Security {
        message: String,
        severity: Severity,
        metadata: Option<Metadata>,
    },

    /// An external dependency misbehaved. Defaults to medium severity; the
    /// failing service is always present in the metadata.
    #[error("{service}: {message}")]
    Integration {
        service: String,
        message: String,
        severity: Severity,
        metadata: Option<Metadata>,
    },
}

impl MonitoredError {
    /// Create a generic error with an explicit code and severity.
    pub fn generic(
        message: impl Into<String>,
        code: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self::Generic {
            message: message.into(),
            code: code.into(),
            severity,
            metadata: None,
        }
    }

    /// Create a business-logic error at its default (medium) severity.
    pub fn business(message: impl Into<String>) -> Self {
        Self::BusinessLogic {
            message: message.into(),
            severity: Severity::Medium,
            metadata: None,
        }
    }

    /// Create a security error at its default (high) severity.
    pub fn security(message: impl Into<String>) -> Self {
        Self::Security {
            message: message.into(),
            severity: Severity::High,
            metadata: None,
        }
    }

    /// Create an integration error at its default (medium) severity.
    ///
    /// The name of the failing service is recorded in the metadata so it
    /// survives into log lines and alert records.
    pub fn integration(service: impl Into<String>, message: impl Into<String>) -> Self {
        let service = service.into();
        let mut metadata = Metadata::new();
        metadata.insert("service".to_string(), Value::String(service.clone()));

        Self::Integration {
            service,
            message: message.into(),
            severity: Severity::Medium,
            metadata: Some(metadata),
        }
    }

    /// Attach contextual metadata, merging with any entries already present.
    #[must_use]
    pub fn with_metadata(mut self, entries: Metadata) -> Self {
        let slot = self.metadata_slot();
        match slot {
            Some(existing) => existing.extend(entries),
            None => *slot = Some(entries),
        }
        self
    }

    /// Raise the severity to at least `floor`.
    ///
    /// Escalation is one-way: a `floor` below the current severity leaves
    /// the error unchanged.
    #[must_use]
    pub fn escalate(mut self, floor: Severity) -> Self {
        let severity = self.severity_mut();
        if floor > *severity {
            *severity = floor;
        }
        self
    }

    /// The stable machine-readable code for this error.
    pub fn code(&self) -> &str {
        match self {
            Self::Generic { code, .. } => code,
            Self::BusinessLogic { .. } => code::BUSINESS_LOGIC_ERROR,
            Self::Security { .. } => code::SECURITY_ERROR,
            Self::Integration { .. } => code::INTEGRATION_ERROR,
        }
    }

    /// The current severity classification.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Generic { severity, .. }
            | Self::BusinessLogic { severity, .. }
            | Self::Security { severity, .. }
            | Self::Integration { severity, .. } => *severity,
        }
    }

    /// Contextual metadata attached to this error, if any.
    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            Self::Generic { metadata, .. }
            | Self::BusinessLogic { metadata, .. }
            | Self::Security { metadata, .. }
            | Self::Integration { metadata, .. } => metadata.as_ref(),
        }
    }

    fn severity_mut(&mut self) -> &mut Severity {
        match self {
            Self::Generic { severity, .. }
            | Self::BusinessLogic { severity, .. }
            | Self::Security { severity, .. }
            | Self::Integration { severity, .. } => severity,
        }
    }

    fn metadata_slot(&mut self) -> &mut Option<Metadata> {
        match self {
            Self::Generic { metadata, .. }
            | Self::BusinessLogic { metadata, .. }
            | Self::Security { metadata, .. }
            | Self::Integration { metadata, .. } => metadata,
        }
    }
}

impl From<TokenError> for MonitoredError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::InvalidToken | TokenError::InvalidRefreshToken => {
                Self::security(error.to_string())
            }
            TokenError::MissingSubject | TokenError::MissingEmail => {
                Self::business(error.to_string())
            }
            TokenError::SigningFailed(_) => Self::generic(
                error.to_string(),
                code::TOKEN_SIGNING_FAILURE,
                Severity::Critical,
            ),
        }
    }
}

impl From<PasswordError> for MonitoredError {
    fn from(error: PasswordError) -> Self {
        match error {
            PasswordError::HashingFailed(_) => {
                Self::generic(error.to_string(), code::HASHING_FAILURE, Severity::Critical)
            }
        }
    }
}

impl From<anyhow::Error> for MonitoredError {
    fn from(error: anyhow::Error) -> Self {
        Self::generic(error.to_string(), code::INTERNAL_ERROR, Severity::High)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_codes_and_severities() {
        let business = MonitoredError::business("duplicate registration");
        assert_eq!(business.code(), code::BUSINESS_LOGIC_ERROR);
        assert_eq!(business.severity(), Severity::Medium);

        let security = MonitoredError::security("invalid credentials");
        assert_eq!(security.code(), code::SECURITY_ERROR);
        assert_eq!(security.severity(), Severity::High);

        let integration = MonitoredError::integration("ledger-api", "timed out");
        assert_eq!(integration.code(), code::INTEGRATION_ERROR);
        assert_eq!(integration.severity(), Severity::Medium);
    }

    #[test]
    fn test_integration_metadata_names_the_service() {
        let error = MonitoredError::integration("ledger-api", "timed out");
        let metadata = error.metadata().expect("Integration error has metadata");

        assert_eq!(metadata["service"], json!("ledger-api"));
        assert_eq!(error.to_string(), "ledger-api: timed out");
    }

    #[test]
    fn test_with_metadata_merges_and_keeps_service_entry() {
        let mut extra = Metadata::new();
        extra.insert("attempt".to_string(), json!(3));

        let error = MonitoredError::integration("ledger-api", "timed out").with_metadata(extra);
        let metadata = error.metadata().expect("Integration error has metadata");

        assert_eq!(metadata["service"], json!("ledger-api"));
        assert_eq!(metadata["attempt"], json!(3));
    }

    #[test]
    fn test_escalate_raises_but_never_lowers() {
        let escalated = MonitoredError::business("rule violated").escalate(Severity::Critical);
        assert_eq!(escalated.severity(), Severity::Critical);

        let unchanged = MonitoredError::security("probe detected").escalate(Severity::Low);
        assert_eq!(unchanged.severity(), Severity::High);
    }

    #[test]
    fn test_token_errors_map_to_fixed_classifications() {
        let invalid = MonitoredError::from(TokenError::InvalidToken);
        assert!(matches!(invalid, MonitoredError::Security { .. }));
        assert_eq!(invalid.severity(), Severity::High);

        let missing = MonitoredError::from(TokenError::MissingSubject);
        assert!(matches!(missing, MonitoredError::BusinessLogic { .. }));

        let signing = MonitoredError::from(TokenError::SigningFailed("boom".to_string()));
        assert_eq!(signing.code(), code::TOKEN_SIGNING_FAILURE);
        assert_eq!(signing.severity(), Severity::Critical);
    }

    #[test]
    fn test_hashing_failure_is_critical() {
        let error = MonitoredError::from(PasswordError::HashingFailed("oom".to_string()));
        assert_eq!(error.code(), code::HASHING_FAILURE);
        assert_eq!(error.severity(), Severity::Critical);
    }

    #[test]
    fn test_anyhow_falls_back_to_internal_error() {
        let error = MonitoredError::from(anyhow::anyhow!("wire crossed"));
        assert_eq!(error.code(), code::INTERNAL_ERROR);
        assert_eq!(error.severity(), Severity::High);
        assert_eq!(error.to_string(), "wire crossed");
    }
}
