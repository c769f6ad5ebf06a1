use std::sync::Arc;

use serde_json::Value;

use crate::config::TokenSecrets;
use crate::error::Metadata;
use crate::error::MonitoredError;
use crate::monitoring::EventStatus;
use crate::monitoring::Monitor;
use crate::password::validate_password_strength;
use crate::password::PasswordHasher;
use crate::token::TokenPair;
use crate::token::TokenPayload;
use crate::token::TokenService;

/// Credential flow coordinator combining the password and token services
/// with monitoring.
///
/// Every failure is classified into a [`MonitoredError`] and reported to the
/// monitor before it crosses the crate boundary, so callers receive exactly
/// one typed, severity-carrying error per operation and the observability
/// pipeline sees every outcome. Fatal faults (hashing or signing breakage)
/// additionally raise an alert; authentication failures are counted and
/// logged but stay opaque to the caller.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
    monitor: Arc<Monitor>,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secrets` - Access and refresh signing secrets, resolved at startup
    /// * `monitor` - Monitoring adapter every outcome is reported to
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(secrets: &TokenSecrets, monitor: Arc<Monitor>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(secrets),
            monitor,
        }
    }

    /// Validate a new password against the strength policy and hash it for
    /// storage.
    ///
    /// # Arguments
    /// * `password` - Candidate plaintext password
    ///
    /// # Returns
    /// PHC string hash ready for storage
    ///
    /// # Errors
    /// * `BusinessLogic` - the password violates the strength policy; the
    ///   metadata carries every violation at once
    /// * `Generic` (code `HASHING_FAILURE`, critical) - the hashing
    ///   primitive failed; an alert is raised
    pub fn register_credential(&self, password: &str) -> Result<String, MonitoredError> {
        let policy = validate_password_strength(password);
        if !policy.is_valid() {
            let violations: Vec<Value> = policy
                .violations()
                .iter()
                .map(|v| Value::String(v.to_string()))
                .collect();
            let mut metadata = Metadata::new();
            metadata.insert("violations".to_string(), Value::Array(violations));

            self.monitor.track_business_event(
                "credential_registration",
                EventStatus::Failure,
                metadata.clone(),
            );

            return Err(MonitoredError::business("Password does not meet the strength policy")
                .with_metadata(metadata));
        }

        let hash = self
            .password_hasher
            .hash(password)
            .map_err(|e| self.fatal(MonitoredError::from(e)))?;

        self.monitor
            .track_business_event("credential_registration", EventStatus::Success, Metadata::new());

        Ok(hash)
    }

    /// Verify a credential and mint a token pair for the subject.
    ///
    /// A wrong password and a malformed stored hash are indistinguishable
    /// here: both surface as the same opaque security error, and the attempt
    /// is recorded as an authentication failure.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash for the subject
    /// * `payload` - Identity to embed in the issued tokens
    ///
    /// # Returns
    /// Access/refresh token pair; issuance is atomic, no partial pair exists
    ///
    /// # Errors
    /// * `Security` - the credential was rejected
    /// * `BusinessLogic` - the payload is missing its subject or email
    /// * `Generic` (critical) - the signing primitive failed; an alert is
    ///   raised
    pub fn login(
        &self,
        password: &str,
        stored_hash: &str,
        payload: &TokenPayload,
    ) -> Result<TokenPair, MonitoredError> {
        if !self.password_hasher.verify(password, stored_hash) {
            self.monitor
                .track_auth_failure("invalid_credentials", Some(&payload.email));

            return Err(MonitoredError::security("Invalid credentials"));
        }

        let pair = self
            .token_service
            .issue_token_pair(payload)
            .map_err(|e| self.fatal(MonitoredError::from(e)))?;

        let mut metadata = Metadata::new();
        metadata.insert("subject".to_string(), Value::String(payload.subject.clone()));
        self.monitor
            .track_business_event("login", EventStatus::Success, metadata);

        Ok(pair)
    }

    /// Mint a fresh access token from a refresh token.
    ///
    /// # Arguments
    /// * `refresh_token` - Refresh token presented by the caller
    ///
    /// # Returns
    /// New signed access token; the refresh token stays valid (no rotation)
    ///
    /// # Errors
    /// * `Security` - the refresh token was rejected; no access token is
    ///   issued
    /// * `Generic` (critical) - the new token could not be signed
    pub fn refresh(&self, refresh_token: &str) -> Result<String, MonitoredError> {
        self.token_service
            .refresh_access_token(refresh_token)
            .map_err(|e| match MonitoredError::from(e) {
                error @ MonitoredError::Security { .. } => {
                    self.monitor.track_auth_failure("invalid_refresh_token", None);
                    error
                }
                error => self.fatal(error),
            })
    }

    /// Verify an access token and recover the identity it carries.
    ///
    /// # Arguments
    /// * `access_token` - Bearer token presented by the caller
    ///
    /// # Returns
    /// The embedded payload when the token is valid
    ///
    /// # Errors
    /// * `Security` - the token was rejected; the cause is in the audit log
    pub fn authorize(&self, access_token: &str) -> Result<TokenPayload, MonitoredError> {
        self.token_service.verify_access_token(access_token).map_err(|e| {
            self.monitor.track_auth_failure("invalid_access_token", None);
            MonitoredError::from(e)
        })
    }

    /// Report a non-recoverable fault: alerting severities raise an
    /// operator-facing alert before the error is handed back.
    fn fatal(&self, error: MonitoredError) -> MonitoredError {
        if error.severity().is_alerting() {
            let metadata = error.metadata().cloned().unwrap_or_default();
            self.monitor
                .create_alert(error.code(), &error.to_string(), error.severity(), metadata);
        }
        error
    }
}
