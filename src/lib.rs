//! Authentication and credential core
//!
//! Provides the stateless credential-issuance and verification engine the
//! platform's services build on:
//! - Password hashing (Argon2id) and strength enforcement
//! - Signed access/refresh token pairs with separated signing secrets
//! - A severity-classified error taxonomy with stable machine codes
//! - A monitoring adapter that counts, logs, and escalates by severity
//!
//! Every operation is synchronous and free of shared mutable state; the only
//! side effects are salt randomness and monitoring emission. Transport,
//! persistence, and session management belong to the calling services.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use athena_auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```
//!
//! ## Token Pairs
//! ```
//! use athena_auth::{TokenPayload, TokenSecrets, TokenService};
//!
//! let secrets = TokenSecrets::new(
//!     "access_secret_at_least_32_bytes_long!",
//!     "refresh_secret_at_least_32_bytes_ok!",
//! );
//! let service = TokenService::new(&secrets);
//!
//! let payload = TokenPayload::new("user123", "user@example.com");
//! let pair = service.issue_token_pair(&payload).unwrap();
//! let verified = service.verify_access_token(&pair.access_token).unwrap();
//! assert_eq!(verified.subject, "user123");
//! ```
//!
//! ## Complete Credential Flow
//! ```
//! use std::sync::Arc;
//!
//! use athena_auth::{Authenticator, Monitor, TokenPayload, TokenSecrets};
//! use prometheus::Registry;
//!
//! let secrets = TokenSecrets::new(
//!     "access_secret_at_least_32_bytes_long!",
//!     "refresh_secret_at_least_32_bytes_ok!",
//! );
//! let monitor = Arc::new(Monitor::new(&Registry::new()).unwrap());
//! let auth = Authenticator::new(&secrets, monitor);
//!
//! // Register: enforce the policy, then hash
//! let hash = auth.register_credential("Str0ng!Pass").unwrap();
//!
//! // Login: verify the credential and mint a token pair
//! let payload = TokenPayload::new("user123", "user@example.com");
//! let pair = auth.login("Str0ng!Pass", &hash, &payload).unwrap();
//!
//! // Authorize an API call with the access token
//! let identity = auth.authorize(&pair.access_token).unwrap();
//! assert_eq!(identity.subject, "user123");
//! ```

pub mod authenticator;
pub mod config;
pub mod error;
pub mod monitoring;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use config::RuntimeEnvironment;
pub use config::SecretsError;
pub use config::TokenSecrets;
pub use error::code;
pub use error::Metadata;
pub use error::MonitoredError;
pub use error::Severity;
pub use monitoring::AlertRecord;
pub use monitoring::AlertSink;
pub use monitoring::EventStatus;
pub use monitoring::Monitor;
pub use monitoring::MonitorError;
pub use monitoring::NoopAlertSink;
pub use monitoring::SecurityEvent;
pub use password::validate_password_strength;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicyResult;
pub use password::PolicyViolation;
pub use token::TokenError;
pub use token::TokenPair;
pub use token::TokenPayload;
pub use token::TokenService;
