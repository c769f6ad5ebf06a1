use std::env;
use std::fmt;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use thiserror::Error;

/// Minimum secret length accepted in production. HS256 wants at least
/// 256 bits of key material.
const MIN_SECRET_BYTES: usize = 32;

/// Development fallback secrets. Deliberately self-describing so a token
/// signed with one of these is recognizable on sight.
const DEV_ACCESS_TOKEN_SECRET: &str = "dev-only-access-token-secret-do-not-deploy!!";
const DEV_REFRESH_TOKEN_SECRET: &str = "dev-only-refresh-token-secret-do-not-deploy!";

/// Deployment environment the library is running in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(self) -> bool {
        matches!(self, RuntimeEnvironment::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeEnvironment::Development => "development",
            RuntimeEnvironment::Production => "production",
        }
    }
}

impl fmt::Display for RuntimeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for signing-secret resolution at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretsError {
    #[error("{name} must be set in production")]
    MissingSecret { name: &'static str },

    #[error("{name} is a development default; production must supply its own value")]
    DevDefaultInProduction { name: &'static str },

    #[error("{name} must be at least {min} bytes in production")]
    SecretTooShort { name: &'static str, min: usize },
}

/// Signing secrets for the two token domains.
///
/// An explicit value handed to `TokenService::new`, not ambient process
/// state: construction is the only place secret material enters the crate,
/// nothing reads it back out, and the Debug representation is redacted.
#[derive(Clone)]
pub struct TokenSecrets {
    access: String,
    refresh: String,
}

impl TokenSecrets {
    /// Create secrets from values the host resolved itself.
    ///
    /// Prefer [`AuthConfig::token_secrets`], which enforces the production
    /// safety checks; this constructor applies none.
    pub fn new(access: impl ToString, refresh: impl ToString) -> Self {
        Self {
            access: access.to_string(),
            refresh: refresh.to_string(),
        }
    }

    pub(crate) fn access(&self) -> &[u8] {
        self.access.as_bytes()
    }

    pub(crate) fn refresh(&self) -> &[u8] {
        self.refresh.as_bytes()
    }
}

impl fmt::Debug for TokenSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSecrets").finish_non_exhaustive()
    }
}

/// Library configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Secret for signing access tokens.
    pub access_token_secret: Option<String>,

    /// Secret for signing refresh tokens.
    pub refresh_token_secret: Option<String>,
}

impl AuthConfig {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (ENVIRONMENT, ACCESS_TOKEN_SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: ACCESS_TOKEN_SECRET=... overrides access_token_secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: AuthConfig = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Resolve the token signing secrets for this configuration.
    ///
    /// In development a missing secret falls back to a built-in value and a
    /// warning is logged per affected secret. In production the checks are
    /// hard errors instead: secrets must be present, must not equal a
    /// development fallback, and must be at least 32 bytes, so a deployment
    /// can never silently run on fallback key material.
    ///
    /// # Errors
    /// * `MissingSecret` - production with no configured value
    /// * `DevDefaultInProduction` - production configured with a fallback value
    /// * `SecretTooShort` - production value below the minimum length
    pub fn token_secrets(&self) -> Result<TokenSecrets, SecretsError> {
        let access = self.resolve_secret(
            "access_token_secret",
            self.access_token_secret.as_deref(),
            DEV_ACCESS_TOKEN_SECRET,
        )?;
        let refresh = self.resolve_secret(
            "refresh_token_secret",
            self.refresh_token_secret.as_deref(),
            DEV_REFRESH_TOKEN_SECRET,
        )?;

        Ok(TokenSecrets { access, refresh })
    }

    fn resolve_secret(
        &self,
        name: &'static str,
        configured: Option<&str>,
        dev_default: &str,
    ) -> Result<String, SecretsError> {
        match configured {
            Some(value) if self.environment.is_production() => {
                if value == DEV_ACCESS_TOKEN_SECRET || value == DEV_REFRESH_TOKEN_SECRET {
                    return Err(SecretsError::DevDefaultInProduction { name });
                }
                if value.len() < MIN_SECRET_BYTES {
                    return Err(SecretsError::SecretTooShort {
                        name,
                        min: MIN_SECRET_BYTES,
                    });
                }
                Ok(value.to_string())
            }
            Some(value) => Ok(value.to_string()),
            None if self.environment.is_production() => {
                Err(SecretsError::MissingSecret { name })
            }
            None => {
                tracing::warn!(
                    secret = name,
                    environment = %self.environment,
                    "Falling back to built-in development secret; never deploy this configuration"
                );
                Ok(dev_default.to_string())
            }
        }
    }
}
