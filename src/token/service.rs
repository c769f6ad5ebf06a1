use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenKind;
use super::claims::TokenPair;
use super::claims::TokenPayload;
use super::errors::TokenError;
use crate::config::TokenSecrets;

/// Issuer claim stamped into, and required of, every token.
pub const ISSUER: &str = "athena-finance";

/// Audience claim stamped into, and required of, every token.
pub const AUDIENCE: &str = "athena-api";

/// Access token lifetime. Short-lived because access tokens authorize API
/// calls directly.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Refresh token lifetime. Refresh tokens can only mint new access tokens.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Signing and verification keys for one token domain.
struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Stateless issuance and verification of signed tokens for both domains.
///
/// Access and refresh tokens are signed with independent secrets, so
/// compromise of one secret cannot mint tokens for the other domain and a
/// token presented to the wrong domain fails signature validation outright.
/// Issuer, audience, lifetimes, and algorithm are fixed constants of the
/// service, not per-call inputs.
pub struct TokenService {
    access: KeyPair,
    refresh: KeyPair,
}

impl TokenService {
    /// Create a token service from the injected signing secrets.
    ///
    /// # Arguments
    /// * `secrets` - Access and refresh signing secrets, resolved at startup
    ///
    /// # Returns
    /// TokenService configured for HS256 with fixed issuer and audience
    pub fn new(secrets: &TokenSecrets) -> Self {
        Self {
            access: KeyPair::from_secret(secrets.access()),
            refresh: KeyPair::from_secret(secrets.refresh()),
        }
    }

    /// Issue a short-lived access token for `payload`.
    ///
    /// # Errors
    /// * `MissingSubject` / `MissingEmail` - the payload is incomplete
    /// * `SigningFailed` - the signing primitive failed
    pub fn issue_access_token(&self, payload: &TokenPayload) -> Result<String, TokenError> {
        self.issue(payload, TokenKind::Access)
    }

    /// Issue a long-lived refresh token for `payload`.
    ///
    /// # Errors
    /// * `MissingSubject` / `MissingEmail` - the payload is incomplete
    /// * `SigningFailed` - the signing primitive failed
    pub fn issue_refresh_token(&self, payload: &TokenPayload) -> Result<String, TokenError> {
        self.issue(payload, TokenKind::Refresh)
    }

    /// Issue an access/refresh pair for the same payload.
    ///
    /// # Errors
    /// * `MissingSubject` / `MissingEmail` - the payload is incomplete
    /// * `SigningFailed` - the signing primitive failed
    pub fn issue_token_pair(&self, payload: &TokenPayload) -> Result<TokenPair, TokenError> {
        let access_token = self.issue(payload, TokenKind::Access)?;
        let refresh_token = self.issue(payload, TokenKind::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verify an access token and recover its payload.
    ///
    /// Expiry is enforced exactly, with no clock leeway.
    ///
    /// # Errors
    /// * `InvalidToken` - the token was rejected; the concrete cause is
    ///   written to the audit log, never returned
    pub fn verify_access_token(&self, token: &str) -> Result<TokenPayload, TokenError> {
        self.verify(token, TokenKind::Access)
    }

    /// Verify a refresh token and recover its payload.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - the token was rejected; the concrete cause
    ///   is written to the audit log, never returned
    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenPayload, TokenError> {
        self.verify(token, TokenKind::Refresh)
    }

    /// Mint a fresh access token from a valid refresh token.
    ///
    /// The presented refresh token stays valid afterwards; there is no
    /// rotation, so hosts that need replay protection must keep a denylist
    /// outside this crate.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - the refresh token was rejected
    /// * `SigningFailed` - the new access token could not be signed
    pub fn refresh_access_token(&self, refresh_token: &str) -> Result<String, TokenError> {
        let payload = self.verify_refresh_token(refresh_token)?;
        self.issue_access_token(&payload)
    }

    fn issue(&self, payload: &TokenPayload, kind: TokenKind) -> Result<String, TokenError> {
        let ttl = match kind {
            TokenKind::Access => Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
            TokenKind::Refresh => Duration::days(REFRESH_TOKEN_TTL_DAYS),
        };
        self.issue_with_ttl(payload, kind, ttl)
    }

    fn issue_with_ttl(
        &self,
        payload: &TokenPayload,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        if payload.subject.is_empty() {
            return Err(TokenError::MissingSubject);
        }
        if payload.email.is_empty() {
            return Err(TokenError::MissingEmail);
        }

        let now = Utc::now();
        let claims = Claims {
            sub: payload.subject.clone(),
            email: payload.email.clone(),
            role: payload.role.clone(),
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            token_type: kind,
        };

        encode(&Header::new(ALGORITHM), &claims, &self.keys(kind).encoding)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    fn verify(&self, token: &str, kind: TokenKind) -> Result<TokenPayload, TokenError> {
        let mut validation = Validation::new(ALGORITHM);
        // No clock leeway: a token presented after its expiry instant is
        // already invalid.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.set_issuer(&[ISSUER]);
        validation.set_audience(&[AUDIENCE]);

        let token_data = decode::<Claims>(token, &self.keys(kind).decoding, &validation)
            .map_err(|e| rejected(kind, &e.to_string()))?;

        // Signature validation already separates the domains; the embedded
        // kind is checked as well so both secrets set to the same value
        // still cannot cross tokens over.
        if token_data.claims.token_type != kind {
            return Err(rejected(kind, "token type does not match domain"));
        }

        Ok(token_data.claims.into_payload())
    }

    fn keys(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}

/// Log the concrete rejection cause for the audit trail and hand back the
/// opaque per-domain error.
fn rejected(kind: TokenKind, cause: &str) -> TokenError {
    tracing::warn!(token_type = kind.as_str(), cause, "Token verification failed");

    match kind {
        TokenKind::Access => TokenError::InvalidToken,
        TokenKind::Refresh => TokenError::InvalidRefreshToken,
    }
}
