use std::hash::Hash;
use std::hash::Hasher;

use serde::Deserialize;
use serde::Serialize;

/// Identity carried by every issued token.
///
/// A payload is immutable once embedded in a signed token. Equality and
/// hashing follow the subject identifier alone: two payloads for the same
/// subject compare equal even when email or role drifted between issuance
/// and verification.
#[derive(Debug, Clone)]
pub struct TokenPayload {
    /// Stable subject (user) identifier.
    pub subject: String,

    /// Email address at issuance time.
    pub email: String,

    /// Authorization role, when one is assigned.
    pub role: Option<String>,
}

impl TokenPayload {
    /// Create a payload without a role.
    pub fn new(subject: impl ToString, email: impl ToString) -> Self {
        Self {
            subject: subject.to_string(),
            email: email.to_string(),
            role: None,
        }
    }

    /// Set the authorization role.
    pub fn with_role(mut self, role: impl ToString) -> Self {
        self.role = Some(role.to_string());
        self
    }
}

impl PartialEq for TokenPayload {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
    }
}

impl Eq for TokenPayload {}

impl Hash for TokenPayload {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.subject.hash(state);
    }
}

/// Access/refresh token pair minted together at login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// The two token domains, embedded in claims as `token_type`.
///
/// Each domain is signed with its own secret, so the embedded kind is a
/// second line of defense behind signature validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// Wire-format claims: RFC 7519 registered names plus the platform fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Email address of the subject
    pub email: String,

    /// Authorization role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Token domain discriminator
    pub token_type: TokenKind,
}

impl Claims {
    /// Recover the payload from verified claims.
    pub fn into_payload(self) -> TokenPayload {
        TokenPayload {
            subject: self.sub,
            email: self.email,
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_payload_equality_follows_subject() {
        let original = TokenPayload::new("user-1", "old@example.com");
        let drifted = TokenPayload::new("user-1", "new@example.com").with_role("admin");

        assert_eq!(original, drifted);
        assert_ne!(original, TokenPayload::new("user-2", "old@example.com"));
    }

    #[test]
    fn test_payload_hash_follows_subject() {
        let mut seen = HashSet::new();
        seen.insert(TokenPayload::new("user-1", "old@example.com"));

        assert!(seen.contains(&TokenPayload::new("user-1", "new@example.com")));
        assert!(!seen.contains(&TokenPayload::new("user-2", "old@example.com")));
    }

    #[test]
    fn test_with_role() {
        let payload = TokenPayload::new("user-1", "user@example.com").with_role("admin");
        assert_eq!(payload.role, Some("admin".to_string()));
    }

    #[test]
    fn test_token_kind_serializes_lowercase() {
        let serialized =
            serde_json::to_string(&TokenKind::Refresh).expect("Failed to serialize token kind");
        assert_eq!(serialized, "\"refresh\"");
    }

    #[test]
    fn test_claims_round_trip_into_payload() {
        let claims = Claims {
            sub: "user-1".to_string(),
            email: "user@example.com".to_string(),
            role: Some("admin".to_string()),
            iss: "athena-finance".to_string(),
            aud: "athena-api".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_000_900,
            token_type: TokenKind::Access,
        };

        let payload = claims.into_payload();
        assert_eq!(payload.subject, "user-1");
        assert_eq!(payload.email, "user@example.com");
        assert_eq!(payload.role, Some("admin".to_string()));
    }
}
