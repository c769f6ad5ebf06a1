use thiserror::Error;

/// Error type for token issuance and verification.
///
/// Verification failures are deliberately opaque: an expired token, a bad
/// signature, a wrong issuer or audience, and a token from the other domain
/// all surface as the same variant, so callers cannot be used as an oracle
/// for why a token was rejected. The concrete cause goes to the audit log
/// at the rejection site instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Invalid access token")]
    InvalidToken,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token payload requires a non-empty subject")]
    MissingSubject,

    #[error("Token payload requires a non-empty email")]
    MissingEmail,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}
