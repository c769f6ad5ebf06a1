use thiserror::Error;

/// Error type for password hashing operations.
///
/// Verification deliberately has no error channel — it returns a bare
/// boolean — so hashing is the only fallible operation here.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
