pub mod argon2;
pub mod errors;
pub mod strength;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;
pub use strength::validate_password_strength;
pub use strength::PasswordPolicyResult;
pub use strength::PolicyViolation;
