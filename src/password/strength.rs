use serde::Serialize;
use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_LENGTH: usize = 8;

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARACTERS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

/// A single failed password-policy rule.
///
/// Variants are listed in rule-evaluation order; a policy result reports
/// its violations in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyViolation {
    #[error("Password must be at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,

    #[error("Password must contain at least one special character")]
    MissingSpecialCharacter,
}

/// Outcome of evaluating the password strength policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicyResult {
    violations: Vec<PolicyViolation>,
}

impl PasswordPolicyResult {
    /// Whether the password satisfied every rule.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The failed rules, in rule-evaluation order.
    pub fn violations(&self) -> &[PolicyViolation] {
        &self.violations
    }
}

/// Evaluate the password strength policy.
///
/// All rules are checked on every call — nothing short-circuits — so a
/// single call reports everything wrong with a candidate password at once:
/// minimum length of [`MIN_LENGTH`] characters, at least one uppercase
/// letter, one lowercase letter, one digit, and one character from
/// [`SPECIAL_CHARACTERS`].
pub fn validate_password_strength(password: &str) -> PasswordPolicyResult {
    let mut violations = Vec::new();

    let length = password.chars().count();
    if length < MIN_LENGTH {
        violations.push(PolicyViolation::TooShort {
            min: MIN_LENGTH,
            actual: length,
        });
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        violations.push(PolicyViolation::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        violations.push(PolicyViolation::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PolicyViolation::MissingDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        violations.push(PolicyViolation::MissingSpecialCharacter);
    }

    PasswordPolicyResult { violations }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password_passes_every_rule() {
        let result = validate_password_strength("Str0ng!Pass");

        assert!(result.is_valid());
        assert!(result.violations().is_empty());
    }

    #[test]
    fn test_weak_password_reports_all_violations_at_once() {
        let result = validate_password_strength("short");

        assert!(!result.is_valid());
        assert_eq!(
            result.violations(),
            &[
                PolicyViolation::TooShort { min: 8, actual: 5 },
                PolicyViolation::MissingUppercase,
                PolicyViolation::MissingDigit,
                PolicyViolation::MissingSpecialCharacter,
            ]
        );
    }

    #[test]
    fn test_empty_password_fails_every_rule() {
        let result = validate_password_strength("");

        assert_eq!(result.violations().len(), 5);
        assert!(matches!(
            result.violations()[0],
            PolicyViolation::TooShort { min: 8, actual: 0 }
        ));
    }

    #[test]
    fn test_single_missing_rule_is_the_only_violation() {
        let result = validate_password_strength("Str0ngPass");

        assert_eq!(
            result.violations(),
            &[PolicyViolation::MissingSpecialCharacter]
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Four two-byte characters and four ASCII ones: eight characters.
        let result = validate_password_strength("Ää1!Ööxy");

        assert!(!result
            .violations()
            .iter()
            .any(|v| matches!(v, PolicyViolation::TooShort { .. })));
    }

    #[test]
    fn test_violation_messages_are_actionable() {
        let violation = PolicyViolation::TooShort { min: 8, actual: 5 };

        assert_eq!(
            violation.to_string(),
            "Password must be at least 8 characters, got 5"
        );
    }
}
