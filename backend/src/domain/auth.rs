//! Login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Identifier was missing or blank once trimmed.
    #[error("identifier must not be empty")]
    EmptyIdentifier,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// The identifier is either a username or an email address; the account
/// service decides which by looking for an `@`.
///
/// ## Invariants
/// - `identifier` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use analogy_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada@example.com ", "Secret1!").unwrap();
/// assert_eq!(creds.identifier(), "ada@example.com");
/// assert!(creds.is_email());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    identifier: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw identifier/password inputs.
    pub fn try_from_parts(identifier: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = identifier.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyIdentifier);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            identifier: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username or email used for the account lookup.
    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    /// Whether the identifier looks like an email address.
    pub fn is_email(&self) -> bool {
        self.identifier.contains('@')
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyIdentifier)]
    #[case("   ", "pw", LoginValidationError::EmptyIdentifier)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] identifier: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(identifier, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  ada_l  ", " secret ", false)]
    #[case("ada@example.com", "correct horse battery staple", true)]
    fn valid_credentials_trim_identifier(
        #[case] identifier: &str,
        #[case] password: &str,
        #[case] is_email: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(identifier, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.identifier(), identifier.trim());
        assert_eq!(creds.password(), password);
        assert_eq!(creds.is_email(), is_email);
    }
}
