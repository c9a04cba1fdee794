//! Account data model and sign-up validation.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use zeroize::Zeroizing;

use super::UserId;

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 2;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 30;
/// Minimum allowed length for a password.
pub const PASSWORD_MIN: usize = 8;
/// Maximum allowed length for a password.
pub const PASSWORD_MAX: usize = 100;
/// Characters that satisfy the password "special character" rule.
pub const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Validation errors raised while parsing sign-up input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignUpValidationError {
    /// Username length out of range.
    #[error("username must be between {min} and {max} characters")]
    UsernameLength { min: usize, max: usize },
    /// Username contained characters outside `[A-Za-z0-9_]`.
    #[error("username may only contain letters, numbers, and underscores")]
    UsernameCharacters,
    /// Email address was not well formed.
    #[error("invalid email address")]
    InvalidEmail,
    /// Password length out of range.
    #[error("password must be between {min} and {max} characters")]
    PasswordLength { min: usize, max: usize },
    /// Password lacked a required character class.
    #[error("password must contain at least one {class}")]
    PasswordMissingClass { class: &'static str },
}

impl SignUpValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::UsernameLength { .. } | Self::UsernameCharacters => "username",
            Self::InvalidEmail => "email",
            Self::PasswordLength { .. } | Self::PasswordMissingClass { .. } => "password",
        }
    }

    /// Machine-readable validation code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UsernameLength { .. } => "username_length",
            Self::UsernameCharacters => "username_characters",
            Self::InvalidEmail => "invalid_email",
            Self::PasswordLength { .. } => "password_length",
            Self::PasswordMissingClass { .. } => "password_too_weak",
        }
    }
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z0-9_]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Unique public handle of an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    ///
    /// # Examples
    /// ```
    /// use analogy_backend::domain::Username;
    ///
    /// assert_eq!(Username::new(" ada_l ").expect("valid").as_ref(), "ada_l");
    /// assert!(Username::new("a").is_err());
    /// assert!(Username::new("ada lovelace").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SignUpValidationError> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
            return Err(SignUpValidationError::UsernameLength {
                min: USERNAME_MIN,
                max: USERNAME_MAX,
            });
        }
        if !username_regex().is_match(trimmed) {
            return Err(SignUpValidationError::UsernameCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique email address of an account, stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim, lowercase and validate an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SignUpValidationError> {
        let normalized = raw.as_ref().trim().to_lowercase();
        if !email_regex().is_match(&normalized) {
            return Err(SignUpValidationError::InvalidEmail);
        }
        Ok(Self(normalized))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plaintext password that passed the strength rules.
///
/// The buffer is zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a password against the length and character-class rules.
    pub fn new(raw: &str) -> Result<Self, SignUpValidationError> {
        let length = raw.chars().count();
        if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&length) {
            return Err(SignUpValidationError::PasswordLength {
                min: PASSWORD_MIN,
                max: PASSWORD_MAX,
            });
        }
        let rules: [(&'static str, fn(char) -> bool); 4] = [
            ("uppercase letter", |c| c.is_ascii_uppercase()),
            ("lowercase letter", |c| c.is_ascii_lowercase()),
            ("number", |c| c.is_ascii_digit()),
            ("special character (@$!%*?&)", |c| PASSWORD_SPECIALS.contains(c)),
        ];
        for (class, rule) in rules {
            if !raw.chars().any(rule) {
                return Err(SignUpValidationError::PasswordMissingClass { class });
            }
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Expose the plaintext for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Validated sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    /// Requested username.
    pub username: Username,
    /// Requested email address.
    pub email: EmailAddress,
    /// Chosen password.
    pub password: Password,
}

impl SignUp {
    /// Validate every field, reporting the first failure.
    ///
    /// # Examples
    /// ```
    /// use analogy_backend::domain::SignUp;
    ///
    /// let sign_up = SignUp::try_from_parts("ada_l", "Ada@Example.com", "Secret1!").expect("valid");
    /// assert_eq!(sign_up.email.as_ref(), "ada@example.com");
    /// assert!(SignUp::try_from_parts("ada_l", "ada@example.com", "secret").is_err());
    /// ```
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, SignUpValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
            password: Password::new(password)?,
        })
    }
}

/// Encoded password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a hasher or read from storage.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Stable identifier shared with history entries.
    pub id: UserId,
    /// Unique username.
    pub username: Username,
    /// Unique email address.
    pub email: EmailAddress,
    /// Stored credential hash.
    pub password_hash: PasswordHash,
    /// Only verified accounts may log in.
    pub is_verified: bool,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}
