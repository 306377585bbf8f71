//! Authentication primitives: sign-in credentials, registrations, tokens and
//! sessions.
//!
//! Raw form input is checked here before the session manager talks to an
//! [`AuthGateway`](crate::domain::ports::AuthGateway), so gateways only ever
//! see well-formed requests.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

use super::user::{DisplayName, EmailAddress, User, UserValidationError};
use super::validation::{MIN_PASSWORD_LENGTH, ValidationError};

/// Failures reported by authentication back ends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// Registration used an email that already has an account.
    #[error("an account with this email already exists")]
    AlreadyRegistered,
    /// Transport failure or unexpected server response.
    #[error("authentication service error: {message}")]
    NetworkOrServerError {
        /// Underlying failure description.
        message: String,
    },
}

impl AuthError {
    /// Construct [`Self::NetworkOrServerError`].
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkOrServerError {
            message: message.into(),
        }
    }
}

fn email_field(email: &str) -> Result<EmailAddress, ValidationError> {
    EmailAddress::new(email).map_err(|err| match err {
        UserValidationError::EmptyEmail => ValidationError::Required { field: "email" },
        other => ValidationError::Invalid {
            field: "email",
            reason: other.to_string(),
        },
    })
}

/// Validated sign-in form.
///
/// ## Invariants
/// - `email` is trimmed and well formed.
/// - `password` is non-empty; whitespace is kept as typed.
#[derive(Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignInCredentials {
    /// Validate raw form values.
    ///
    /// # Examples
    /// ```
    /// use teaching_buddy::domain::SignInCredentials;
    ///
    /// let creds = SignInCredentials::try_from_parts(" teacher1@example.com ", "password123")
    ///     .expect("valid form");
    /// assert_eq!(creds.email().as_ref(), "teacher1@example.com");
    /// ```
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, ValidationError> {
        if email.trim().is_empty() {
            return Err(ValidationError::Required { field: "email" });
        }
        if password.is_empty() {
            return Err(ValidationError::Required { field: "password" });
        }
        Ok(Self {
            email: email_field(email)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email typed by the user.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password typed by the user.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for SignInCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated registration form.
///
/// ## Invariants
/// - every field was supplied;
/// - `password` has at least [`MIN_PASSWORD_LENGTH`] characters;
/// - the confirmation matched `password` exactly.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    name: DisplayName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration form values.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, ValidationError> {
        let name = DisplayName::new(name).map_err(|_| ValidationError::Required { field: "name" })?;
        if email.trim().is_empty() {
            return Err(ValidationError::Required { field: "email" });
        }
        if password.is_empty() {
            return Err(ValidationError::Required { field: "password" });
        }
        if confirm_password.is_empty() {
            return Err(ValidationError::Required {
                field: "confirmPassword",
            });
        }
        let email = email_field(email)?;
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::TooShort {
                field: "password",
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if password != confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Name for the new account.
    #[must_use]
    pub const fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Email for the new account.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Chosen password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Error returned when a token string is blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("session token must not be empty")]
pub struct EmptyTokenError;

/// Opaque credential returned by the auth back end.
///
/// Wiped from memory on drop and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Wrap a non-empty token string.
    pub fn new(token: impl Into<String>) -> Result<Self, EmptyTokenError> {
        let token = Zeroizing::new(token.into());
        if token.trim().is_empty() {
            return Err(EmptyTokenError);
        }
        Ok(Self(token))
    }

    /// Raw token for persistence or request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Authenticated identity plus its credential token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
    token: SessionToken,
}

impl Session {
    /// Pair a user with the token issued for them.
    #[must_use]
    pub const fn new(user: User, token: SessionToken) -> Self {
        Self { user, token }
    }

    /// Signed-in user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Issued token.
    #[must_use]
    pub const fn token(&self) -> &SessionToken {
        &self.token
    }
}
