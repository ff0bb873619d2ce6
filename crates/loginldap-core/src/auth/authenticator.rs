//! The service provider interface (SPI) for auth

use crate::user::LocalUser;
use crate::{Error, ErrorKind};
use async_trait::async_trait;
use std::fmt::{self, Debug};

/// Defines the requirements for Authentication implementations
#[async_trait]
pub trait Authenticator: Sync + Send + Debug {
    /// Authenticate the given login with the given credentials.
    ///
    /// Rejections are reported as [`AuthResult::Failure`]. `Err` is reserved for failures that
    /// must reach the caller, see [`settle`].
    async fn authenticate(&self, login: &str, creds: &Credentials) -> Result<AuthResult, Error>;

    /// Implement to set the name of the authenticator. By default it returns the type signature.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// The outcome of an authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    /// The login is authenticated as this local user.
    Success(LocalUser),
    /// The login is not authenticated.
    Failure {
        /// The login that was attempted.
        login: String,
        /// Human readable cause, for logs only.
        reason: String,
    },
}

impl AuthResult {
    /// A successful result for `user`.
    pub fn success(user: LocalUser) -> Self {
        AuthResult::Success(user)
    }

    /// A failed result for `login`.
    pub fn failure<L: Into<String>, R: Into<String>>(login: L, reason: R) -> Self {
        AuthResult::Failure {
            login: login.into(),
            reason: reason.into(),
        }
    }

    /// True for [`AuthResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, AuthResult::Success(_))
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&LocalUser> {
        match self {
            AuthResult::Success(user) => Some(user),
            AuthResult::Failure { .. } => None,
        }
    }

    /// The login this result is about.
    pub fn login(&self) -> &str {
        match self {
            AuthResult::Success(user) => &user.login,
            AuthResult::Failure { login, .. } => login,
        }
    }
}

/// Turns the outcome of an authentication flow into what an [`Authenticator`] returns.
///
/// A connectivity error is handed back as `Err` untouched. Every other error is logged and becomes
/// an [`AuthResult::Failure`] so that a faulty collaborator degrades to "not authenticated".
pub fn settle(login: &str, outcome: Result<LocalUser, Error>) -> Result<AuthResult, Error> {
    match outcome {
        Ok(user) => Ok(AuthResult::success(user)),
        Err(err) if err.is_connectivity() => Err(err),
        Err(err) => {
            match err.kind() {
                ErrorKind::InvalidCredentials | ErrorKind::UserNotFound => {
                    tracing::info!(login, reason = %err, "Authentication rejected")
                }
                _ => tracing::warn!(login, error = ?err, "Authentication failed"),
            }
            Ok(AuthResult::failure(login, err.to_string()))
        }
    }
}

/// Credentials passed to an authenticator next to the login.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// The password that the client sent.
    pub password: Option<String>,
    /// The identity the web server already authenticated, for example the `REMOTE_USER` variable
    /// set by the HTTP server in front of the application. `None` or empty means no
    /// pre-authentication happened.
    pub remote_user: Option<String>,
}

impl Credentials {
    /// Credentials carrying only a password.
    pub fn with_password<S: Into<String>>(password: S) -> Self {
        Credentials {
            password: Some(password.into()),
            remote_user: None,
        }
    }

    /// Credentials carrying a pre-authenticated identity and no password.
    pub fn with_remote_user<S: Into<String>>(remote_user: S) -> Self {
        Credentials {
            password: None,
            remote_user: Some(remote_user.into()),
        }
    }

    /// The password, or the empty string if none was sent.
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }

    /// The pre-authenticated identity, filtering out empty values.
    pub fn remote_user(&self) -> Option<&str> {
        self.remote_user.as_deref().filter(|u| !u.is_empty())
    }
}

impl From<&str> for Credentials {
    fn from(password: &str) -> Self {
        Credentials::with_password(password)
    }
}

impl From<String> for Credentials {
    fn from(password: String) -> Self {
        Credentials::with_password(password)
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("remote_user", &self.remote_user)
            .finish()
    }
}
