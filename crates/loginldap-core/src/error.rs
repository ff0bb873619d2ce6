//! Contains the [`Error`] type and the [`ErrorKind`]s shared by every loginldap component.

use crate::BoxError;
use derive_more::Display;
use thiserror::Error;

/// The Error returned by directories, user stores, synchronizers and authenticators. Implementations
/// should choose the [`ErrorKind`] carefully: only [`ErrorKind::CannotConnect`] makes it past the
/// authenticators to the caller, every other kind ends up as a failed login.
#[derive(Debug, Error)]
#[error("login error: {kind}")]
pub struct Error {
    kind: ErrorKind,
    #[source]
    source: Option<BoxError>,
}

impl Error {
    /// Creates a new error of the given kind wrapping `error` as its source.
    pub fn new<E>(kind: ErrorKind, error: E) -> Error
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error {
            kind,
            source: Some(error.into()),
        }
    }

    /// The kind of failure, which decides whether it is absorbed or propagated.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// True if the directory service could not be reached.
    pub fn is_connectivity(&self) -> bool {
        self.kind == ErrorKind::CannotConnect
    }

    /// Attempts to get a reference to the inner `std::io::Error` if there is one.
    pub fn get_io_error(&self) -> Option<&std::io::Error> {
        self.source.as_ref()?.downcast_ref::<std::io::Error>()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { kind, source: None }
    }
}

/// The `ErrorKind` variants that can be produced by collaborators.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display)]
pub enum ErrorKind {
    /// The directory server could not be reached: connect, TLS negotiation or transport failure.
    /// This is the only kind that is propagated to the caller of an authenticator.
    #[display("cannot connect to directory")]
    CannotConnect,
    /// The directory answered but the operation failed, for example a failed service bind or a
    /// rejected search.
    #[display("directory error")]
    DirectoryError,
    /// A directory record could not be reconciled into local user storage.
    #[display("user synchronization error")]
    SyncError,
    /// No user exists for the login, either locally or in the directory.
    #[display("user not found")]
    UserNotFound,
    /// The password was rejected.
    #[display("invalid credentials")]
    InvalidCredentials,
    /// The component is misconfigured.
    #[display("configuration error")]
    ConfigError,
    /// Any other failure inside the local user storage.
    #[display("local error")]
    LocalError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind() {
        let err = Error::from(ErrorKind::UserNotFound);
        assert_eq!(err.to_string(), "login error: user not found");
    }

    #[test]
    fn io_error_can_be_recovered() {
        let err = Error::new(ErrorKind::CannotConnect, std::io::Error::from(std::io::ErrorKind::ConnectionRefused));
        assert!(err.is_connectivity());
        assert_eq!(err.get_io_error().map(|e| e.kind()), Some(std::io::ErrorKind::ConnectionRefused));
    }
}
