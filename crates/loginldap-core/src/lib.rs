//! Core traits and types for loginldap authenticators, directories and user stores.

pub mod auth;
pub mod directory;
pub mod error;
pub mod user;

pub use error::{Error, ErrorKind};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
