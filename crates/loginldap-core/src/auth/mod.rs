//! Contains the [`Authenticator`] trait and the [`AuthResult`] every authenticator produces.
//!
//! An authenticator receives the login and the request's [`Credentials`]. It answers with an
//! [`AuthResult`] for every outcome the user should see as "logged in" or "not logged in" and only
//! returns `Err` for failures the caller has to deal with itself, which by convention means the
//! directory could not be reached ([`ErrorKind::CannotConnect`](crate::ErrorKind::CannotConnect)).
//!
//! To define your own authenticator:
//!
//! 1. Declare dependencies on async-trait and loginldap-core
//!
//! ```toml
//! async-trait = "0.1.89"
//! loginldap-core = { path = "../path/to/loginldap-core" }
//! ```
//!
//! 2. Implement the [`Authenticator`] trait, building results through [`settle`]:
//!
//! ```no_run
//! use async_trait::async_trait;
//! use loginldap_core::auth::{settle, AuthResult, Authenticator, Credentials};
//! use loginldap_core::user::LocalUser;
//! use loginldap_core::{Error, ErrorKind};
//!
//! #[derive(Debug)]
//! struct GuestAuthenticator;
//!
//! #[async_trait]
//! impl Authenticator for GuestAuthenticator {
//!     async fn authenticate(&self, login: &str, _creds: &Credentials) -> Result<AuthResult, Error> {
//!         let outcome = if login == "guest" {
//!             Ok(LocalUser::new("guest", "guest@example.org"))
//!         } else {
//!             Err(Error::from(ErrorKind::UserNotFound))
//!         };
//!         settle(login, outcome)
//!     }
//! }
//! ```

mod authenticator;
pub use authenticator::{settle, AuthResult, Authenticator, Credentials};

mod reject;
pub use reject::RejectingAuthenticator;
