//! Login for applications running behind a web server that authenticates users itself.
//!
//! The [`WebServerAuthenticator`](auth::WebServerAuthenticator) trusts the identity the web server
//! passes on (`REMOTE_USER`), strips its realm, synchronizes the user from LDAP and logs the local
//! user in. Requests without that identity are handed to a fallback authenticator that checks the
//! password against LDAP.
//!
//! ```no_run
//! use loginldap::auth::{Authenticator, Credentials};
//! use loginldap::{Builder, Settings};
//! use loginldap_core::user::InMemoryUserStore;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let settings = Settings::from_json(r#"{
//!     "ldap": { "server_url": "ldap://ldap.example.com", "base_dn": "ou=users,dc=example,dc=com" }
//! }"#).unwrap();
//! let authenticator = Builder::new(settings, Arc::new(InMemoryUserStore::new())).build().unwrap();
//!
//! let result = authenticator
//!     .authenticate("", &Credentials::with_remote_user("jdoe@EXAMPLE.COM"))
//!     .await
//!     .unwrap();
//! # }
//! ```

pub mod auth;
mod builder;
#[cfg(feature = "prometheus")]
mod metrics;
pub mod options;

pub use crate::builder::Builder;
pub use crate::options::{FallbackStrategy, Settings};
