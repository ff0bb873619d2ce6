//! LDAP support for loginldap.
//!
//! Provides the LDAP [`Directory`](loginldap_core::directory::Directory) client, the two
//! authenticators that can serve as fallback when the web server did not authenticate the user,
//! and the synchronizer that copies directory entries into local user storage:
//!
//! - [`LdapAuthenticator`]: direct bind against the directory.
//! - [`SynchronizedAuthenticator`]: directory bind for directory users, a local authenticator for
//!   everyone else.
//!
//! ```no_run
//! use loginldap_core::user::InMemoryUserStore;
//! use loginldap_ldap::{LdapAuthenticator, LdapConfig, LdapDirectory, LdapUserSynchronizer};
//! use std::sync::Arc;
//!
//! let config = LdapConfig {
//!     server_url: "ldaps://ldap.example.com:636".to_string(),
//!     base_dn: "ou=users,dc=example,dc=com".to_string(),
//!     ..Default::default()
//! };
//! let users = Arc::new(InMemoryUserStore::new());
//! let synchronizer = LdapUserSynchronizer::new(config.attribute_mappings.clone(), users);
//! let directory = LdapDirectory::new(config).unwrap();
//! let _auth = LdapAuthenticator::new(Arc::new(directory), Arc::new(synchronizer));
//! ```

mod authenticator;
mod client;
mod config;
mod synchronized;
mod synchronizer;
#[cfg(test)]
mod testing;

pub use authenticator::LdapAuthenticator;
pub use client::LdapDirectory;
pub use config::{AttributeMappings, LdapConfig, LOGIN_PLACEHOLDER};
pub use synchronized::SynchronizedAuthenticator;
pub use synchronizer::LdapUserSynchronizer;
