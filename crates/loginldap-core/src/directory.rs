//! The [`Directory`] trait: the external identity store users are looked up in.

use crate::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;

/// A user entry as the directory returns it. Authenticators don't interpret it, they pass it on to
/// a [`UserSynchronizer`](crate::user::UserSynchronizer).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Distinguished name of the entry.
    pub dn: String,
    /// Raw attributes, each possibly multi-valued.
    #[serde(default)]
    pub attributes: HashMap<String, Vec<String>>,
}

impl DirectoryUser {
    /// Creates an entry without attributes.
    pub fn new<S: Into<String>>(dn: S) -> Self {
        DirectoryUser {
            dn: dn.into(),
            attributes: HashMap::new(),
        }
    }

    /// Adds a single-valued attribute.
    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.attributes.entry(name.into()).or_default().push(value.into());
        self
    }

    /// First value of an attribute. Attribute names are matched case-insensitively, as LDAP does.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.first())
            .map(String::as_str)
    }
}

/// Read access to a directory service.
#[async_trait]
pub trait Directory: Send + Sync + Debug {
    /// Looks up the entry for `login`. A missing entry is `Ok(None)`, not an error.
    ///
    /// Returns an error of kind [`CannotConnect`](crate::ErrorKind::CannotConnect) when the
    /// directory cannot be reached.
    async fn get_user(&self, login: &str) -> Result<Option<DirectoryUser>, Error>;

    /// Checks `password` against the directory entry `user`. `Ok(false)` means the password was
    /// rejected.
    async fn verify_password(&self, user: &DirectoryUser, password: &str) -> Result<bool, Error>;
}
