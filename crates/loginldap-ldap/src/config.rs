//! LDAP connection settings and attribute mappings

use loginldap_core::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Placeholder in [`LdapConfig::user_filter`] that is replaced by the escaped login.
pub const LOGIN_PLACEHOLDER: &str = "{login}";

/// LDAP server configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LdapConfig {
    /// LDAP server URL (ldap:// or ldaps://)
    /// Example: "ldap://ldap.example.com:389" or "ldaps://ldap.example.com:636"
    pub server_url: String,

    /// Use STARTTLS for connection upgrade
    #[serde(default)]
    pub start_tls: bool,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub skip_tls_verify: bool,

    /// Service account used for searches. Empty means anonymous searches.
    /// Example: "cn=admin,dc=example,dc=com"
    #[serde(default)]
    pub bind_dn: String,

    /// Service account password
    #[serde(default)]
    pub bind_password: String,

    /// Base DN for user searches
    /// Example: "ou=users,dc=example,dc=com"
    pub base_dn: String,

    /// User search filter, `{login}` is the placeholder.
    /// Example: "(uid={login})" or "(&(objectClass=person)(sAMAccountName={login}))"
    #[serde(default = "default_user_filter")]
    pub user_filter: String,

    /// LDAP attribute mappings
    #[serde(default)]
    pub attribute_mappings: AttributeMappings,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_user_filter() -> String {
    "(uid={login})".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for LdapConfig {
    fn default() -> Self {
        Self {
            server_url: "ldap://localhost:389".to_string(),
            start_tls: false,
            skip_tls_verify: false,
            bind_dn: String::new(),
            bind_password: String::new(),
            base_dn: String::new(),
            user_filter: default_user_filter(),
            attribute_mappings: AttributeMappings::default(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Debug for LdapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LdapConfig")
            .field("server_url", &self.server_url)
            .field("start_tls", &self.start_tls)
            .field("skip_tls_verify", &self.skip_tls_verify)
            .field("bind_dn", &self.bind_dn)
            .field("bind_password", &"***")
            .field("base_dn", &self.base_dn)
            .field("user_filter", &self.user_filter)
            .field("attribute_mappings", &self.attribute_mappings)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Which directory attributes hold the local user's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AttributeMappings {
    /// Login attribute
    #[serde(default = "default_login_attr")]
    pub login: String,

    /// Email attribute
    #[serde(default = "default_email_attr")]
    pub email: String,

    /// Display name attribute
    #[serde(default = "default_alias_attr")]
    pub alias: String,
}

fn default_login_attr() -> String {
    "uid".to_string()
}

fn default_email_attr() -> String {
    "mail".to_string()
}

fn default_alias_attr() -> String {
    "cn".to_string()
}

impl Default for AttributeMappings {
    fn default() -> Self {
        Self {
            login: default_login_attr(),
            email: default_email_attr(),
            alias: default_alias_attr(),
        }
    }
}

impl AttributeMappings {
    /// Active Directory mappings
    pub fn active_directory() -> Self {
        Self {
            login: "sAMAccountName".to_string(),
            email: "mail".to_string(),
            alias: "displayName".to_string(),
        }
    }

    /// The attributes to request when searching for a user.
    pub fn requested(&self) -> Vec<&str> {
        vec![self.login.as_str(), self.email.as_str(), self.alias.as_str()]
    }
}

impl LdapConfig {
    /// Build the user search filter for `login`, escaping it per RFC 4515.
    pub fn build_user_filter(&self, login: &str) -> String {
        self.user_filter.replace(LOGIN_PLACEHOLDER, &ldap3::ldap_escape(login))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |msg: &str| -> Result<(), Error> { Err(Error::new(ErrorKind::ConfigError, msg.to_string())) };

        if !self.server_url.starts_with("ldap://") && !self.server_url.starts_with("ldaps://") {
            return invalid("server_url must start with ldap:// or ldaps://");
        }
        if self.base_dn.is_empty() {
            return invalid("base_dn is required");
        }
        if !self.user_filter.contains(LOGIN_PLACEHOLDER) {
            return invalid("user_filter must contain the {login} placeholder");
        }
        if !self.bind_dn.is_empty() && self.bind_password.is_empty() {
            return invalid("bind_password is required when bind_dn is set");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid() -> LdapConfig {
        LdapConfig {
            base_dn: "ou=users,dc=example,dc=com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn user_filter_escapes_login() {
        let config = valid();
        assert_eq!(config.build_user_filter("jdoe"), "(uid=jdoe)");
        assert_eq!(config.build_user_filter("*)(uid=*").to_ascii_lowercase(), "(uid=\\2a\\29\\28uid=\\2a)");
    }

    #[test]
    fn validation() {
        assert!(valid().validate().is_ok());

        let mut config = valid();
        config.server_url = "http://ldap.example.com".to_string();
        assert_eq!(config.validate().unwrap_err().kind(), ErrorKind::ConfigError);

        let mut config = valid();
        config.user_filter = "(uid=jdoe)".to_string();
        assert!(config.validate().is_err());

        let mut config = valid();
        config.base_dn.clear();
        assert!(config.validate().is_err());

        let mut config = valid();
        config.bind_dn = "cn=admin,dc=example,dc=com".to_string();
        assert!(config.validate().is_err());
        config.bind_password = "secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn debug_hides_bind_password() {
        let config = LdapConfig {
            bind_dn: "cn=reader,dc=example,dc=com".to_string(),
            bind_password: "hunter2".to_string(),
            ..valid()
        };
        let printed = format!("{:?}", config);
        assert!(printed.contains("cn=reader,dc=example,dc=com"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: LdapConfig = serde_json::from_str(r#"{"server_url": "ldaps://dc.example.com", "base_dn": "dc=example,dc=com"}"#).unwrap();
        assert_eq!(config.user_filter, "(uid={login})");
        assert_eq!(config.attribute_mappings, AttributeMappings::default());
        assert_eq!(config.timeout_seconds, 10);
    }
}
