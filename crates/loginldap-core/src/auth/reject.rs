//! This module provides an authenticator that turns everybody away

use super::{AuthResult, Authenticator, Credentials};
use crate::Error;
use async_trait::async_trait;

///
/// [`Authenticator`] implementation that rejects every login.
///
/// Handy as the local authenticator of a deployment where every user lives in the directory.
///
/// # Example
///
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use loginldap_core::auth::{Authenticator, RejectingAuthenticator};
///
/// let my_auth = RejectingAuthenticator;
/// assert!(!my_auth.authenticate("Finn", &"I ❤️ PB".into()).await.unwrap().is_success());
/// # }
/// ```
///
#[derive(Debug, Default)]
pub struct RejectingAuthenticator;

#[async_trait]
impl Authenticator for RejectingAuthenticator {
    #[tracing_attributes::instrument(skip(_creds))]
    async fn authenticate(&self, login: &str, _creds: &Credentials) -> Result<AuthResult, Error> {
        Ok(AuthResult::failure(login, "no local authentication configured"))
    }

    fn name(&self) -> &str {
        "reject"
    }
}
