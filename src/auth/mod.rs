//! Contains the [`WebServerAuthenticator`] and re-exports the [`Authenticator`] SPI from
//! `loginldap-core`.
//!
//! The web server in front of the application authenticates the user and hands the identity over,
//! typically as the `REMOTE_USER` variable. The request layer puts that value in
//! [`Credentials::remote_user`]:
//!
//! ```no_run
//! # async fn demo(authenticator: loginldap::auth::WebServerAuthenticator, remote_user: Option<String>) {
//! use loginldap::auth::{Authenticator, Credentials};
//!
//! let creds = Credentials {
//!     password: None,
//!     remote_user,
//! };
//! match authenticator.authenticate("", &creds).await {
//!     Ok(result) if result.is_success() => println!("welcome {}", result.login()),
//!     Ok(_) => println!("access denied"),
//!     Err(e) => eprintln!("directory unavailable: {}", e),
//! }
//! # }
//! ```
//!
//! [`Authenticator`]: loginldap_core::auth::Authenticator

pub use loginldap_core::auth::{settle, AuthResult, Authenticator, Credentials, RejectingAuthenticator};

mod webserver;
pub use webserver::{normalize_remote_user, WebServerAuthenticator};
