#![allow(dead_code, missing_docs)]

use async_trait::async_trait;
use loginldap::auth::{AuthResult, Authenticator, Credentials};
use loginldap_core::directory::{Directory, DirectoryUser};
use loginldap_core::user::{LocalUser, UserStore, UserSynchronizer};
use loginldap_core::{Error, ErrorKind};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn entry(login: &str) -> DirectoryUser {
    DirectoryUser::new(format!("uid={},ou=users,dc=corp,dc=example", login))
        .with_attribute("uid", login)
        .with_attribute("mail", format!("{}@corp.example", login))
}

/// Directory double counting lookups and optionally failing them. Logins match case-insensitively,
/// like the usual `uid` and `sAMAccountName` attributes.
#[derive(Debug, Default)]
pub struct RecordingDirectory {
    entries: HashMap<String, (DirectoryUser, String)>,
    fail_with: Option<ErrorKind>,
    lookups: AtomicUsize,
}

impl RecordingDirectory {
    pub fn with_entry(mut self, login: &str, password: &str) -> Self {
        self.entries.insert(login.to_string(), (entry(login), password.to_string()));
        self
    }

    pub fn failing(kind: ErrorKind) -> Self {
        RecordingDirectory {
            fail_with: Some(kind),
            ..Default::default()
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), Error> {
        match self.fail_with {
            Some(kind) => Err(Error::new(kind, "injected directory failure")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Directory for RecordingDirectory {
    async fn get_user(&self, login: &str) -> Result<Option<DirectoryUser>, Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(login))
            .map(|(_, (e, _))| e.clone()))
    }

    async fn verify_password(&self, user: &DirectoryUser, password: &str) -> Result<bool, Error> {
        self.check()?;
        Ok(self.entries.values().any(|(e, pw)| e.dn == user.dn && !password.is_empty() && pw == password))
    }
}

/// Synchronizer double remembering the records it was handed.
#[derive(Debug, Default)]
pub struct RecordingSynchronizer {
    received: Mutex<Vec<DirectoryUser>>,
    fail: bool,
}

impl RecordingSynchronizer {
    pub fn failing() -> Self {
        RecordingSynchronizer {
            fail: true,
            ..Default::default()
        }
    }

    pub fn received(&self) -> Vec<DirectoryUser> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserSynchronizer for RecordingSynchronizer {
    async fn synchronize(&self, user: &DirectoryUser) -> Result<LocalUser, Error> {
        self.received.lock().unwrap().push(user.clone());
        if self.fail {
            return Err(Error::new(ErrorKind::SyncError, "injected synchronization failure"));
        }
        let login = user.get_attribute("uid").unwrap_or_default();
        Ok(LocalUser::new(login, user.get_attribute("mail").unwrap_or_default()))
    }
}

/// Store double whose every call fails.
#[derive(Debug)]
pub struct BrokenStore;

#[async_trait]
impl UserStore for BrokenStore {
    async fn get_user(&self, _login: &str) -> Result<Option<LocalUser>, Error> {
        Err(Error::new(ErrorKind::LocalError, "storage offline"))
    }

    async fn save_user(&self, _user: LocalUser) -> Result<(), Error> {
        Err(Error::new(ErrorKind::LocalError, "storage offline"))
    }
}

/// Fallback double answering with a fixed outcome and remembering what it was asked.
#[derive(Debug)]
pub struct ScriptedFallback {
    outcome: fn(&str) -> Result<AuthResult, Error>,
    calls: Mutex<Vec<(String, Credentials)>>,
}

impl ScriptedFallback {
    pub fn new(outcome: fn(&str) -> Result<AuthResult, Error>) -> Arc<Self> {
        Arc::new(ScriptedFallback {
            outcome,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn rejecting() -> Arc<Self> {
        Self::new(|login| Ok(AuthResult::failure(login, "wrong password")))
    }

    pub fn calls(&self) -> Vec<(String, Credentials)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Authenticator for ScriptedFallback {
    async fn authenticate(&self, login: &str, creds: &Credentials) -> Result<AuthResult, Error> {
        self.calls.lock().unwrap().push((login.to_string(), creds.clone()));
        (self.outcome)(login)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
