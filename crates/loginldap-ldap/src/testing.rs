use async_trait::async_trait;
use loginldap_core::directory::{Directory, DirectoryUser};
use loginldap_core::{Error, ErrorKind};
use std::collections::HashMap;

/// In-memory directory with `uid`/`mail` attributes and plain-text passwords.
#[derive(Debug, Default)]
pub(crate) struct FakeDirectory {
    users: HashMap<String, (DirectoryUser, String)>,
    unreachable: bool,
}

impl FakeDirectory {
    pub(crate) fn with_user(login: &str, password: &str) -> Self {
        let mut directory = FakeDirectory::default();
        let entry = DirectoryUser::new(format!("uid={},ou=users,dc=example,dc=com", login))
            .with_attribute("uid", login)
            .with_attribute("mail", format!("{}@example.com", login));
        directory.users.insert(login.to_string(), (entry, password.to_string()));
        directory
    }

    pub(crate) fn unreachable() -> Self {
        FakeDirectory {
            unreachable: true,
            ..Default::default()
        }
    }

    fn reachable(&self) -> Result<(), Error> {
        if self.unreachable {
            return Err(Error::new(ErrorKind::CannotConnect, "connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn get_user(&self, login: &str) -> Result<Option<DirectoryUser>, Error> {
        self.reachable()?;
        Ok(self.users.get(login).map(|(entry, _)| entry.clone()))
    }

    async fn verify_password(&self, user: &DirectoryUser, password: &str) -> Result<bool, Error> {
        self.reachable()?;
        Ok(self.users.values().any(|(entry, pw)| entry.dn == user.dn && !password.is_empty() && pw == password))
    }
}
