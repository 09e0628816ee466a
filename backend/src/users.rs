//! # User Directory
//!
//! Read-mostly list of users kept in a JSON file of the shape
//! `{"users": [{"username", "password_hash", "team"}, ...]}`.
//!
//! Passwords are stored as salted argon2 hashes. [`UserDirectory::authenticate`] is
//! the only place a password is ever compared, and nothing outside this module
//! sees a stored hash.

use crate::error::{AppError, Result};
use crate::store::{read_json, write_json_atomic};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use common::model::user::{Identity, User};
use log::{error, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<User>,
}

pub struct UserDirectory {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl UserDirectory {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let directory = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        let count = directory.load()?.users.len();
        if count == 0 {
            warn!(
                "user directory {} is empty; add users with `teamdocs add-user`",
                directory.path.display()
            );
        }
        Ok(directory)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<UsersFile> {
        let Some(raw) = read_json::<Value>(&self.path)? else {
            return Ok(UsersFile::default());
        };
        if has_plaintext_passwords(&raw) {
            error!(
                "{} still has plaintext `password` entries",
                self.path.display()
            );
            return Err(AppError::Config(format!(
                "{} uses the old plaintext `password` field; move it aside and recreate \
                 each user with `teamdocs add-user <username> <team> --password <password>`",
                self.path.display()
            )));
        }
        serde_json::from_value(raw).map_err(|source| AppError::CorruptStore {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Returns the identity of the first user whose username matches exactly and whose
    /// password verifies. Unknown users and wrong passwords are `None`, not errors.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<Identity>> {
        let users = self.load()?.users;
        let Some(user) = users.iter().find(|u| u.username == username) else {
            return Ok(None);
        };
        let parsed = match PasswordHash::new(&user.password_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("stored password hash for {} is unusable: {}", username, e);
                return Ok(None);
            }
        };
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(Some(Identity::from(user)))
        } else {
            Ok(None)
        }
    }

    /// Adds a user with a freshly salted hash of `password`.
    pub fn add_user(&self, username: &str, password: &str, team: &str) -> Result<Identity> {
        let username = username.trim();
        let team = team.trim();
        if username.is_empty() || team.is_empty() || password.is_empty() {
            return Err(AppError::validation(
                "username, password and team are required",
            ));
        }

        let password_hash = hash_password(password)?;

        let _guard = self.write_lock.lock();
        let mut file = self.load()?;
        if file.users.iter().any(|u| u.username == username) {
            return Err(AppError::validation(format!(
                "user {} already exists",
                username
            )));
        }
        let user = User {
            username: username.to_string(),
            password_hash,
            team: team.to_string(),
        };
        let identity = Identity::from(&user);
        file.users.push(user);
        write_json_atomic(&self.path, &file)?;
        info!("added user {} to team {}", identity.username, identity.team);
        Ok(identity)
    }

    pub fn list_users(&self) -> Result<Vec<Identity>> {
        Ok(self.load()?.users.iter().map(Identity::from).collect())
    }
}

/// Users files written before passwords were hashed carry `password` instead of
/// `password_hash`.
fn has_plaintext_passwords(raw: &Value) -> bool {
    raw.get("users")
        .and_then(Value::as_array)
        .is_some_and(|users| {
            users
                .iter()
                .any(|u| u.get("password").is_some() && u.get("password_hash").is_none())
        })
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}
