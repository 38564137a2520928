//! Local user table and signed-in session, kept as two plain JSON files in
//! the data directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

pub type Result<T> = std::result::Result<T, AuthError>;

const USERS_FILE: &str = "users.json";
const SESSION_FILE: &str = "session.json";

/// One row of the user table, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub picture: String,
    /// SHA-256 of `email:password`; absent for profile sign-ins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub picture: String,
    pub signed_in_at: DateTime<Utc>,
}

pub struct UserStore {
    dir: PathBuf,
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AuthError::InvalidEmail),
    }
}

fn password_digest(email: &str, password: &str) -> String {
    format!("{:x}", Sha256::digest(format!("{email}:{password}").as_bytes()))
}

fn default_picture(email: &str) -> String {
    let seed = password_digest(email, "");
    format!("https://picsum.photos/seed/{}/100/100", &seed[..12])
}

impl UserStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn users_path(&self) -> PathBuf {
        self.dir.join(USERS_FILE)
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    pub fn users(&self) -> Result<BTreeMap<String, UserRecord>> {
        let path = self.users_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save_users(&self, users: &BTreeMap<String, UserRecord>) -> Result<()> {
        std::fs::write(self.users_path(), serde_json::to_string_pretty(users)?)?;
        Ok(())
    }

    fn start_session(&self, email: &str, record: &UserRecord) -> Result<User> {
        let user = User {
            name: record.name.clone(),
            email: email.to_string(),
            picture: record.picture.clone(),
            signed_in_at: Utc::now(),
        };
        std::fs::write(self.session_path(), serde_json::to_string_pretty(&user)?)?;
        tracing::info!("signed in {email}");
        Ok(user)
    }

    /// Create an account and sign it in.
    pub fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email)?;
        let mut users = self.users()?;
        if users.contains_key(&email) {
            return Err(AuthError::DuplicateEmail);
        }
        let record = UserRecord {
            name: name.trim().to_string(),
            picture: default_picture(&email),
            password: Some(password_digest(&email, password)),
        };
        users.insert(email.clone(), record.clone());
        self.save_users(&users)?;
        self.start_session(&email, &record)
    }

    pub fn log_in(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;
        let users = self.users()?;
        let record = users.get(&email).ok_or(AuthError::InvalidCredentials)?;
        match &record.password {
            Some(stored) if *stored == password_digest(&email, password) => {
                self.start_session(&email, record)
            }
            _ => {
                tracing::warn!("failed sign-in for {email}");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Sign in with an identity vouched for elsewhere (an OAuth widget).
    /// Creates the row on first use and never touches a stored password.
    pub fn log_in_with_profile(&self, name: &str, email: &str, picture: Option<&str>) -> Result<User> {
        let email = normalize_email(email)?;
        let mut users = self.users()?;
        let record = users.entry(email.clone()).or_insert_with(|| UserRecord {
            name: name.trim().to_string(),
            picture: String::new(),
            password: None,
        });
        record.name = name.trim().to_string();
        record.picture = picture
            .map(str::to_string)
            .unwrap_or_else(|| default_picture(&email));
        let record = record.clone();
        self.save_users(&users)?;
        self.start_session(&email, &record)
    }

    pub fn log_out(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, UserStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_sign_up_then_log_in() {
        let (_dir, store) = store();
        let user = store.sign_up("Alex Rider", "Alex@Example.com ", "s3cret").unwrap();
        assert_eq!(user.email, "alex@example.com");
        assert_eq!(store.current_user().unwrap().unwrap().email, user.email);

        store.log_out().unwrap();
        assert!(store.current_user().unwrap().is_none());

        let again = store.log_in("alex@example.com", "s3cret").unwrap();
        assert_eq!(again.name, "Alex Rider");
    }

    #[test]
    fn test_duplicate_and_wrong_password_messages() {
        let (_dir, store) = store();
        store.sign_up("A", "a@b.c", "pw").unwrap();
        let dup = store.sign_up("B", "a@b.c", "other").unwrap_err();
        assert_eq!(dup.to_string(), "An account with this email already exists.");

        let wrong = store.log_in("a@b.c", "nope").unwrap_err();
        assert_eq!(wrong.to_string(), "Invalid email or password.");
        assert!(matches!(
            store.log_in("missing@b.c", "pw").unwrap_err(),
            AuthError::InvalidCredentials
        ));
    }

    #[test]
    fn test_password_not_stored_in_clear() {
        let (dir, store) = store();
        store.sign_up("A", "a@b.c", "hunter2").unwrap();
        let raw = std::fs::read_to_string(dir.path().join(USERS_FILE)).unwrap();
        assert!(!raw.contains("hunter2"));
        assert!(store.users().unwrap()["a@b.c"].password.is_some());
    }

    #[test]
    fn test_profile_sign_in_has_no_password() {
        let (_dir, store) = store();
        let user = store
            .log_in_with_profile("Alex", "alex@example.com", Some("https://img/p.png"))
            .unwrap();
        assert_eq!(user.picture, "https://img/p.png");
        let users = store.users().unwrap();
        assert!(users["alex@example.com"].password.is_none());
        assert!(store.log_in("alex@example.com", "").is_err());
        assert!(matches!(
            store.log_in_with_profile("x", "not-an-email", None).unwrap_err(),
            AuthError::InvalidEmail
        ));
    }
}
