use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::io::journal::{self, JournalCategory, JournalEntry, atomic_write};

/// Name of the identity slot inside the data directory
pub const PROFILE_FILE: &str = "profile.json";

/// The signed-in user, as exposed to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
}

/// The gate condition consumed by the view layer. Always one of exactly
/// three things, never a nullable-plus-boolean combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Loading,
    SignedIn(UserProfile),
    SignedOut,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("email and password are required")]
    MissingCredentials,
    #[error("no account found for {0}")]
    UnknownAccount(String),
    #[error("could not save profile: {0}")]
    Save(#[from] std::io::Error),
}

/// The identity collaborator boundary. The tracker treats whatever sits
/// behind this as a black box that yields the tri-state gate.
pub trait IdentityProvider {
    fn state(&self) -> AuthState;
    /// Resolve `Loading` by reading whatever backs the provider.
    fn load(&mut self);
    fn sign_in(&mut self, email: &str, password: &str) -> Result<UserProfile, IdentityError>;
    fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserProfile, IdentityError>;
    fn sign_out(&mut self);
}

/// On-disk shape of the identity slot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRecord {
    email: String,
    name: String,
    signed_in: bool,
}

/// File-backed provider: one profile per device. Credentials are not
/// persisted; sign-in matches the stored email. All users on one device
/// share the same study data either way.
pub struct LocalIdentity {
    data_dir: PathBuf,
    state: AuthState,
}

impl LocalIdentity {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        LocalIdentity {
            data_dir: data_dir.into(),
            state: AuthState::Loading,
        }
    }

    fn profile_path(&self) -> PathBuf {
        self.data_dir.join(PROFILE_FILE)
    }

    fn read_record(&self) -> Option<ProfileRecord> {
        let text = fs::read_to_string(self.profile_path()).ok()?;
        match serde_json::from_str(&text) {
            Ok(record) => Some(record),
            Err(e) => {
                journal::log_journal(
                    &self.data_dir,
                    JournalEntry::now(
                        JournalCategory::Identity,
                        format!("{} unreadable, signed out: {}", PROFILE_FILE, e),
                        text,
                    ),
                );
                None
            }
        }
    }

    fn write_record(&self, record: &ProfileRecord) -> Result<(), IdentityError> {
        fs::create_dir_all(&self.data_dir)?;
        let content = serde_json::to_string_pretty(record)
            .expect("profile record serializes");
        atomic_write(&self.profile_path(), content.as_bytes())?;
        Ok(())
    }
}

impl IdentityProvider for LocalIdentity {
    fn state(&self) -> AuthState {
        self.state.clone()
    }

    fn load(&mut self) {
        if self.state != AuthState::Loading {
            return;
        }
        self.state = match self.read_record() {
            Some(record) if record.signed_in => AuthState::SignedIn(UserProfile {
                email: record.email,
                name: record.name,
            }),
            _ => AuthState::SignedOut,
        };
    }

    fn sign_in(&mut self, email: &str, password: &str) -> Result<UserProfile, IdentityError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(IdentityError::MissingCredentials);
        }
        let Some(mut record) = self.read_record() else {
            return Err(IdentityError::UnknownAccount(email.to_string()));
        };
        if !record.email.eq_ignore_ascii_case(email.trim()) {
            return Err(IdentityError::UnknownAccount(email.to_string()));
        }
        record.signed_in = true;
        self.write_record(&record)?;
        let profile = UserProfile {
            email: record.email,
            name: record.name,
        };
        self.state = AuthState::SignedIn(profile.clone());
        Ok(profile)
    }

    fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserProfile, IdentityError> {
        if email.trim().is_empty() || password.is_empty() || name.trim().is_empty() {
            return Err(IdentityError::MissingCredentials);
        }
        let record = ProfileRecord {
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            signed_in: true,
        };
        self.write_record(&record)?;
        let profile = UserProfile {
            email: record.email,
            name: record.name,
        };
        self.state = AuthState::SignedIn(profile.clone());
        Ok(profile)
    }

    fn sign_out(&mut self) {
        if let Some(mut record) = self.read_record() {
            record.signed_in = false;
            let _ = self.write_record(&record);
        }
        self.state = AuthState::SignedOut;
    }
}
