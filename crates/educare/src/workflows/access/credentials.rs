use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::roles::Role;

pub const DEFAULT_PASSWORD: &str = "password123";

/// Lookup seam for sign-in. Implementations compare exactly; callers trim beforehand.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, role: Role, username: &str, password: &str) -> bool;
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One account per role, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialTable {
    entries: BTreeMap<Role, Credential>,
}

impl CredentialTable {
    pub fn standard() -> Self {
        let entries = [
            (Role::EccdOffice, "eccdadmin"),
            (Role::SeedTeacher, "seedteacher"),
            (Role::EducareTeacher, "educareteacher"),
            (Role::Parent, "parentuser"),
        ]
        .into_iter()
        .map(|(role, username)| (role, Credential::new(username, DEFAULT_PASSWORD)))
        .collect();

        Self { entries }
    }

    /// Reads a `role,username,password` CSV. Roles missing from the file have no account.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CredentialLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = BTreeMap::new();

        for row in csv_reader.deserialize::<CredentialRow>() {
            let row = row?;
            let role = Role::parse(&row.role)
                .ok_or_else(|| CredentialLoadError::UnknownRole(row.role.clone()))?;
            if row.username.is_empty() || row.password.is_empty() {
                return Err(CredentialLoadError::EmptyField(role));
            }
            if entries
                .insert(role, Credential::new(row.username, row.password))
                .is_some()
            {
                return Err(CredentialLoadError::DuplicateRole(role));
            }
        }

        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CredentialLoadError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn account(&self, role: Role) -> Option<&Credential> {
        self.entries.get(&role)
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.entries.keys().copied()
    }
}

impl Default for CredentialTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl CredentialVerifier for CredentialTable {
    fn verify(&self, role: Role, username: &str, password: &str) -> bool {
        self.entries
            .get(&role)
            .is_some_and(|credential| credential.matches(username, password))
    }
}

#[derive(Debug, Deserialize)]
struct CredentialRow {
    role: String,
    username: String,
    password: String,
}

/// Failure loading a `role,username,password` credential table.
#[derive(Debug, thiserror::Error)]
pub enum CredentialLoadError {
    #[error("failed to read credential file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid credential CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("credential file names unknown role `{0}`")]
    UnknownRole(String),
    #[error("credential file lists role `{0}` more than once")]
    DuplicateRole(Role),
    #[error("credential for role `{0}` has an empty username or password")]
    EmptyField(Role),
}
