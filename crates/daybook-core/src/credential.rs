//! Credential storage
//!
//! The API issues an access/refresh token pair on login or registration.
//! Tokens persist to a JSON file under the data directory so later runs
//! can inject them without prompting again. Nothing in this crate reads
//! the file implicitly: callers load a `Credential` and hand it to the
//! client on construction.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::Config;

/// A bearer token pair issued by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access: String,
    pub refresh: String,
}

impl Credential {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

/// On-disk home for the credential file
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store at the configured credentials path
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.credentials_path(),
        }
    }

    /// Store at a specific path (useful for testing)
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the saved credential, if any
    pub fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read credentials file: {:?}", self.path))?;
        let credential = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse credentials file: {:?}", self.path))?;
        Ok(Some(credential))
    }

    /// Write the credential, restricting the file to the current user
    pub fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {:?}", parent))?;
        }

        let content =
            serde_json::to_string_pretty(credential).context("Failed to serialize credentials")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write credentials file: {:?}", self.path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| {
                    format!("Failed to restrict credentials file: {:?}", self.path)
                })?;
        }

        Ok(())
    }

    /// Delete the credential file. Returns whether anything was removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove credentials file: {:?}", self.path))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store(temp_dir: &TempDir) -> CredentialStore {
        CredentialStore::at_path(temp_dir.path().join("credentials.json"))
    }

    #[test]
    fn test_load_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        assert!(!store.exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let credential = Credential::new("access-token", "refresh-token");
        store.save(&credential).unwrap();

        assert!(store.exists());
        assert_eq!(store.load().unwrap(), Some(credential));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::at_path(temp_dir.path().join("nested/dir/credentials.json"));

        store.save(&Credential::new("a", "r")).unwrap();
        assert!(store.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.save(&Credential::new("a", "r")).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_clear_reports_removal() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        assert!(!store.clear().unwrap());

        store.save(&Credential::new("a", "r")).unwrap();
        assert!(store.clear().unwrap());
        assert!(!store.exists());
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn test_load_corrupt_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        std::fs::write(store.path(), "not json").unwrap();
        assert!(store.load().is_err());
    }
}
