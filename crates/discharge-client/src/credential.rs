//! Bearer credential and its on-disk home.
//!
//! The token is read once at startup and passed into each view, never looked
//! up from ambient state mid-request.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ClientError;

const APP_DIR: &str = "discharge-companion";
const FILE_NAME: &str = "credential";

/// An access token attached as `Authorization: Bearer <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for a blank token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&redact(&self.0)).finish()
    }
}

fn redact(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}

/// The persisted credential, one token per file.
#[derive(Debug, Clone)]
pub struct CredentialFile {
    path: PathBuf,
}

impl CredentialFile {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/discharge-companion/credential`
    pub fn default_location() -> Result<Self, ClientError> {
        let base = dirs::config_dir()
            .ok_or_else(|| ClientError::Config("no config directory found".to_string()))?;
        Ok(Self::at(base.join(APP_DIR).join(FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file or blank contents means no credential.
    pub fn load(&self) -> Result<Option<Credential>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Credential::new(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, credential: &Credential) -> Result<(), ClientError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, credential.token().as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&tmp_path, &self.path)?;

        info!(path = %self.path.display(), "credential saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            info!(path = %self.path.display(), "credential removed");
        }
        Ok(())
    }
}
