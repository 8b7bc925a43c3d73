use std::path::{Path, PathBuf};
use std::time::Duration;

use discharge_client::client::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const APP_DIR: &str = "discharge-companion";
const FILE_NAME: &str = "config.json";

pub const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
    /// Language sent with read-aloud requests.
    #[serde(default = "default_language")]
    pub language_code: String,
    /// Command that plays an audio file, e.g. `mpv --really-quiet`. The file
    /// path is appended as the last argument.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub audio_player: Option<String>,
    /// Unset means requests never time out.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_base_url: default_base_url(),
            language_code: default_language(),
            audio_player: None,
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// The directory holding `config.json`.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn default_location() -> eyre::Result<Self> {
        let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
        Ok(Self::at(base.join(APP_DIR)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(FILE_NAME)
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Load the config, falling back to defaults when none has been saved.
    pub fn load(&self) -> eyre::Result<AppConfig> {
        let path = self.path();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(AppConfig::default());
            }
            Err(e) => {
                return Err(eyre::eyre!(
                    "failed to read config at {}: {e}",
                    path.display()
                ));
            }
        };

        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(&contents)?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;

        let migrated = migrate(json, on_disk_version)?;
        let config: AppConfig = serde_json::from_value(migrated)?;
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> eyre::Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Always write the current version, regardless of what was loaded.
        let mut stamped = config.clone();
        stamped.config_version = CURRENT_VERSION;

        let path = self.path();
        let json = serde_json::to_string_pretty(&stamped)?;

        let tmp_path = self.dir.join(format!("{FILE_NAME}.tmp"));
        std::fs::write(&tmp_path, json.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&tmp_path, &path)?;

        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    pub fn delete(&self) -> eyre::Result<()> {
        let path = self.path();
        if path.exists() {
            std::fs::remove_file(&path)?;
            tracing::info!(path = %path.display(), "config deleted");
        }
        Ok(())
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update discharge."
        ));
    }

    // v0 → v1: `base_url` became `api_base_url`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(url) = obj.remove("base_url") {
            obj.entry("api_base_url").or_insert(url);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (renamed base_url)");
    }

    Ok(json)
}
