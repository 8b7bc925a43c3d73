//! Everything a view needs from its surroundings, resolved once at startup.

use discharge_client::client::ApiClient;
use discharge_client::credential::{Credential, CredentialFile};

use crate::config::AppConfig;

/// Environment variable that takes precedence over the credential file.
pub const TOKEN_ENV: &str = "DISCHARGE_TOKEN";

#[derive(Debug, Clone)]
pub struct AppContext {
    pub client: ApiClient,
    pub credential: Option<Credential>,
    pub language_code: String,
    pub audio_player: Option<String>,
}

impl AppContext {
    pub fn new(config: &AppConfig, credential: Option<Credential>) -> eyre::Result<Self> {
        let client = ApiClient::new(&config.client_config())?;
        Ok(Self {
            client,
            credential,
            language_code: config.language_code.clone(),
            audio_player: config.audio_player.clone(),
        })
    }
}

/// Resolve the credential from `env_token` first, then the credential file.
pub fn resolve_credential(
    env_token: Option<String>,
    file: &CredentialFile,
) -> eyre::Result<Option<Credential>> {
    if let Some(credential) = env_token.and_then(Credential::new) {
        tracing::debug!("using credential from {TOKEN_ENV}");
        return Ok(Some(credential));
    }
    Ok(file.load()?)
}
