use std::path::Path;
use std::time::Duration;

use discharge_core::decode;
use discharge_core::endpoints;
use discharge_core::models::recovery_plan::RecoveryPlanRecord;
use discharge_core::models::simplified::SimplifiedResult;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use tracing::{debug, info};

use crate::credential::Credential;
use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` leaves requests without a deadline.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

/// What gets submitted for simplification: a document or pasted text,
/// never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimplifyInput {
    File { name: String, bytes: Vec<u8> },
    Text(String),
}

impl SimplifyInput {
    fn into_form(self) -> Result<Form, ClientError> {
        let form = match self {
            SimplifyInput::File { name, bytes } => {
                let mime = mime_for(&name);
                let part = Part::bytes(bytes).file_name(name).mime_str(mime)?;
                Form::new().part(endpoints::part::FILE, part)
            }
            SimplifyInput::Text(text) => Form::new().text(endpoints::part::TEXT, text),
        };
        Ok(form)
    }
}

fn mime_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    language_code: &'a str,
}

/// Client for the discharge service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got {base_url:?}"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/recovery-plans`
    pub async fn list_recovery_plans(
        &self,
        credential: &Credential,
    ) -> Result<Vec<RecoveryPlanRecord>, ClientError> {
        let url = endpoints::url(&self.base_url, endpoints::RECOVERY_PLANS);
        debug!(%url, "listing recovery plans");

        let response = self
            .http
            .get(&url)
            .bearer_auth(credential.token())
            .send()
            .await?;
        let body = success_body(response).await?;

        let plans = decode::plan_listing(&body)?;
        info!(count = plans.len(), "loaded recovery plans");
        Ok(plans)
    }

    /// `POST /api/discharge/simplify` with exactly one multipart part.
    pub async fn simplify(
        &self,
        credential: &Credential,
        input: SimplifyInput,
    ) -> Result<SimplifiedResult, ClientError> {
        let url = endpoints::url(&self.base_url, endpoints::SIMPLIFY);
        match &input {
            SimplifyInput::File { name, bytes } => {
                info!(file = %name, size = bytes.len(), "submitting discharge document")
            }
            SimplifyInput::Text(text) => {
                info!(chars = text.chars().count(), "submitting discharge text")
            }
        }

        let response = self
            .http
            .post(&url)
            .bearer_auth(credential.token())
            .multipart(input.into_form()?)
            .send()
            .await?;
        let body = success_body(response).await?;

        Ok(decode::simplified_result(&body)?)
    }

    /// `POST /api/tts`, returning the encoded audio.
    pub async fn synthesize_speech(
        &self,
        credential: &Credential,
        text: &str,
        language_code: &str,
    ) -> Result<Vec<u8>, ClientError> {
        let url = endpoints::url(&self.base_url, endpoints::TEXT_TO_SPEECH);
        debug!(%url, language_code, "requesting speech synthesis");

        let response = self
            .http
            .post(&url)
            .bearer_auth(credential.token())
            .json(&SpeechRequest {
                text,
                language_code,
            })
            .send()
            .await?;
        let body = success_body(response).await?;

        info!(bytes = body.len(), "received synthesized speech");
        Ok(body)
    }
}

async fn success_body(response: reqwest::Response) -> Result<Vec<u8>, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.bytes().await?.to_vec())
}
