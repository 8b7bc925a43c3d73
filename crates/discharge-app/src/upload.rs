//! The upload view: pick a document or paste text, submit it, keep the
//! outcome.

use std::path::{Path, PathBuf};

use discharge_client::client::SimplifyInput;
use discharge_client::credential::Credential;
use discharge_client::error::ClientError;
use discharge_client::source::Simplifier;
use discharge_core::models::simplified::SimplifiedResult;
use thiserror::Error;
use tracing::{info, warn};

pub const MISSING_INPUT: &str = "Please provide a file or text.";
pub const PROCESSING_FAILED: &str = "Failed to process discharge instructions.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please provide a file or text.")]
    MissingInput,
    #[error("login required")]
    LoginRequired,
}

/// A document read from disk and held until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "discharge-summary".to_string());
        Ok(Self {
            path: path.to_path_buf(),
            name,
            bytes,
        })
    }
}

/// Either a file or pasted text; the text box is disabled while a file is
/// selected.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    file: Option<SelectedFile>,
    text: String,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selecting a file discards any pasted text.
    pub fn select_file(&mut self, file: SelectedFile) {
        self.text.clear();
        self.file = Some(file);
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    /// Ignored while a file is selected.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        if self.file.is_some() {
            return false;
        }
        self.text = text.into();
        true
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn can_submit(&self) -> bool {
        self.file.is_some() || !self.text.is_empty()
    }

    fn to_input(&self) -> Option<SimplifyInput> {
        if let Some(file) = &self.file {
            return Some(SimplifyInput::File {
                name: file.name.clone(),
                bytes: file.bytes.clone(),
            });
        }
        (!self.text.is_empty()).then(|| SimplifyInput::Text(self.text.clone()))
    }
}

/// State of one submission at a time: in flight, its result, or its error.
#[derive(Debug, Clone, Default)]
pub struct SubmitFlow {
    loading: bool,
    result: Option<SimplifiedResult>,
    error: Option<String>,
}

impl SubmitFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the form and mark the submission as in flight.
    pub fn begin(&mut self, form: &UploadForm) -> Result<SimplifyInput, SubmitError> {
        let Some(input) = form.to_input() else {
            self.error = Some(MISSING_INPUT.to_string());
            return Err(SubmitError::MissingInput);
        };
        self.result = None;
        self.error = None;
        self.loading = true;
        Ok(input)
    }

    /// Record the outcome of a submission. `loading` is always cleared.
    pub fn finish(&mut self, outcome: Result<SimplifiedResult, ClientError>) {
        self.loading = false;
        match outcome {
            Ok(result) => {
                info!(
                    days = result.action_plan.len(),
                    danger_signs = result.danger_signs.len(),
                    "discharge instructions simplified"
                );
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "simplification failed");
                self.result = None;
                self.error = Some(failure_message(&e));
            }
        }
    }

    /// Validate, send and record. Validation errors are returned before any
    /// request is made; request failures end up in [`SubmitFlow::error`].
    pub async fn submit<S: Simplifier>(
        &mut self,
        simplifier: &S,
        credential: Option<&Credential>,
        form: &UploadForm,
    ) -> Result<(), SubmitError> {
        if !form.can_submit() {
            self.error = Some(MISSING_INPUT.to_string());
            return Err(SubmitError::MissingInput);
        }
        let Some(credential) = credential else {
            info!("no credential, login required before submitting");
            return Err(SubmitError::LoginRequired);
        };

        let input = self.begin(form)?;
        let outcome = simplifier.simplify(credential, input).await;
        self.finish(outcome);
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&SimplifiedResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

fn failure_message(error: &ClientError) -> String {
    match error {
        ClientError::Transport(e) => e.to_string(),
        _ => PROCESSING_FAILED.to_string(),
    }
}
