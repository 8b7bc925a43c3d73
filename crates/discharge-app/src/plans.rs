//! The recovery plan view: loads the caller's plans, tracks which one is
//! shown, and lets tasks be ticked off.

use discharge_client::credential::Credential;
use discharge_client::error::ClientError;
use discharge_client::source::PlanSource;
use discharge_core::error::CoreError;
use discharge_core::models::recovery_plan::{PlanId, RecoveryPlanRecord};
use discharge_core::store::PlanStore;
use tracing::{error, info, warn};

pub const LOAD_FAILED: &str = "Failed to load recovery plans";
pub const NETWORK_ERROR: &str = "Network error. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
    /// No credential was available; the user has to log in first.
    LoginRequired,
}

#[derive(Debug, Default)]
pub struct RecoveryPlanManager {
    store: PlanStore,
    state: LoadState,
    credential: Option<Credential>,
}

impl RecoveryPlanManager {
    pub fn new(credential: Option<Credential>) -> Self {
        Self {
            store: PlanStore::new(),
            state: LoadState::Idle,
            credential,
        }
    }

    /// Fetch the plan listing and replace the store with it.
    ///
    /// Without a credential no request is made.
    pub async fn load<S: PlanSource>(&mut self, source: &S) {
        let Some(credential) = &self.credential else {
            info!("no credential, login required before loading plans");
            self.state = LoadState::LoginRequired;
            return;
        };

        self.state = LoadState::Loading;
        let outcome = source.list_recovery_plans(credential).await;
        self.apply(outcome);
    }

    fn apply(&mut self, outcome: Result<Vec<RecoveryPlanRecord>, ClientError>) {
        match outcome {
            Ok(records) => {
                self.store.replace(records);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                error!(error = %e, "failed to load recovery plans");
                self.store.clear();
                self.state = LoadState::Failed(load_failure_message(&e).to_string());
            }
        }
    }

    pub fn select(&mut self, id: &PlanId) -> bool {
        self.store.select(id)
    }

    /// Toggle a task locally. The change is not sent anywhere and is lost on
    /// the next load.
    pub fn toggle_task(
        &mut self,
        id: &PlanId,
        day_index: usize,
        task_index: usize,
    ) -> Result<bool, CoreError> {
        self.store.toggle_task(id, day_index, task_index)
    }

    /// Toggle a task of the selected plan, if any.
    pub fn toggle_selected(
        &mut self,
        day_index: usize,
        task_index: usize,
    ) -> Option<Result<bool, CoreError>> {
        let id = self.store.selected_id()?.clone();
        Some(self.toggle_task(&id, day_index, task_index))
    }

    pub fn store(&self) -> &PlanStore {
        &self.store
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}

fn load_failure_message(error: &ClientError) -> &'static str {
    match error {
        ClientError::Transport(_) => NETWORK_ERROR,
        ClientError::Status { status, .. } => {
            warn!(status, "recovery plan listing rejected");
            LOAD_FAILED
        }
        _ => LOAD_FAILED,
    }
}
