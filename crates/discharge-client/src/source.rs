//! Seams between the views and the network.
//!
//! Views depend on these traits rather than on [`ApiClient`] directly so the
//! state machines can be driven without a server.

use std::future::Future;

use discharge_core::models::recovery_plan::RecoveryPlanRecord;
use discharge_core::models::simplified::SimplifiedResult;

use crate::client::{ApiClient, SimplifyInput};
use crate::credential::Credential;
use crate::error::ClientError;

pub trait PlanSource {
    fn list_recovery_plans(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<Vec<RecoveryPlanRecord>, ClientError>> + Send;
}

pub trait Simplifier {
    fn simplify(
        &self,
        credential: &Credential,
        input: SimplifyInput,
    ) -> impl Future<Output = Result<SimplifiedResult, ClientError>> + Send;
}

pub trait SpeechSynthesizer {
    fn synthesize_speech(
        &self,
        credential: &Credential,
        text: &str,
        language_code: &str,
    ) -> impl Future<Output = Result<Vec<u8>, ClientError>> + Send;
}

impl PlanSource for ApiClient {
    async fn list_recovery_plans(
        &self,
        credential: &Credential,
    ) -> Result<Vec<RecoveryPlanRecord>, ClientError> {
        ApiClient::list_recovery_plans(self, credential).await
    }
}

impl Simplifier for ApiClient {
    async fn simplify(
        &self,
        credential: &Credential,
        input: SimplifyInput,
    ) -> Result<SimplifiedResult, ClientError> {
        ApiClient::simplify(self, credential, input).await
    }
}

impl SpeechSynthesizer for ApiClient {
    async fn synthesize_speech(
        &self,
        credential: &Credential,
        text: &str,
        language_code: &str,
    ) -> Result<Vec<u8>, ClientError> {
        ApiClient::synthesize_speech(self, credential, text, language_code).await
    }
}
