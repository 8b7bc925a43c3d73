//! Validation at the network boundary.
//!
//! Response bodies are decoded into tagged types here, before anything is
//! handed to a renderer or the plan store. A malformed body fails with
//! [`CoreError::Decode`] instead of reaching the view half-populated.

use crate::error::CoreError;
use crate::models::recovery_plan::{PlanListing, RecoveryPlanRecord};
use crate::models::simplified::SimplifiedResult;

/// Decode the body of the simplification endpoint.
///
/// `simplified_summary` must be present; an empty one is kept as sent.
pub fn simplified_result(body: &[u8]) -> Result<SimplifiedResult, CoreError> {
    serde_json::from_slice(body).map_err(|source| CoreError::Decode {
        what: "simplification result",
        source,
    })
}

/// Decode the body of the plan listing endpoint.
pub fn plan_listing(body: &[u8]) -> Result<Vec<RecoveryPlanRecord>, CoreError> {
    let listing: PlanListing =
        serde_json::from_slice(body).map_err(|source| CoreError::Decode {
            what: "recovery plan listing",
            source,
        })?;
    Ok(listing.recovery_plans)
}
