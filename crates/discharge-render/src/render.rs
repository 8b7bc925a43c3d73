use discharge_core::models::simplified::SimplifiedResult;
use discharge_core::store::PlanStore;
use tracing::debug;

use crate::error::RenderError;
use crate::templates;
use crate::view::{PlanPageView, ResultView};

/// Render a simplification result as terminal text.
pub fn render_result(result: &SimplifiedResult) -> Result<String, RenderError> {
    let view = ResultView::from_result(result)?;
    debug!(
        danger_signs = view.danger_signs.as_ref().map_or(0, Vec::len),
        guidance_blocks = view.guidance.len(),
        "rendering simplification result"
    );
    templates::render(templates::RESULT, &view)
}

/// Render the recovery plan page: the plan list and the selected plan.
pub fn render_plans(store: &PlanStore) -> Result<String, RenderError> {
    templates::render(templates::PLANS, &PlanPageView::from_store(store))
}
