use thiserror::Error;

use crate::models::recovery_plan::PlanId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("recovery plan not found: {0}")]
    UnknownPlan(PlanId),

    #[error("day {day_index} is out of range for plan {plan_id} ({days} days)")]
    DayOutOfRange {
        plan_id: PlanId,
        day_index: usize,
        days: usize,
    },

    #[error("task {task_index} is out of range for day {day_index} of plan {plan_id} ({tasks} tasks)")]
    TaskOutOfRange {
        plan_id: PlanId,
        day_index: usize,
        task_index: usize,
        tasks: usize,
    },
}
