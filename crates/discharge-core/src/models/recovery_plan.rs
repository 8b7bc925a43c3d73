use std::fmt;

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Opaque identifier of a recovery plan, unique within a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(String);

impl PlanId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlanId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlanId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A previously generated recovery plan, as returned by the plan listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryPlanRecord {
    pub id: PlanId,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub diagnosis: String,
    pub recovery_plan: RecoveryPlanContent,
    #[serde(default)]
    pub uploaded_at: String,
    #[serde(default)]
    pub filename: String,
}

impl RecoveryPlanRecord {
    /// The creation date as `YYYY-MM-DD`.
    ///
    /// The backend sends either an RFC 3339 timestamp, a civil datetime or a
    /// bare date. Anything else is returned unchanged.
    pub fn display_date(&self) -> String {
        let raw = self.date.trim();
        if let Ok(ts) = raw.parse::<jiff::Timestamp>() {
            return ts.to_zoned(jiff::tz::TimeZone::UTC).date().to_string();
        }
        if let Ok(dt) = raw.parse::<jiff::civil::DateTime>() {
            return dt.date().to_string();
        }
        if let Ok(date) = raw.parse::<jiff::civil::Date>() {
            return date.to_string();
        }
        self.date.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecoveryPlanContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Day 1 first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily_plans: Vec<DailyPlan>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub healthy_habits: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub important_restrictions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emergency_signs: Vec<String>,
}

impl RecoveryPlanContent {
    pub fn progress(&self) -> Progress {
        self.daily_plans
            .iter()
            .fold(Progress::default(), |acc, day| Progress {
                completed: acc.completed + day.completed_count(),
                total: acc.total + day.tasks.len(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyPlan {
    /// Human-readable label, e.g. "Day 1".
    pub day: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<TaskItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub medications_to_take: Vec<String>,
}

impl DailyPlan {
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskItem {
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

/// Completed vs. total task count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_done(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Body of the plan listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanListing {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovery_plans: Vec<RecoveryPlanRecord>,
}
