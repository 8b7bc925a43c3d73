//! In-memory table of recovery plans.
//!
//! Plans are keyed by [`PlanId`] with their listing order kept alongside.
//! Days and tasks stay nested inside each record and are addressed by index,
//! so a task is always reached through the path `(plan id, day, task)`.
//!
//! The current selection is a key into the table rather than a second copy
//! of the plan, so the selected view and the collection cannot drift apart.
//! Every mutation bumps the revision of the touched plan and of the store;
//! views compare revisions to decide what to redraw.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::models::recovery_plan::{PlanId, RecoveryPlanRecord};

#[derive(Debug, Clone)]
struct PlanEntry {
    record: RecoveryPlanRecord,
    revision: u64,
}

#[derive(Debug, Clone, Default)]
pub struct PlanStore {
    order: Vec<PlanId>,
    entries: HashMap<PlanId, PlanEntry>,
    selected: Option<PlanId>,
    revision: u64,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a listing, selecting the first plan.
    pub fn from_records(records: Vec<RecoveryPlanRecord>) -> Self {
        let mut store = Self::new();
        store.replace(records);
        store
    }

    /// Replace the whole collection.
    ///
    /// The first record becomes the selection, or nothing when the listing is
    /// empty. A repeated id keeps its first occurrence.
    pub fn replace(&mut self, records: Vec<RecoveryPlanRecord>) {
        self.order.clear();
        self.entries.clear();

        for record in records {
            if self.entries.contains_key(&record.id) {
                warn!(plan_id = %record.id, "duplicate recovery plan id in listing, keeping first");
                continue;
            }
            self.order.push(record.id.clone());
            self.entries.insert(
                record.id.clone(),
                PlanEntry {
                    record,
                    revision: 0,
                },
            );
        }

        self.selected = self.order.first().cloned();
        self.revision += 1;
        debug!(count = self.order.len(), "recovery plan store replaced");
    }

    /// Drop every plan and the selection.
    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    /// Select a plan. An unknown id is ignored and returns `false`.
    pub fn select(&mut self, id: &PlanId) -> bool {
        if !self.entries.contains_key(id) {
            debug!(plan_id = %id, "ignoring selection of unknown plan");
            return false;
        }
        if self.selected.as_ref() != Some(id) {
            self.selected = Some(id.clone());
            self.revision += 1;
        }
        true
    }

    /// Flip the completion flag of one task and return its new value.
    ///
    /// Nothing is modified when any part of the path does not resolve.
    pub fn toggle_task(
        &mut self,
        id: &PlanId,
        day_index: usize,
        task_index: usize,
    ) -> Result<bool, CoreError> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| CoreError::UnknownPlan(id.clone()))?;

        let days = &mut entry.record.recovery_plan.daily_plans;
        let day_count = days.len();
        let day = days
            .get_mut(day_index)
            .ok_or_else(|| CoreError::DayOutOfRange {
                plan_id: id.clone(),
                day_index,
                days: day_count,
            })?;

        let task_count = day.tasks.len();
        let task = day
            .tasks
            .get_mut(task_index)
            .ok_or_else(|| CoreError::TaskOutOfRange {
                plan_id: id.clone(),
                day_index,
                task_index,
                tasks: task_count,
            })?;

        task.completed = !task.completed;
        let completed = task.completed;

        entry.revision += 1;
        self.revision += 1;
        debug!(plan_id = %id, day_index, task_index, completed, "toggled task");

        Ok(completed)
    }

    /// Plans in listing order.
    pub fn plans(&self) -> impl Iterator<Item = &RecoveryPlanRecord> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|e| &e.record))
    }

    pub fn get(&self, id: &PlanId) -> Option<&RecoveryPlanRecord> {
        self.entries.get(id).map(|e| &e.record)
    }

    /// Position of a plan in listing order.
    pub fn position(&self, id: &PlanId) -> Option<usize> {
        self.order.iter().position(|p| p == id)
    }

    pub fn selected(&self) -> Option<&RecoveryPlanRecord> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn selected_id(&self) -> Option<&PlanId> {
        self.selected.as_ref()
    }

    /// Number of mutations applied to one plan since it was loaded.
    pub fn revision_of(&self, id: &PlanId) -> Option<u64> {
        self.entries.get(id).map(|e| e.revision)
    }

    /// Number of mutations applied to the store as a whole.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
