//! View models handed to the templates.
//!
//! All show/hide decisions are made here so the templates only lay out what
//! they are given: a block that should not appear is `None` or left out.

use discharge_core::models::recovery_plan::RecoveryPlanRecord;
use discharge_core::models::simplified::{Evaluation, FollowUp, Guidance, SimplifiedResult};
use discharge_core::store::PlanStore;
use serde::Serialize;

use crate::components::{self, MetricCard, Tone};
use crate::error::RenderError;

/// Readability grade at or below which the summary counts as plain language.
pub const PLAIN_LANGUAGE_GRADE: f64 = 8.0;

pub const LIFESTYLE_TITLE: &str = "Lifestyle Changes";
pub const RESTRICTIONS_TITLE: &str = "Do NOT Do This";
pub const WOUND_CARE_TITLE: &str = "Wound Care & Hygiene";

#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub danger_signs: Option<Vec<String>>,
    pub summary: String,
    pub timeline: String,
    pub follow_ups: Option<Vec<FollowUp>>,
    /// Lifestyle, restriction and wound-care blocks that have content, in
    /// that order.
    pub guidance: Vec<GuidanceBlock>,
    pub citations: Option<Vec<CitationLink>>,
    pub metrics: Vec<String>,
    pub calendar_available: bool,
}

/// Guidance shown either as bullet items or as one paragraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidanceBlock {
    pub title: &'static str,
    pub items: Vec<String>,
    pub paragraph: Option<String>,
}

impl GuidanceBlock {
    fn from_guidance(title: &'static str, guidance: Option<&Guidance>) -> Option<Self> {
        let guidance = guidance.filter(|g| g.is_present())?;
        Some(match guidance {
            Guidance::Items(items) => GuidanceBlock {
                title,
                items: items.clone(),
                paragraph: None,
            },
            Guidance::Text(text) => GuidanceBlock {
                title,
                items: Vec::new(),
                paragraph: Some(text.trim().to_string()),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitationLink {
    pub label: String,
    pub href: Option<String>,
}

impl ResultView {
    pub fn from_result(result: &SimplifiedResult) -> Result<Self, RenderError> {
        let non_empty = |items: &Vec<String>| (!items.is_empty()).then(|| items.clone());

        let citations = (!result.citations.is_empty()).then(|| {
            result
                .citations
                .iter()
                .map(|c| CitationLink {
                    label: c.label().to_string(),
                    href: c.href().map(str::to_string),
                })
                .collect()
        });

        let metrics = match &result.evaluation {
            Some(evaluation) => evaluation_cards(evaluation)
                .iter()
                .map(components::metric_card)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            danger_signs: non_empty(&result.danger_signs),
            summary: result.simplified_summary.trim().to_string(),
            timeline: components::action_timeline(&result.action_plan)?,
            follow_ups: (!result.follow_up_schedule.is_empty())
                .then(|| result.follow_up_schedule.clone()),
            guidance: [
                (LIFESTYLE_TITLE, result.lifestyle_changes.as_ref()),
                (RESTRICTIONS_TITLE, result.activity_restrictions.as_ref()),
                (WOUND_CARE_TITLE, result.wound_care.as_ref()),
            ]
            .into_iter()
            .filter_map(|(title, guidance)| GuidanceBlock::from_guidance(title, guidance))
            .collect(),
            citations,
            metrics,
            calendar_available: result
                .ics_content
                .as_deref()
                .is_some_and(|ics| !ics.trim().is_empty()),
        })
    }
}

/// Metric cards summarising the backend's evaluation of its own output.
pub fn evaluation_cards(evaluation: &Evaluation) -> Vec<MetricCard> {
    let mut cards = Vec::new();

    if let Some(score) = evaluation.readability_score {
        let plain = score <= PLAIN_LANGUAGE_GRADE;
        cards.push(MetricCard {
            label: "Readability".to_string(),
            value: format!("Grade {score:.1}"),
            subtext: Some(if plain {
                "Plain language".to_string()
            } else {
                "Above plain-language level".to_string()
            }),
            tone: if plain { Tone::Green } else { Tone::Amber },
        });
    }

    cards.push(MetricCard {
        label: "Safety warnings".to_string(),
        value: if evaluation.safety_warnings_present {
            "Included".to_string()
        } else {
            "Missing".to_string()
        },
        subtext: None,
        tone: if evaluation.safety_warnings_present {
            Tone::Green
        } else {
            Tone::Red
        },
    });

    if !evaluation.completeness.is_empty() {
        let (met, total) = evaluation.completeness_ratio();
        let missing: Vec<&str> = evaluation
            .completeness
            .iter()
            .filter(|(_, present)| !**present)
            .map(|(name, _)| name.as_str())
            .collect();
        cards.push(MetricCard {
            label: "Completeness".to_string(),
            value: format!("{met}/{total}"),
            subtext: (!missing.is_empty()).then(|| format!("missing: {}", missing.join(", "))),
            tone: if met == total { Tone::Green } else { Tone::Amber },
        });
    }

    cards
}

// ── Recovery plan page ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PlanPageView {
    pub plans: Vec<PlanListItem>,
    pub selected: Option<PlanDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanListItem {
    pub id: String,
    pub date: String,
    pub diagnosis: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanDetail {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub diagnosis: String,
    pub completed: usize,
    pub total: usize,
    pub days: Vec<DayDetail>,
    pub healthy_habits: Vec<String>,
    pub restrictions: Vec<String>,
    pub emergency_signs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayDetail {
    pub label: String,
    pub completed: usize,
    pub total: usize,
    pub tasks: Vec<TaskLine>,
    pub medications: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskLine {
    pub text: String,
    pub completed: bool,
}

impl PlanPageView {
    pub fn from_store(store: &PlanStore) -> Self {
        let selected_id = store.selected_id();
        Self {
            plans: store
                .plans()
                .map(|p| PlanListItem {
                    id: p.id.to_string(),
                    date: p.display_date(),
                    diagnosis: p.diagnosis.clone(),
                    selected: Some(&p.id) == selected_id,
                })
                .collect(),
            selected: store.selected().map(PlanDetail::from_record),
        }
    }
}

impl PlanDetail {
    fn from_record(record: &RecoveryPlanRecord) -> Self {
        let content = &record.recovery_plan;
        let progress = content.progress();
        Self {
            id: record.id.to_string(),
            title: content.title.clone(),
            subtitle: content.subtitle.clone(),
            date: record.display_date(),
            diagnosis: record.diagnosis.clone(),
            completed: progress.completed,
            total: progress.total,
            days: content
                .daily_plans
                .iter()
                .map(|day| DayDetail {
                    label: day.day.clone(),
                    completed: day.completed_count(),
                    total: day.tasks.len(),
                    tasks: day
                        .tasks
                        .iter()
                        .map(|t| TaskLine {
                            text: t.task.clone(),
                            completed: t.completed,
                        })
                        .collect(),
                    medications: day.medications_to_take.clone(),
                })
                .collect(),
            healthy_habits: content.healthy_habits.clone(),
            restrictions: content.important_restrictions.clone(),
            emergency_signs: content.emergency_signs.clone(),
        }
    }
}
