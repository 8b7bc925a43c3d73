use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// The structured output of the simplification endpoint.
///
/// Only `simplified_summary` is required. List fields that are absent or
/// `null` decode as empty lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedResult {
    pub simplified_summary: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub danger_signs: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub action_plan: Vec<ActionDay>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub follow_up_schedule: Vec<FollowUp>,

    #[serde(default)]
    pub lifestyle_changes: Option<Guidance>,

    #[serde(default)]
    pub activity_restrictions: Option<Guidance>,

    #[serde(default)]
    pub wound_care: Option<Guidance>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub citations: Vec<Citation>,

    #[serde(default)]
    pub evaluation: Option<Evaluation>,

    /// Raw calendar-file text for the follow-up schedule.
    #[serde(default)]
    pub ics_content: Option<String>,
}

/// One day of the action plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDay {
    pub day: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub medications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    #[serde(default)]
    pub specialist: String,
    #[serde(default)]
    pub when: String,
    #[serde(default)]
    pub purpose: String,
}

/// Guidance the backend sends either as a list of items or as one paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Guidance {
    Items(Vec<String>),
    Text(String),
}

impl Guidance {
    /// A non-empty list or a non-empty string.
    pub fn is_present(&self) -> bool {
        match self {
            Guidance::Items(items) => !items.is_empty(),
            Guidance::Text(text) => !text.trim().is_empty(),
        }
    }
}

/// A trusted resource backing the simplified content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Citation {
    Plain(String),
    Linked {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl Citation {
    pub const FALLBACK_LABEL: &'static str = "Medical resource";

    /// Display title, falling back to the raw identifier.
    pub fn label(&self) -> &str {
        match self {
            Citation::Plain(id) => id,
            Citation::Linked { title, url } => title
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .or(url.as_deref())
                .unwrap_or(Self::FALLBACK_LABEL),
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            Citation::Plain(_) => None,
            Citation::Linked { url, .. } => url.as_deref().filter(|u| !u.is_empty()),
        }
    }
}

/// Backend self-assessment of the simplified output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default)]
    pub readability_score: Option<f64>,
    #[serde(default)]
    pub safety_warnings_present: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completeness: BTreeMap<String, bool>,
}

impl Evaluation {
    /// (flags set, flags total)
    pub fn completeness_ratio(&self) -> (usize, usize) {
        let met = self.completeness.values().filter(|v| **v).count();
        (met, self.completeness.len())
    }
}
