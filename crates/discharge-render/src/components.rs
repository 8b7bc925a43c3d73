//! Small presentational pieces shared by the result and plan pages.

use discharge_core::models::simplified::ActionDay;
use serde::Serialize;

use crate::error::RenderError;
use crate::templates;

/// Colour family of a metric card, rendered as a marker in text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Blue,
    Green,
    Red,
    Amber,
    Stone,
}

impl Tone {
    pub fn marker(self) -> &'static str {
        match self {
            Tone::Blue => "[i]",
            Tone::Green => "[+]",
            Tone::Red => "[!]",
            Tone::Amber => "[~]",
            Tone::Stone => "[-]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub subtext: Option<String>,
    pub tone: Tone,
}

impl MetricCard {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
            subtext: None,
            tone: Tone::default(),
        }
    }

    pub fn with_subtext(mut self, subtext: impl Into<String>) -> Self {
        self.subtext = Some(subtext.into());
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

#[derive(Serialize)]
struct MetricCardView<'a> {
    marker: &'static str,
    label: String,
    value: &'a str,
    subtext: Option<&'a str>,
}

/// One line: tone marker, upper-cased label, value and optional subtext.
pub fn metric_card(card: &MetricCard) -> Result<String, RenderError> {
    let view = MetricCardView {
        marker: card.tone.marker(),
        label: card.label.to_uppercase(),
        value: &card.value,
        subtext: card.subtext.as_deref(),
    };
    Ok(templates::render(templates::METRIC_CARD, &view)?
        .trim_end()
        .to_string())
}

#[derive(Serialize)]
struct TimelineView<'a> {
    days: &'a [ActionDay],
}

/// The day-by-day action plan with an open checkbox per task.
pub fn action_timeline(days: &[ActionDay]) -> Result<String, RenderError> {
    templates::render(templates::TIMELINE, &TimelineView { days })
}
