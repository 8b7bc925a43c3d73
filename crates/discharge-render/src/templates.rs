use std::sync::LazyLock;

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::RenderError;

pub(crate) const RESULT: &str = "result.txt";
pub(crate) const PLANS: &str = "plans.txt";
pub(crate) const TIMELINE: &str = "timeline.txt";
pub(crate) const METRIC_CARD: &str = "metric_card.txt";

const SOURCES: &[(&str, &str)] = &[
    (RESULT, include_str!("../templates/result.txt.tera")),
    (PLANS, include_str!("../templates/plans.txt.tera")),
    (TIMELINE, include_str!("../templates/timeline.txt.tera")),
    (METRIC_CARD, include_str!("../templates/metric_card.txt.tera")),
];

// Parsed once on first use.
static ENGINE: LazyLock<Result<Tera, String>> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(SOURCES.iter().copied())
        .map_err(|e| e.to_string())?;
    // Output is terminal text, not HTML.
    tera.autoescape_on(Vec::new());
    Ok(tera)
});

fn engine() -> Result<&'static Tera, RenderError> {
    ENGINE
        .as_ref()
        .map_err(|e| RenderError::TemplateParse(e.clone()))
}

/// Render one of the embedded templates with a serializable view.
pub(crate) fn render<T: Serialize>(name: &str, view: &T) -> Result<String, RenderError> {
    let value = serde_json::to_value(view)?;
    let context =
        Context::from_value(value).map_err(|e| RenderError::TemplateRender(e.to_string()))?;
    let rendered = engine()?.render(name, &context)?;
    Ok(tidy(&rendered))
}

/// Strip trailing spaces and collapse runs of blank lines left by template
/// control tags.
fn tidy(rendered: &str) -> String {
    let mut out = String::with_capacity(rendered.len());
    let mut blank_run = 0;
    for line in rendered.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 || out.is_empty() {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}
