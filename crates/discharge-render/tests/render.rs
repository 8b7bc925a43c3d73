use discharge_core::decode;
use discharge_core::models::recovery_plan::{
    DailyPlan, PlanId, RecoveryPlanContent, RecoveryPlanRecord, TaskItem,
};
use discharge_core::models::simplified::{ActionDay, SimplifiedResult};
use discharge_core::store::PlanStore;
use discharge_render::components::{MetricCard, Tone, action_timeline, metric_card};
use discharge_render::render::{render_plans, render_result};
use discharge_render::view::{self, ResultView};

fn result(json: &str) -> SimplifiedResult {
    decode::simplified_result(json.as_bytes()).unwrap()
}

fn alert_lines(rendered: &str) -> Vec<&str> {
    rendered
        .lines()
        .filter_map(|l| l.strip_prefix("  (!) "))
        .collect()
}

#[test]
fn empty_danger_signs_render_no_block() {
    let rendered = render_result(&result(
        r#"{"simplified_summary": "Rest at home.", "danger_signs": []}"#,
    ))
    .unwrap();

    assert!(!rendered.contains("RED FLAGS"));
    assert!(alert_lines(&rendered).is_empty());
    assert!(rendered.contains("# Summary\nRest at home."));
}

#[test]
fn one_alert_line_per_danger_sign_in_order() {
    let rendered = render_result(&result(
        r#"{"simplified_summary": "Rest.", "danger_signs": ["Fever", "Bleeding", "Confusion"]}"#,
    ))
    .unwrap();

    assert!(rendered.starts_with("!! RED FLAGS"));
    assert_eq!(alert_lines(&rendered), vec!["Fever", "Bleeding", "Confusion"]);
}

#[test]
fn follow_ups_only_when_present() {
    let without = render_result(&result(r#"{"simplified_summary": "Rest."}"#)).unwrap();
    assert!(!without.contains("Follow-Up Appointments"));

    let with = render_result(&result(
        r#"{"simplified_summary": "Rest.", "follow_up_schedule": [
            {"specialist": "Surgeon", "when": "In 10 days", "purpose": "Remove stitches"}
        ]}"#,
    ))
    .unwrap();
    assert!(with.contains("# Follow-Up Appointments"));
    assert!(with.contains("  - Surgeon: In 10 days (Remove stitches)"));
}

#[test]
fn guidance_supports_list_and_paragraph() {
    let res = result(
        r#"{
            "simplified_summary": "Rest.",
            "lifestyle_changes": ["Walk daily", "Quit smoking"],
            "activity_restrictions": "No heavy lifting for six weeks.",
            "wound_care": ""
        }"#,
    );

    let view = ResultView::from_result(&res).unwrap();
    let titles: Vec<_> = view.guidance.iter().map(|g| g.title).collect();
    assert_eq!(titles, vec![view::LIFESTYLE_TITLE, view::RESTRICTIONS_TITLE]);

    let rendered = render_result(&res).unwrap();
    assert!(rendered.contains("# Lifestyle Changes\n  - Walk daily\n  - Quit smoking"));
    assert!(rendered.contains("# Do NOT Do This\nNo heavy lifting for six weeks."));
    assert!(!rendered.contains("Wound Care"));
}

#[test]
fn citations_fall_back_to_raw_identifier() {
    let rendered = render_result(&result(
        r#"{"simplified_summary": "Rest.", "citations": [
            {"title": "MedlinePlus: Heart attack", "url": "https://medlineplus.gov/heartattack.html"},
            {"url": "https://www.cdc.gov/heartdisease"},
            "PMID:31234567"
        ]}"#,
    ))
    .unwrap();

    assert!(rendered.contains("# Trusted Medical Resources"));
    assert!(rendered.contains(
        "  - MedlinePlus: Heart attack <https://medlineplus.gov/heartattack.html>"
    ));
    assert!(rendered.contains("  - https://www.cdc.gov/heartdisease\n"));
    assert!(rendered.contains("  - PMID:31234567"));
}

#[test]
fn no_citations_block_without_citations() {
    let rendered = render_result(&result(r#"{"simplified_summary": "Rest."}"#)).unwrap();
    assert!(!rendered.contains("Trusted Medical Resources"));
    assert!(rendered.contains("No day-by-day actions were provided."));
}

#[test]
fn evaluation_renders_metric_cards() {
    let rendered = render_result(&result(
        r#"{"simplified_summary": "Rest.", "evaluation": {
            "readability_score": 5.04,
            "safety_warnings_present": false,
            "completeness": {"medications": true, "follow_up": false}
        }}"#,
    ))
    .unwrap();

    assert!(rendered.contains("[+] READABILITY: Grade 5.0 (Plain language)"));
    assert!(rendered.contains("[!] SAFETY WARNINGS: Missing"));
    assert!(rendered.contains("[~] COMPLETENESS: 1/2 (missing: follow_up)"));
}

#[test]
fn calendar_note_only_with_ics_content() {
    let with = render_result(&result(
        r#"{"simplified_summary": "Rest.", "ics_content": "BEGIN:VCALENDAR\nEND:VCALENDAR"}"#,
    ))
    .unwrap();
    assert!(with.contains("saved to your calendar"));

    let without = render_result(&result(r#"{"simplified_summary": "Rest."}"#)).unwrap();
    assert!(!without.contains("saved to your calendar"));
}

#[test]
fn metric_card_defaults_to_blue() {
    let card = MetricCard::new("Tasks", 4);
    assert_eq!(card.tone, Tone::Blue);
    assert_eq!(metric_card(&card).unwrap(), "[i] TASKS: 4");

    let card = MetricCard::new("Status", "Stable")
        .with_subtext("since Monday")
        .with_tone(Tone::Stone);
    assert_eq!(metric_card(&card).unwrap(), "[-] STATUS: Stable (since Monday)");
}

#[test]
fn timeline_lists_tasks_and_medications() {
    let days = vec![
        ActionDay {
            day: "Day 1".to_string(),
            tasks: vec!["Rest".to_string(), "Drink fluids".to_string()],
            medications: vec!["Ibuprofen 400mg".to_string()],
        },
        ActionDay {
            day: "Day 2".to_string(),
            tasks: vec!["Short walk".to_string()],
            medications: Vec::new(),
        },
    ];

    let rendered = action_timeline(&days).unwrap();

    assert!(rendered.contains("(1) Day 1\n    [ ] Rest\n    [ ] Drink fluids\n"));
    assert!(rendered.contains("    Medications to take:\n      * Ibuprofen 400mg"));
    assert!(rendered.contains("(2) Day 2\n    [ ] Short walk"));
    assert_eq!(rendered.matches("Medications to take").count(), 1);
}

#[test]
fn empty_timeline_renders_nothing() {
    assert_eq!(action_timeline(&[]).unwrap(), "");
}

fn record(id: &str, diagnosis: &str, tasks: Vec<(&str, bool)>) -> RecoveryPlanRecord {
    RecoveryPlanRecord {
        id: PlanId::from(id),
        date: "2026-01-20T14:00:00Z".to_string(),
        diagnosis: diagnosis.to_string(),
        recovery_plan: RecoveryPlanContent {
            title: format!("{diagnosis} recovery"),
            subtitle: "Take it slow".to_string(),
            daily_plans: vec![DailyPlan {
                day: "Day 1".to_string(),
                tasks: tasks
                    .into_iter()
                    .map(|(task, completed)| TaskItem {
                        task: task.to_string(),
                        completed,
                    })
                    .collect(),
                medications_to_take: vec!["Metoprolol".to_string(), "Aspirin".to_string()],
            }],
            healthy_habits: vec!["Sleep well".to_string()],
            important_restrictions: Vec::new(),
            emergency_signs: vec!["Chest pain".to_string()],
        },
        uploaded_at: String::new(),
        filename: "summary.pdf".to_string(),
    }
}

#[test]
fn plan_page_marks_selection_and_checkboxes() {
    let mut store = PlanStore::from_records(vec![
        record("a", "Heart attack", vec![("Walk 10 min", false), ("Rest", true)]),
        record("b", "Knee surgery", vec![("Ice the knee", false)]),
    ]);
    store.toggle_task(&PlanId::from("a"), 0, 0).unwrap();

    let rendered = render_plans(&store).unwrap();

    assert!(rendered.contains("  > 2026-01-20  Heart attack  [a]"));
    assert!(rendered.contains("    2026-01-20  Knee surgery  [b]"));
    assert!(rendered.contains("== Heart attack recovery =="));
    assert!(rendered.contains("[1] Day 1  (2/2)"));
    assert!(rendered.contains("    1. [x] Walk 10 min"));
    assert!(rendered.contains("    2. [x] Rest"));
    assert!(rendered.contains("Medications to take: Metoprolol, Aspirin"));
    assert!(rendered.contains("  (!) Chest pain"));
    assert!(!rendered.contains("Important restrictions"));
    assert!(!rendered.contains("Ice the knee"));
}

#[test]
fn plan_page_follows_selection() {
    let mut store = PlanStore::from_records(vec![
        record("a", "Heart attack", vec![("Walk 10 min", false)]),
        record("b", "Knee surgery", vec![("Ice the knee", false)]),
    ]);
    store.select(&PlanId::from("b"));

    let rendered = render_plans(&store).unwrap();

    assert!(rendered.contains("  > 2026-01-20  Knee surgery  [b]"));
    assert!(rendered.contains("    1. [ ] Ice the knee"));
}

#[test]
fn empty_plan_page() {
    let rendered = render_plans(&PlanStore::new()).unwrap();
    assert!(rendered.contains("No recovery plans yet."));
    assert!(!rendered.contains("Your plans:"));
}
