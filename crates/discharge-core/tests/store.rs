use discharge_core::error::CoreError;
use discharge_core::models::recovery_plan::{
    DailyPlan, PlanId, RecoveryPlanContent, RecoveryPlanRecord, TaskItem,
};
use discharge_core::store::PlanStore;

fn task(text: &str, completed: bool) -> TaskItem {
    TaskItem {
        task: text.to_string(),
        completed,
    }
}

fn day(label: &str, tasks: Vec<TaskItem>) -> DailyPlan {
    DailyPlan {
        day: label.to_string(),
        tasks,
        medications_to_take: vec!["Aspirin 81mg".to_string()],
    }
}

fn plan(id: &str, days: Vec<DailyPlan>) -> RecoveryPlanRecord {
    RecoveryPlanRecord {
        id: PlanId::from(id),
        date: "2026-03-01T09:30:00Z".to_string(),
        diagnosis: format!("Diagnosis {id}"),
        recovery_plan: RecoveryPlanContent {
            title: format!("Plan {id}"),
            subtitle: "Your first week home".to_string(),
            daily_plans: days,
            healthy_habits: vec!["Drink water".to_string()],
            important_restrictions: vec!["No lifting".to_string()],
            emergency_signs: vec!["Chest pain".to_string()],
        },
        uploaded_at: "2026-03-01T09:31:00Z".to_string(),
        filename: format!("{id}.pdf"),
    }
}

fn two_plans() -> Vec<RecoveryPlanRecord> {
    vec![
        plan(
            "a",
            vec![
                day("Day 1", vec![task("Walk 10 min", false), task("Rest", true)]),
                day("Day 2", vec![task("Walk 15 min", false)]),
            ],
        ),
        plan(
            "b",
            vec![day("Day 1", vec![task("Change dressing", false)])],
        ),
    ]
}

#[test]
fn toggle_concrete_scenario() {
    let mut store = PlanStore::from_records(vec![plan(
        "a",
        vec![day("Day 1", vec![task("Walk 10 min", false)])],
    )]);
    let id = PlanId::from("a");

    let completed = store.toggle_task(&id, 0, 0).unwrap();

    assert!(completed);
    let day = &store.get(&id).unwrap().recovery_plan.daily_plans[0];
    assert_eq!(day.day, "Day 1");
    assert!(day.tasks[0].completed);
    assert_eq!(day.tasks[0].task, "Walk 10 min");
}

#[test]
fn toggle_touches_exactly_one_task() {
    let before = two_plans();
    let mut store = PlanStore::from_records(before.clone());

    store.toggle_task(&PlanId::from("a"), 0, 1).unwrap();

    let after: Vec<_> = store.plans().cloned().collect();
    assert_eq!(after.len(), before.len());
    for (p_idx, (old, new)) in before.iter().zip(&after).enumerate() {
        assert_eq!(old.id, new.id);
        for (d_idx, (old_day, new_day)) in old
            .recovery_plan
            .daily_plans
            .iter()
            .zip(&new.recovery_plan.daily_plans)
            .enumerate()
        {
            assert_eq!(old_day.day, new_day.day);
            assert_eq!(old_day.medications_to_take, new_day.medications_to_take);
            for (t_idx, (old_task, new_task)) in
                old_day.tasks.iter().zip(&new_day.tasks).enumerate()
            {
                assert_eq!(old_task.task, new_task.task);
                let flipped = p_idx == 0 && d_idx == 0 && t_idx == 1;
                assert_eq!(new_task.completed, old_task.completed != flipped);
            }
        }
    }
}

#[test]
fn toggling_twice_restores_the_flag() {
    let mut store = PlanStore::from_records(two_plans());
    let id = PlanId::from("b");

    assert!(store.toggle_task(&id, 0, 0).unwrap());
    assert!(!store.toggle_task(&id, 0, 0).unwrap());
    assert_eq!(store.get(&id).unwrap(), &two_plans()[1]);
}

#[test]
fn selection_reflects_toggle() {
    let mut store = PlanStore::from_records(two_plans());
    let id = PlanId::from("b");
    assert!(store.select(&id));

    store.toggle_task(&id, 0, 0).unwrap();

    let selected = store.selected().unwrap();
    assert_eq!(selected.id, id);
    assert!(selected.recovery_plan.daily_plans[0].tasks[0].completed);
    assert_eq!(store.selected(), store.get(&id));
}

#[test]
fn toggling_unselected_plan_leaves_selection_content_alone() {
    let mut store = PlanStore::from_records(two_plans());
    let selected_before = store.selected().cloned().unwrap();

    store.toggle_task(&PlanId::from("b"), 0, 0).unwrap();

    assert_eq!(store.selected().unwrap(), &selected_before);
}

#[test]
fn only_toggled_plan_revision_changes() {
    let mut store = PlanStore::from_records(two_plans());
    let a = PlanId::from("a");
    let b = PlanId::from("b");
    let store_rev = store.revision();

    store.toggle_task(&a, 1, 0).unwrap();

    assert_eq!(store.revision_of(&a), Some(1));
    assert_eq!(store.revision_of(&b), Some(0));
    assert!(store.revision() > store_rev);
}

#[test]
fn select_unknown_leaves_selection_unchanged() {
    let mut store = PlanStore::from_records(two_plans());
    store.select(&PlanId::from("b"));
    let rev = store.revision();

    assert!(!store.select(&PlanId::from("missing")));

    assert_eq!(store.selected_id(), Some(&PlanId::from("b")));
    assert_eq!(store.revision(), rev);
}

#[test]
fn replace_selects_first_plan() {
    let store = PlanStore::from_records(two_plans());
    assert_eq!(store.selected_id(), Some(&PlanId::from("a")));
    assert_eq!(store.len(), 2);
}

#[test]
fn empty_listing_has_no_selection() {
    let mut store = PlanStore::from_records(two_plans());
    store.replace(Vec::new());

    assert!(store.is_empty());
    assert!(store.selected().is_none());
    assert_eq!(store.plans().count(), 0);
}

#[test]
fn duplicate_ids_keep_first_occurrence() {
    let mut records = two_plans();
    let mut dup = plan("a", Vec::new());
    dup.diagnosis = "Shadowed".to_string();
    records.push(dup);

    let store = PlanStore::from_records(records);

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(&PlanId::from("a")).unwrap().diagnosis, "Diagnosis a");
    let order: Vec<_> = store.plans().map(|p| p.id.as_str().to_string()).collect();
    assert_eq!(order, vec!["a", "b"]);
}

#[test]
fn out_of_range_toggles_change_nothing() {
    let mut store = PlanStore::from_records(two_plans());
    let a = PlanId::from("a");
    let rev = store.revision();

    assert!(matches!(
        store.toggle_task(&PlanId::from("zzz"), 0, 0),
        Err(CoreError::UnknownPlan(_))
    ));
    assert!(matches!(
        store.toggle_task(&a, 7, 0),
        Err(CoreError::DayOutOfRange { days: 2, .. })
    ));
    assert!(matches!(
        store.toggle_task(&a, 1, 3),
        Err(CoreError::TaskOutOfRange { tasks: 1, .. })
    ));

    assert_eq!(store.revision(), rev);
    let after: Vec<_> = store.plans().cloned().collect();
    assert_eq!(after, two_plans());
}

#[test]
fn progress_counts_completed_tasks() {
    let store = PlanStore::from_records(two_plans());
    let progress = store.get(&PlanId::from("a")).unwrap().recovery_plan.progress();
    assert_eq!(progress.completed, 1);
    assert_eq!(progress.total, 3);
    assert!(!progress.is_done());
}
