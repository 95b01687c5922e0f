use tacora_core::{suggest, Priority, TaskKind};

const HOUR_MS: i64 = 3_600_000;
const NOW_MS: i64 = 1_700_000_000_000;

fn due_in(hours: i64) -> i64 {
    NOW_MS + hours * HOUR_MS
}

#[test]
fn base_estimate_depends_on_task_kind() {
    let work = suggest("tidy desk", TaskKind::Work, due_in(200), NOW_MS);
    let school = suggest("tidy desk", TaskKind::School, due_in(200), NOW_MS);
    let club = suggest("tidy desk", TaskKind::Club, due_in(200), NOW_MS);

    assert_eq!(work.estimated_mins, 90);
    assert_eq!(school.estimated_mins, 60);
    assert_eq!(club.estimated_mins, 30);
}

#[test]
fn keyword_bumps_accumulate_across_rule_groups() {
    // School base 60, long-form +45, build-work +30.
    let suggestion = suggest("write lab report", TaskKind::School, due_in(200), NOW_MS);
    assert_eq!(suggestion.estimated_mins, 135);

    // Repeated keywords inside one group only count once.
    let repeated = suggest("report essay proposal", TaskKind::School, due_in(200), NOW_MS);
    assert_eq!(repeated.estimated_mins, 105);
}

#[test]
fn estimates_stay_on_the_quarter_hour_grid_within_bounds() {
    for title in ["", "sync", "final exam review project debug", "call"] {
        for kind in [
            TaskKind::Work,
            TaskKind::School,
            TaskKind::Group,
            TaskKind::Club,
            TaskKind::Other,
        ] {
            let suggestion = suggest(title, kind, due_in(10), NOW_MS);
            assert!(suggestion.estimated_mins >= 15);
            assert!(suggestion.estimated_mins <= 240);
            assert_eq!(suggestion.estimated_mins % 15, 0);
        }
    }
}

#[test]
fn priority_follows_deadline_proximity() {
    assert_eq!(
        suggest("tidy desk", TaskKind::Other, due_in(10), NOW_MS).priority,
        Priority::High
    );
    assert_eq!(
        suggest("tidy desk", TaskKind::Other, due_in(48), NOW_MS).priority,
        Priority::Medium
    );
    assert_eq!(
        suggest("tidy desk", TaskKind::Other, due_in(100), NOW_MS).priority,
        Priority::Low
    );
}

#[test]
fn school_and_work_never_settle_at_low_priority() {
    assert_eq!(
        suggest("tidy desk", TaskKind::School, due_in(100), NOW_MS).priority,
        Priority::Medium
    );
    assert_eq!(
        suggest("tidy desk", TaskKind::Work, due_in(100), NOW_MS).priority,
        Priority::Medium
    );
    assert_eq!(
        suggest("tidy desk", TaskKind::Club, due_in(100), NOW_MS).priority,
        Priority::Low
    );
}

#[test]
fn exam_like_titles_force_high_priority() {
    let suggestion = suggest("Final Presentation", TaskKind::Club, due_in(300), NOW_MS);
    assert_eq!(suggestion.priority, Priority::High);
}

#[test]
fn suggestions_are_deterministic() {
    let first = suggest("fix login bug", TaskKind::Work, due_in(30), NOW_MS);
    let second = suggest("fix login bug", TaskKind::Work, due_in(30), NOW_MS);
    assert_eq!(first, second);
}

#[test]
fn rationale_mentions_estimate_and_priority() {
    let suggestion = suggest("study for midterm", TaskKind::School, due_in(20), NOW_MS);
    assert!(suggestion.rationale.contains(&suggestion.estimated_mins.to_string()));
    assert!(suggestion.rationale.contains("High"));
}
