use chrono::NaiveDate;

use league_analytics::fixture::{Fixture, Outcome};
use league_analytics::quality::{QualityRules, run_quality_checks};

fn fx(day: u32, home: &str, away: &str) -> Fixture {
    Fixture {
        league: "E0".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 8, day).expect("valid day"),
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_goals: 1,
        away_goals: 0,
        outcome: Outcome::Home,
    }
}

fn failed_names(fixtures: &[Fixture], rules: &QualityRules) -> Vec<&'static str> {
    run_quality_checks(fixtures, rules)
        .failed()
        .iter()
        .map(|c| c.name)
        .collect()
}

#[test]
fn clean_batch_passes_every_check() {
    let report = run_quality_checks(&[fx(1, "A", "B"), fx(2, "B", "A")], &QualityRules::default());
    assert!(report.passed());
    assert_eq!(report.checks.len(), 5);
}

#[test]
fn empty_batch_fails_row_count() {
    assert_eq!(failed_names(&[], &QualityRules::default()), vec!["row_count"]);
}

#[test]
fn blank_and_self_matches_are_flagged() {
    let names = failed_names(&[fx(1, " ", "B"), fx(2, "C", "C")], &QualityRules::default());
    assert_eq!(names, vec!["no_empty_teams", "distinct_teams"]);
}

#[test]
fn duplicate_identity_is_flagged() {
    let report = run_quality_checks(&[fx(1, "A", "B"), fx(1, "A", "B")], &QualityRules::default());
    let failed = report.failed();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].name, "unique_identity");
    assert!(failed[0].detail.as_deref().unwrap_or("").contains("A vs B"));
}

#[test]
fn dates_outside_the_window_are_flagged() {
    let rules = QualityRules {
        min_date: NaiveDate::from_ymd_opt(2025, 8, 2),
        max_date: NaiveDate::from_ymd_opt(2025, 8, 3),
    };
    let names = failed_names(&[fx(1, "A", "B"), fx(2, "B", "A"), fx(4, "A", "C")], &rules);
    assert_eq!(names, vec!["date_range"]);
}
