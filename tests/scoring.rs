use chrono::NaiveDate;

use league_analytics::config::EngineConfig;
use league_analytics::fixture::{Fixture, Outcome, expand_fixtures};
use league_analytics::scoring::{ScorerRow, compute_scorers, share_pct};

fn fx(league: &str, day: u32, home: &str, away: &str, home_goals: i32, away_goals: i32) -> Fixture {
    Fixture {
        league: league.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 10, day).expect("valid day"),
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_goals,
        away_goals,
        outcome: Outcome::from_goals(home_goals, away_goals),
    }
}

fn scorers_for(fixtures: &[Fixture]) -> Vec<ScorerRow> {
    let events = expand_fixtures(fixtures).expect("fixtures are consistent");
    compute_scorers(&events, &EngineConfig::default())
}

fn row<'a>(rows: &'a [ScorerRow], team: &str) -> &'a ScorerRow {
    rows.iter()
        .find(|r| r.team == team)
        .expect("team should have a scorer row")
}

fn sample_league() -> Vec<Fixture> {
    vec![
        fx("S", 1, "Hot", "P1", 3, 0),
        fx("S", 2, "P2", "Hot", 1, 2),
        fx("S", 3, "Hot", "P3", 4, 1),
        fx("S", 4, "P4", "Hot", 0, 0),
        fx("S", 5, "Hot", "P5", 1, 1),
        fx("S", 6, "Cold", "Q1", 0, 1),
        fx("S", 7, "Cold", "Q2", 0, 1),
        fx("S", 8, "Cold", "Q3", 0, 1),
        fx("S", 9, "Cold", "Q4", 0, 1),
    ]
}

#[test]
fn venue_split_and_high_scoring_counts() {
    let rows = scorers_for(&sample_league());
    let hot = row(&rows, "Hot");
    assert_eq!(hot.matches_played, 5);
    assert_eq!(hot.total_goals, 10);
    assert_eq!(hot.goals_per_match, 2.0);
    assert_eq!((hot.home_goals, hot.away_goals), (8, 2));
    assert_eq!(hot.home_goal_pct, Some(80.0));
    assert_eq!(hot.away_goal_pct, Some(20.0));
    assert_eq!(hot.max_goals_in_match, 4);
    assert_eq!(hot.high_scoring_matches, 2);
    assert_eq!(hot.league_rank, 1);
}

#[test]
fn goalless_team_has_null_percentages() {
    let rows = scorers_for(&sample_league());
    let cold = row(&rows, "Cold");
    assert_eq!(cold.total_goals, 0);
    assert_eq!(cold.goals_per_match, 0.0);
    assert_eq!(cold.home_goal_pct, None);
    assert_eq!(cold.away_goal_pct, None);
}

#[test]
fn efficiency_rank_needs_five_matches() {
    let rows = scorers_for(&sample_league());
    assert_eq!(row(&rows, "Hot").efficiency_rank, Some(1));
    // Four matches is one short.
    assert_eq!(row(&rows, "Cold").efficiency_rank, None);
    assert!(
        rows.iter()
            .filter(|r| r.team != "Hot")
            .all(|r| r.efficiency_rank.is_none())
    );
}

#[test]
fn league_rank_is_dense_with_name_as_last_resort() {
    let rows = scorers_for(&sample_league());
    let order: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(
        order,
        vec!["Hot", "P2", "P3", "P5", "Q1", "Q2", "Q3", "Q4", "Cold", "P1", "P4"]
    );
    let ranks: Vec<u32> = rows.iter().map(|r| r.league_rank).collect();
    assert_eq!(ranks, (1..=11).collect::<Vec<_>>());
}

#[test]
fn goals_per_match_breaks_total_goals_tie() {
    let rows = scorers_for(&[
        fx("T", 1, "Zeta", "X1", 2, 0),
        fx("T", 2, "Zeta", "X2", 2, 0),
        fx("T", 3, "Zeta", "X3", 2, 0),
        fx("T", 4, "Alpha", "Y1", 3, 0),
        fx("T", 5, "Alpha", "Y2", 3, 0),
        fx("T", 6, "Alpha", "Y3", 0, 0),
        fx("T", 7, "Alpha", "Y4", 0, 0),
    ]);
    assert_eq!(row(&rows, "Zeta").league_rank, 1);
    assert_eq!(row(&rows, "Alpha").league_rank, 2);
    assert_eq!(row(&rows, "Alpha").goals_per_match, 1.5);
}

#[test]
fn efficiency_threshold_is_configurable() {
    let events = expand_fixtures(&sample_league()).expect("fixtures are consistent");
    let cfg = EngineConfig {
        efficiency_min_matches: 4,
        ..EngineConfig::default()
    };
    let rows = compute_scorers(&events, &cfg);
    assert_eq!(row(&rows, "Hot").efficiency_rank, Some(1));
    assert_eq!(row(&rows, "Cold").efficiency_rank, Some(2));
}

#[test]
fn ranks_restart_per_league() {
    let mut fixtures = sample_league();
    fixtures.push(fx("R", 1, "Solo", "Other", 1, 0));
    let rows = scorers_for(&fixtures);
    assert_eq!(row(&rows, "Solo").league_rank, 1);
    assert_eq!(row(&rows, "Other").league_rank, 2);
    assert_eq!(row(&rows, "Hot").league_rank, 1);
}

#[test]
fn share_pct_guards_zero_total() {
    assert_eq!(share_pct(0, 0), None);
    assert_eq!(share_pct(1, 3), Some(33.3));
}
