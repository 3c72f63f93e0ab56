use std::path::PathBuf;

use chrono::NaiveDate;

use league_analytics::config::EngineConfig;
use league_analytics::engine::{LeagueTables, run_all};
use league_analytics::export::export_tables_xlsx;
use league_analytics::fixture::{Fixture, Outcome};

fn fx(league: &str, day: u32, home: &str, away: &str, hg: i32, ag: i32) -> Fixture {
    Fixture {
        league: league.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 11, day).expect("valid day"),
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_goals: hg,
        away_goals: ag,
        outcome: Outcome::from_goals(hg, ag),
    }
}

fn temp_workbook(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("league_analytics_export_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    dir.join(name)
}

#[test]
fn workbook_covers_every_league_row() {
    let mut fixtures = Vec::new();
    // E0: three teams, six matches, so everyone reaches a four-match form window.
    for (day, (home, away)) in [("A", "B"), ("B", "C"), ("C", "A"), ("B", "A"), ("C", "B"), ("A", "C")]
        .into_iter()
        .enumerate()
    {
        fixtures.push(fx("E0", day as u32 + 1, home, away, 2, 1));
    }
    // D1: one scoreless draw, leaving percentages and efficiency ranks blank.
    fixtures.push(fx("D1", 1, "X", "Y", 0, 0));

    let cfg = EngineConfig {
        form_window: 4,
        ..EngineConfig::default()
    };
    let out = run_all(&fixtures, &cfg);
    assert!(out.is_clean());
    let leagues: Vec<&LeagueTables> = out.tables.values().collect();

    let path = temp_workbook("tables.xlsx");
    let _ = std::fs::remove_file(&path);
    let report = export_tables_xlsx(&path, &leagues).expect("export workbook");

    assert_eq!(report.leagues, 2);
    assert_eq!(report.standings, 5);
    assert_eq!(report.scorers, 5);
    assert_eq!(report.form, 3);

    let bytes = std::fs::read(&path).expect("workbook written");
    assert!(bytes.starts_with(b"PK"));
    std::fs::remove_file(&path).ok();
}

#[test]
fn empty_export_still_writes_headers() {
    let path = temp_workbook("empty.xlsx");
    let report = export_tables_xlsx(&path, &[]).expect("export workbook");
    assert_eq!(
        (report.leagues, report.standings, report.scorers, report.form),
        (0, 0, 0, 0)
    );
    assert!(path.exists());
    std::fs::remove_file(&path).ok();
}
