use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::fixture::Fixture;

#[derive(Debug, Clone, Default)]
pub struct QualityRules {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityCheck {
    pub name: &'static str,
    pub passed: bool,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct QualityReport {
    pub checks: Vec<QualityCheck>,
}

impl QualityReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failed(&self) -> Vec<&QualityCheck> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }
}

/// Preconditions the ingestion side promises before the engine runs.
pub fn run_quality_checks(fixtures: &[Fixture], rules: &QualityRules) -> QualityReport {
    let mut checks = Vec::new();

    checks.push(check(
        "row_count",
        !fixtures.is_empty(),
        || "no fixtures loaded".to_string(),
    ));

    let empty_teams = fixtures
        .iter()
        .filter(|f| f.home_team.trim().is_empty() || f.away_team.trim().is_empty())
        .count();
    checks.push(check("no_empty_teams", empty_teams == 0, || {
        format!("{empty_teams} fixtures with a blank team name")
    }));

    let self_matches: Vec<String> = fixtures
        .iter()
        .filter(|f| !f.home_team.trim().is_empty() && f.home_team == f.away_team)
        .map(|f| f.id().to_string())
        .collect();
    checks.push(check("distinct_teams", self_matches.is_empty(), || {
        format!("team plays itself: {}", preview(&self_matches))
    }));

    let mut seen = HashSet::new();
    let duplicates: Vec<String> = fixtures
        .iter()
        .filter(|f| !seen.insert(f.id()))
        .map(|f| f.id().to_string())
        .collect();
    checks.push(check("unique_identity", duplicates.is_empty(), || {
        format!("duplicate fixtures: {}", preview(&duplicates))
    }));

    let out_of_range: Vec<String> = fixtures
        .iter()
        .filter(|f| {
            rules.min_date.is_some_and(|min| f.date < min)
                || rules.max_date.is_some_and(|max| f.date > max)
        })
        .map(|f| f.id().to_string())
        .collect();
    checks.push(check("date_range", out_of_range.is_empty(), || {
        format!("fixtures outside date range: {}", preview(&out_of_range))
    }));

    QualityReport { checks }
}

fn check(name: &'static str, passed: bool, detail: impl FnOnce() -> String) -> QualityCheck {
    QualityCheck {
        name,
        passed,
        detail: if passed { None } else { Some(detail()) },
    }
}

fn preview(items: &[String]) -> String {
    let mut out = items.iter().take(3).cloned().collect::<Vec<_>>().join("; ");
    if items.len() > 3 {
        out.push_str(&format!(" (+{} more)", items.len() - 3));
    }
    out
}
