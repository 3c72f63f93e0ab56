use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::fixture::{TeamEvent, Venue};
use crate::ranking::{KeyValue, RankKey, rank_positions, rank_positions_where};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerRow {
    pub league: String,
    pub team: String,
    pub matches_played: u32,
    pub total_goals: u32,
    pub goals_per_match: f64,
    pub home_goals: u32,
    pub away_goals: u32,
    /// None when the team has not scored.
    pub home_goal_pct: Option<f64>,
    pub away_goal_pct: Option<f64>,
    pub max_goals_in_match: u32,
    pub high_scoring_matches: u32,
    pub league_rank: u32,
    /// Only set for teams with enough matches played.
    pub efficiency_rank: Option<u32>,
}

impl ScorerRow {
    fn exact_goals_per_match(&self) -> f64 {
        f64::from(self.total_goals) / f64::from(self.matches_played.max(1))
    }
}

fn by_total_goals(row: &ScorerRow) -> KeyValue<'_> {
    KeyValue::Int(i64::from(row.total_goals))
}

fn by_goals_per_match(row: &ScorerRow) -> KeyValue<'_> {
    KeyValue::Float(row.exact_goals_per_match())
}

fn by_team(row: &ScorerRow) -> KeyValue<'_> {
    KeyValue::Text(&row.team)
}

pub const LEAGUE_RANK_KEYS: [RankKey<ScorerRow>; 3] = [
    RankKey::desc(by_total_goals),
    RankKey::desc(by_goals_per_match),
    RankKey::asc(by_team),
];

pub const EFFICIENCY_RANK_KEYS: [RankKey<ScorerRow>; 2] =
    [RankKey::desc(by_goals_per_match), RankKey::asc(by_team)];

#[derive(Default)]
struct ScoringAcc {
    matches: u32,
    goals: u32,
    home_goals: u32,
    away_goals: u32,
    max_goals: u32,
    high_scoring: u32,
}

/// Attacking leaderboard, ordered by league then league rank.
pub fn compute_scorers(events: &[TeamEvent], cfg: &EngineConfig) -> Vec<ScorerRow> {
    let mut acc: BTreeMap<(&str, &str), ScoringAcc> = BTreeMap::new();
    for ev in events {
        let entry = acc
            .entry((ev.league.as_str(), ev.team.as_str()))
            .or_default();
        entry.matches = entry.matches.saturating_add(1);
        entry.goals = entry.goals.saturating_add(ev.goals_for);
        match ev.venue {
            Venue::Home => entry.home_goals = entry.home_goals.saturating_add(ev.goals_for),
            Venue::Away => entry.away_goals = entry.away_goals.saturating_add(ev.goals_for),
        }
        entry.max_goals = entry.max_goals.max(ev.goals_for);
        if ev.goals_for >= cfg.high_scoring_goals {
            entry.high_scoring = entry.high_scoring.saturating_add(1);
        }
    }

    let mut rows: Vec<ScorerRow> = acc
        .into_iter()
        .map(|((league, team), a)| ScorerRow {
            league: league.to_string(),
            team: team.to_string(),
            matches_played: a.matches,
            total_goals: a.goals,
            goals_per_match: round_to(f64::from(a.goals) / f64::from(a.matches), 2),
            home_goals: a.home_goals,
            away_goals: a.away_goals,
            home_goal_pct: share_pct(a.home_goals, a.goals),
            away_goal_pct: share_pct(a.away_goals, a.goals),
            max_goals_in_match: a.max_goals,
            high_scoring_matches: a.high_scoring,
            league_rank: 0,
            efficiency_rank: None,
        })
        .collect();

    let league_ranks = rank_positions(&rows, |r| r.league.as_str(), &LEAGUE_RANK_KEYS);
    let efficiency_ranks = rank_positions_where(
        &rows,
        |r| r.league.as_str(),
        &EFFICIENCY_RANK_KEYS,
        |r| r.matches_played >= cfg.efficiency_min_matches,
    );
    for ((row, rank), eff) in rows.iter_mut().zip(league_ranks).zip(efficiency_ranks) {
        row.league_rank = rank;
        row.efficiency_rank = eff;
    }
    rows.sort_by(|a, b| {
        a.league
            .cmp(&b.league)
            .then(a.league_rank.cmp(&b.league_rank))
    });
    rows
}

/// Percentage of `total` made up by `part`, one decimal; None when `total` is zero.
pub fn share_pct(part: u32, total: u32) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(round_to(f64::from(part) / f64::from(total) * 100.0, 1))
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
