use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::fixture::TeamEvent;
use crate::ranking::{KeyValue, RankKey, rank_positions};
use crate::scoring::round_to;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRow {
    pub league: String,
    pub team: String,
    /// Result initials, most recent first.
    pub form_last_5: String,
    pub points_last_5: u32,
    pub goals_for_last_5: u32,
    pub goals_against_last_5: u32,
    pub goal_diff_last_5: i64,
    pub form_percentage: f64,
    pub last_match_date: NaiveDate,
    pub form_rank: u32,
}

fn by_points(row: &FormRow) -> KeyValue<'_> {
    KeyValue::Int(i64::from(row.points_last_5))
}

fn by_goal_diff(row: &FormRow) -> KeyValue<'_> {
    KeyValue::Int(row.goal_diff_last_5)
}

fn by_team(row: &FormRow) -> KeyValue<'_> {
    KeyValue::Text(&row.team)
}

pub const FORM_RANK_KEYS: [RankKey<FormRow>; 3] = [
    RankKey::desc(by_points),
    RankKey::desc(by_goal_diff),
    RankKey::asc(by_team),
];

/// Most recent first. Same-day events keep source order, so the earlier-ingested
/// fixture counts as the more recent one.
pub fn recency_order(a: &TeamEvent, b: &TeamEvent) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then(a.seq.cmp(&b.seq))
}

/// Trailing-window table. Teams with fewer than `cfg.form_window` matches are left out.
/// Callers are expected to have validated `cfg` (see [`EngineConfig::validate`]).
pub fn compute_form(events: &[TeamEvent], cfg: &EngineConfig) -> Vec<FormRow> {
    let mut per_team: BTreeMap<(&str, &str), Vec<&TeamEvent>> = BTreeMap::new();
    for ev in events {
        per_team
            .entry((ev.league.as_str(), ev.team.as_str()))
            .or_default()
            .push(ev);
    }

    let window = cfg.form_window.max(1);
    let max_points = f64::from(cfg.form_max_points().max(1));
    let mut rows = Vec::new();
    for ((league, team), mut history) in per_team {
        if history.len() < window {
            continue;
        }
        history.sort_by(|a, b| recency_order(a, b));
        let recent = &history[..window];

        let form: String = recent.iter().map(|ev| ev.result.initial()).collect();
        let points: u32 = recent.iter().map(|ev| ev.points).sum();
        let goals_for: u32 = recent.iter().map(|ev| ev.goals_for).sum();
        let goals_against: u32 = recent.iter().map(|ev| ev.goals_against).sum();
        rows.push(FormRow {
            league: league.to_string(),
            team: team.to_string(),
            form_last_5: form,
            points_last_5: points,
            goals_for_last_5: goals_for,
            goals_against_last_5: goals_against,
            goal_diff_last_5: i64::from(goals_for) - i64::from(goals_against),
            form_percentage: round_to(f64::from(points) / max_points * 100.0, 1),
            last_match_date: recent[0].date,
            form_rank: 0,
        });
    }

    let ranks = rank_positions(&rows, |r| r.league.as_str(), &FORM_RANK_KEYS);
    for (row, rank) in rows.iter_mut().zip(ranks) {
        row.form_rank = rank;
    }
    rows.sort_by(|a, b| a.league.cmp(&b.league).then(a.form_rank.cmp(&b.form_rank)));
    rows
}
