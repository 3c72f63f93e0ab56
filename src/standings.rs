use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fixture::{ResultClass, TeamEvent};
use crate::ranking::{KeyValue, RankKey, rank_positions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub league: String,
    pub team: String,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub league_position: u32,
}

fn by_points(row: &StandingsRow) -> KeyValue<'_> {
    KeyValue::Int(i64::from(row.points))
}

fn by_goal_difference(row: &StandingsRow) -> KeyValue<'_> {
    KeyValue::Int(row.goal_difference)
}

fn by_goals_for(row: &StandingsRow) -> KeyValue<'_> {
    KeyValue::Int(i64::from(row.goals_for))
}

fn by_team(row: &StandingsRow) -> KeyValue<'_> {
    KeyValue::Text(&row.team)
}

/// Points, then goal difference, then goals scored; team name settles full ties.
pub const STANDINGS_KEYS: [RankKey<StandingsRow>; 4] = [
    RankKey::desc(by_points),
    RankKey::desc(by_goal_difference),
    RankKey::desc(by_goals_for),
    RankKey::asc(by_team),
];

/// Season-to-date table, one row per team that has played, ordered by league then position.
pub fn compute_standings(events: &[TeamEvent]) -> Vec<StandingsRow> {
    let mut acc: BTreeMap<(&str, &str), StandingsRow> = BTreeMap::new();
    for ev in events {
        let row = acc
            .entry((ev.league.as_str(), ev.team.as_str()))
            .or_insert_with(|| StandingsRow {
                league: ev.league.clone(),
                team: ev.team.clone(),
                matches_played: 0,
                wins: 0,
                draws: 0,
                losses: 0,
                points: 0,
                goals_for: 0,
                goals_against: 0,
                goal_difference: 0,
                league_position: 0,
            });
        row.matches_played = row.matches_played.saturating_add(1);
        match ev.result {
            ResultClass::Win => row.wins = row.wins.saturating_add(1),
            ResultClass::Draw => row.draws = row.draws.saturating_add(1),
            ResultClass::Loss => row.losses = row.losses.saturating_add(1),
        }
        row.points = row.points.saturating_add(ev.points);
        row.goals_for = row.goals_for.saturating_add(ev.goals_for);
        row.goals_against = row.goals_against.saturating_add(ev.goals_against);
    }

    let mut rows: Vec<StandingsRow> = acc
        .into_values()
        .map(|mut row| {
            row.goal_difference = i64::from(row.goals_for) - i64::from(row.goals_against);
            row
        })
        .collect();

    let positions = rank_positions(&rows, |r| r.league.as_str(), &STANDINGS_KEYS);
    for (row, pos) in rows.iter_mut().zip(positions) {
        row.league_position = pos;
    }
    rows.sort_by(|a, b| {
        a.league
            .cmp(&b.league)
            .then(a.league_position.cmp(&b.league_position))
    });
    rows
}
