use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::fixture::{Fixture, Outcome};
use crate::scoring::{round_to, share_pct};

static LEAGUE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("E0", "Premier League"),
        ("E1", "Championship"),
        ("D1", "Bundesliga"),
        ("SP1", "La Liga"),
        ("I1", "Serie A"),
        ("F1", "Ligue 1"),
    ])
});

/// Display name for a football-data league code.
pub fn league_name(code: &str) -> Option<&'static str> {
    LEAGUE_NAMES.get(code.trim()).copied()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSummary {
    pub league: String,
    pub league_name: Option<String>,
    pub total_matches: u32,
    pub total_goals: u32,
    pub avg_goals_per_match: Option<f64>,
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
    pub home_win_pct: Option<f64>,
    pub draw_pct: Option<f64>,
    pub away_win_pct: Option<f64>,
}

/// Headline numbers for one league. Fixtures from other leagues are ignored.
pub fn summarize_league(league: &str, fixtures: &[Fixture]) -> LeagueSummary {
    let mut total_matches = 0u32;
    let mut total_goals = 0u32;
    let (mut home_wins, mut draws, mut away_wins) = (0u32, 0u32, 0u32);
    for f in fixtures.iter().filter(|f| f.league == league) {
        total_matches = total_matches.saturating_add(1);
        total_goals = total_goals.saturating_add(u32::try_from(f.total_goals()).unwrap_or(0));
        match f.outcome {
            Outcome::Home => home_wins = home_wins.saturating_add(1),
            Outcome::Draw => draws = draws.saturating_add(1),
            Outcome::Away => away_wins = away_wins.saturating_add(1),
        }
    }

    let avg_goals_per_match = if total_matches == 0 {
        None
    } else {
        Some(round_to(
            f64::from(total_goals) / f64::from(total_matches),
            2,
        ))
    };

    LeagueSummary {
        league: league.to_string(),
        league_name: league_name(league).map(str::to_string),
        total_matches,
        total_goals,
        avg_goals_per_match,
        home_wins,
        draws,
        away_wins,
        home_win_pct: share_pct(home_wins, total_matches),
        draw_pct: share_pct(draws, total_matches),
        away_win_pct: share_pct(away_wins, total_matches),
    }
}
