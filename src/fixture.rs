use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, FixtureId};

/// Full-time result symbol as published by football-data (FTR column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "H")]
    Home,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "A")]
    Away,
}

impl Outcome {
    pub fn from_goals(home_goals: i32, away_goals: i32) -> Self {
        if home_goals > away_goals {
            Outcome::Home
        } else if home_goals < away_goals {
            Outcome::Away
        } else {
            Outcome::Draw
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Outcome::Home => 'H',
            Outcome::Draw => 'D',
            Outcome::Away => 'A',
        }
    }

    pub fn from_symbol(raw: &str) -> Option<Self> {
        match raw.trim() {
            "H" | "h" => Some(Outcome::Home),
            "D" | "d" => Some(Outcome::Draw),
            "A" | "a" => Some(Outcome::Away),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub league: String,
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: i32,
    pub away_goals: i32,
    pub outcome: Outcome,
}

impl Fixture {
    pub fn id(&self) -> FixtureId {
        FixtureId {
            league: self.league.clone(),
            date: self.date,
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
        }
    }

    pub fn total_goals(&self) -> i64 {
        i64::from(self.home_goals) + i64::from(self.away_goals)
    }

    fn check_consistency(&self) -> Result<(u32, u32), EngineError> {
        let reject = |reason: String| EngineError::DataConsistency {
            fixture: self.id(),
            reason,
        };
        let home = u32::try_from(self.home_goals)
            .map_err(|_| reject(format!("negative home goals {}", self.home_goals)))?;
        let away = u32::try_from(self.away_goals)
            .map_err(|_| reject(format!("negative away goals {}", self.away_goals)))?;
        let implied = Outcome::from_goals(self.home_goals, self.away_goals);
        if implied != self.outcome {
            return Err(reject(format!(
                "outcome {} contradicts score {}-{}",
                self.outcome.symbol(),
                home,
                away
            )));
        }
        Ok((home, away))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultClass {
    Win,
    Draw,
    Loss,
}

impl ResultClass {
    pub fn points(self) -> u32 {
        match self {
            ResultClass::Win => 3,
            ResultClass::Draw => 1,
            ResultClass::Loss => 0,
        }
    }

    pub fn initial(self) -> char {
        match self {
            ResultClass::Win => 'W',
            ResultClass::Draw => 'D',
            ResultClass::Loss => 'L',
        }
    }
}

/// One fixture restated from a single team's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEvent {
    pub league: String,
    pub team: String,
    pub date: NaiveDate,
    pub venue: Venue,
    pub result: ResultClass,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Position of the source fixture in the input; breaks same-date ties.
    pub seq: usize,
}

impl TeamEvent {
    pub fn goal_diff(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

/// Split a fixture into its home and away events.
pub fn expand_fixture(fixture: &Fixture, seq: usize) -> Result<[TeamEvent; 2], EngineError> {
    let (home_goals, away_goals) = fixture.check_consistency()?;
    let (home_result, away_result) = match fixture.outcome {
        Outcome::Home => (ResultClass::Win, ResultClass::Loss),
        Outcome::Draw => (ResultClass::Draw, ResultClass::Draw),
        Outcome::Away => (ResultClass::Loss, ResultClass::Win),
    };
    let side = |team: &str, venue, result: ResultClass, goals_for, goals_against| TeamEvent {
        league: fixture.league.clone(),
        team: team.to_string(),
        date: fixture.date,
        venue,
        result,
        points: result.points(),
        goals_for,
        goals_against,
        seq,
    };
    Ok([
        side(
            &fixture.home_team,
            Venue::Home,
            home_result,
            home_goals,
            away_goals,
        ),
        side(
            &fixture.away_team,
            Venue::Away,
            away_result,
            away_goals,
            home_goals,
        ),
    ])
}

/// Expand every fixture, stopping at the first inconsistent one.
pub fn expand_fixtures(fixtures: &[Fixture]) -> Result<Vec<TeamEvent>, EngineError> {
    let mut out = Vec::with_capacity(fixtures.len() * 2);
    for (seq, fixture) in fixtures.iter().enumerate() {
        out.extend(expand_fixture(fixture, seq)?);
    }
    Ok(out)
}

pub fn load_fixtures_json(path: &Path) -> Result<Vec<Fixture>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read fixtures file {}", path.display()))?;
    parse_fixtures_json(&raw)
}

pub fn parse_fixtures_json(raw: &str) -> Result<Vec<Fixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Vec<Fixture>>(trimmed).context("invalid fixtures json")
}
