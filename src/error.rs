use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

/// Identity of a fixture, used to point at the offending row when a league run fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureId {
    pub league: String,
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} vs {}",
            self.league, self.date, self.home_team, self.away_team
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("inconsistent fixture ({fixture}): {reason}")]
    DataConsistency { fixture: FixtureId, reason: String },

    #[error("form window must hold at least one match (got {window})")]
    InvalidWindow { window: usize },
}
