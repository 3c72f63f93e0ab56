use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const DEFAULT_FORM_WINDOW: usize = 5;
pub const DEFAULT_EFFICIENCY_MIN_MATCHES: u32 = 5;
pub const DEFAULT_HIGH_SCORING_GOALS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of most recent matches in the form window.
    pub form_window: usize,
    /// Minimum matches played before a team gets an efficiency rank.
    pub efficiency_min_matches: u32,
    /// A team's goals in one match at or above this count as a high-scoring match.
    pub high_scoring_goals: u32,
    /// Run leagues (and the three consumers inside a league) on the rayon pool.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            form_window: DEFAULT_FORM_WINDOW,
            efficiency_min_matches: DEFAULT_EFFICIENCY_MIN_MATCHES,
            high_scoring_goals: DEFAULT_HIGH_SCORING_GOALS,
            parallel: true,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            form_window: env_parse("FORM_WINDOW").unwrap_or(defaults.form_window),
            efficiency_min_matches: env_parse("EFFICIENCY_MIN_MATCHES")
                .unwrap_or(defaults.efficiency_min_matches),
            high_scoring_goals: env_parse("HIGH_SCORING_GOALS")
                .unwrap_or(defaults.high_scoring_goals),
            parallel: std::env::var("ENGINE_PARALLEL")
                .ok()
                .and_then(|val| parse_flag(&val))
                .unwrap_or(defaults.parallel),
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.form_window == 0 {
            return Err(EngineError::InvalidWindow {
                window: self.form_window,
            });
        }
        Ok(())
    }

    /// Maximum points obtainable inside the form window.
    pub fn form_max_points(&self) -> u32 {
        u32::try_from(self.form_window.saturating_mul(3)).unwrap_or(u32::MAX)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<T>().ok())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
