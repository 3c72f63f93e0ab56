use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::fixture::{Fixture, TeamEvent, expand_fixture};
use crate::form::{FormRow, compute_form};
use crate::scoring::{ScorerRow, compute_scorers};
use crate::standings::{StandingsRow, compute_standings};
use crate::summary::{LeagueSummary, summarize_league};

/// Everything published for one league by one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueTables {
    pub league: String,
    pub summary: LeagueSummary,
    pub standings: Vec<StandingsRow>,
    pub scorers: Vec<ScorerRow>,
    pub form: Vec<FormRow>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub tables: BTreeMap<String, LeagueTables>,
    pub failures: BTreeMap<String, EngineError>,
}

impl EngineOutput {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compute all tables for `league`. Fixtures belonging to other leagues are skipped;
/// their position in `fixtures` still counts as source order.
pub fn run_league(
    league: &str,
    fixtures: &[Fixture],
    cfg: &EngineConfig,
) -> Result<LeagueTables, EngineError> {
    cfg.validate()?;
    let events = expand_league(league, fixtures)?;
    debug!(league, events = events.len(), "expanded fixtures");

    let (standings, (scorers, form)) = if cfg.parallel {
        rayon::join(
            || compute_standings(&events),
            || {
                rayon::join(
                    || compute_scorers(&events, cfg),
                    || compute_form(&events, cfg),
                )
            },
        )
    } else {
        (
            compute_standings(&events),
            (compute_scorers(&events, cfg), compute_form(&events, cfg)),
        )
    };

    info!(
        league,
        standings = standings.len(),
        scorers = scorers.len(),
        form = form.len(),
        "league tables computed"
    );

    Ok(LeagueTables {
        league: league.to_string(),
        summary: summarize_league(league, fixtures),
        standings,
        scorers,
        form,
    })
}

/// Run every league present in `fixtures`. A league that fails publishes nothing;
/// the others are unaffected.
pub fn run_all(fixtures: &[Fixture], cfg: &EngineConfig) -> EngineOutput {
    let leagues: Vec<&str> = fixtures
        .iter()
        .map(|f| f.league.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let results: Vec<(&str, Result<LeagueTables, EngineError>)> = if cfg.parallel {
        leagues
            .par_iter()
            .map(|league| (*league, run_league(league, fixtures, cfg)))
            .collect()
    } else {
        leagues
            .iter()
            .map(|league| (*league, run_league(league, fixtures, cfg)))
            .collect()
    };

    let mut out = EngineOutput::default();
    for (league, result) in results {
        match result {
            Ok(tables) => {
                out.tables.insert(league.to_string(), tables);
            }
            Err(err) => {
                warn!(league, error = %err, "league run failed");
                out.failures.insert(league.to_string(), err);
            }
        }
    }
    out
}

fn expand_league(league: &str, fixtures: &[Fixture]) -> Result<Vec<TeamEvent>, EngineError> {
    let mut events = Vec::new();
    for (seq, fixture) in fixtures
        .iter()
        .enumerate()
        .filter(|(_, f)| f.league == league)
    {
        events.extend(expand_fixture(fixture, seq)?);
    }
    Ok(events)
}
