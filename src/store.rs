use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, Transaction, params};
use tracing::{info, warn};

use crate::engine::{EngineOutput, LeagueTables};
use crate::fixture::{Fixture, Outcome};

const DATA_DIR: &str = "league_analytics";
const DB_FILE: &str = "league_analytics.sqlite";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn default_db_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_DATA_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(DATA_DIR).join(DB_FILE));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(DATA_DIR)
            .join(DB_FILE),
    )
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS fixtures (
            fixture_seq INTEGER PRIMARY KEY AUTOINCREMENT,
            league TEXT NOT NULL,
            match_date TEXT NOT NULL,
            home_team TEXT NOT NULL,
            away_team TEXT NOT NULL,
            home_goals INTEGER NOT NULL,
            away_goals INTEGER NOT NULL,
            outcome TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_fixtures_league ON fixtures(league);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_fixtures_identity
            ON fixtures(league, match_date, home_team, away_team);

        CREATE TABLE IF NOT EXISTS standings (
            league TEXT NOT NULL,
            team TEXT NOT NULL,
            matches_played INTEGER NOT NULL,
            wins INTEGER NOT NULL,
            draws INTEGER NOT NULL,
            losses INTEGER NOT NULL,
            points INTEGER NOT NULL,
            goals_for INTEGER NOT NULL,
            goals_against INTEGER NOT NULL,
            goal_difference INTEGER NOT NULL,
            league_position INTEGER NOT NULL,
            PRIMARY KEY (league, team)
        );

        CREATE TABLE IF NOT EXISTS scorers (
            league TEXT NOT NULL,
            team TEXT NOT NULL,
            matches_played INTEGER NOT NULL,
            total_goals INTEGER NOT NULL,
            goals_per_match REAL NOT NULL,
            home_goals INTEGER NOT NULL,
            away_goals INTEGER NOT NULL,
            home_goal_pct REAL NULL,
            away_goal_pct REAL NULL,
            max_goals_in_match INTEGER NOT NULL,
            high_scoring_matches INTEGER NOT NULL,
            league_rank INTEGER NOT NULL,
            efficiency_rank INTEGER NULL,
            PRIMARY KEY (league, team)
        );

        CREATE TABLE IF NOT EXISTS form (
            league TEXT NOT NULL,
            team TEXT NOT NULL,
            form_last_5 TEXT NOT NULL,
            points_last_5 INTEGER NOT NULL,
            goals_for_last_5 INTEGER NOT NULL,
            goals_against_last_5 INTEGER NOT NULL,
            goal_diff_last_5 INTEGER NOT NULL,
            form_percentage REAL NOT NULL,
            last_match_date TEXT NOT NULL,
            form_rank INTEGER NOT NULL,
            PRIMARY KEY (league, team)
        );

        CREATE TABLE IF NOT EXISTS league_summary (
            league TEXT PRIMARY KEY,
            league_name TEXT NULL,
            total_matches INTEGER NOT NULL,
            total_goals INTEGER NOT NULL,
            avg_goals_per_match REAL NULL,
            home_wins INTEGER NOT NULL,
            draws INTEGER NOT NULL,
            away_wins INTEGER NOT NULL,
            home_win_pct REAL NULL,
            draw_pct REAL NULL,
            away_win_pct REAL NULL
        );

        CREATE TABLE IF NOT EXISTS engine_runs (
            run_id INTEGER PRIMARY KEY AUTOINCREMENT,
            started_at TEXT NOT NULL,
            finished_at TEXT NOT NULL,
            leagues_ok INTEGER NOT NULL,
            leagues_failed INTEGER NOT NULL,
            errors_json TEXT NOT NULL
        );
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

/// Upsert fixtures in the given order; returns how many rows were upserted.
///
/// A fixture already stored under the same (league, date, home, away) identity
/// takes the new score but keeps its original source position.
pub fn import_fixtures(conn: &mut Connection, fixtures: &[Fixture]) -> Result<usize> {
    let tx = conn.transaction().context("begin import transaction")?;
    for f in fixtures {
        tx.execute(
            r#"
            INSERT INTO fixtures (league, match_date, home_team, away_team, home_goals, away_goals, outcome)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(league, match_date, home_team, away_team) DO UPDATE SET
                home_goals = excluded.home_goals,
                away_goals = excluded.away_goals,
                outcome = excluded.outcome
            "#,
            params![
                f.league,
                f.date.format(DATE_FORMAT).to_string(),
                f.home_team,
                f.away_team,
                f.home_goals as i64,
                f.away_goals as i64,
                f.outcome.symbol().to_string(),
            ],
        )
        .with_context(|| format!("upsert fixture {}", f.id()))?;
    }
    tx.commit().context("commit import transaction")?;
    Ok(fixtures.len())
}

/// Fixtures in source (insertion) order, optionally restricted to some leagues.
pub fn load_fixtures(conn: &Connection, leagues: &[String]) -> Result<Vec<Fixture>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT league, match_date, home_team, away_team, home_goals, away_goals, outcome
            FROM fixtures
            ORDER BY fixture_seq ASC
            "#,
        )
        .context("prepare load fixtures query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, String>(6)?,
            ))
        })
        .context("query load fixtures")?;

    let mut out = Vec::new();
    for row in rows {
        let (league, date, home_team, away_team, home_goals, away_goals, outcome) =
            row.context("decode fixture row")?;
        if !leagues.is_empty() && !leagues.contains(&league) {
            continue;
        }
        let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .with_context(|| format!("bad match_date {date:?}"))?;
        let outcome = Outcome::from_symbol(&outcome)
            .ok_or_else(|| anyhow!("bad outcome symbol {outcome:?}"))?;
        out.push(Fixture {
            league,
            date,
            home_team,
            away_team,
            home_goals: i32::try_from(home_goals).context("home_goals out of range")?,
            away_goals: i32::try_from(away_goals).context("away_goals out of range")?,
            outcome,
        });
    }
    Ok(out)
}

/// Swap a league's previous tables for `tables` in one transaction.
pub fn replace_league_tables(conn: &mut Connection, tables: &LeagueTables) -> Result<()> {
    let tx = conn.transaction().context("begin publish transaction")?;
    for table in ["standings", "scorers", "form", "league_summary"] {
        tx.execute(
            &format!("DELETE FROM {table} WHERE league = ?1"),
            params![tables.league],
        )
        .with_context(|| format!("clear {table} for {}", tables.league))?;
    }
    write_standings(&tx, tables)?;
    write_scorers(&tx, tables)?;
    write_form(&tx, tables)?;
    write_summary(&tx, tables)?;
    tx.commit().context("commit publish transaction")?;
    info!(league = %tables.league, "league tables published");
    Ok(())
}

/// Publish every successful league and record the run.
///
/// Leagues are published independently; a league whose tables fail to write
/// is recorded in the run's errors and reported after the run row is stored.
pub fn publish_output(
    conn: &mut Connection,
    output: &EngineOutput,
    started_at: &str,
) -> Result<i64> {
    let mut errors: Vec<String> = output
        .failures
        .iter()
        .map(|(league, err)| format!("{league}: {err}"))
        .collect();
    let mut published = 0usize;
    let mut publish_failures = 0usize;
    for tables in output.tables.values() {
        match replace_league_tables(conn, tables) {
            Ok(()) => published += 1,
            Err(err) => {
                warn!(league = %tables.league, error = %format!("{err:#}"), "publish failed");
                errors.push(format!("{}: publish failed: {err:#}", tables.league));
                publish_failures += 1;
            }
        }
    }

    let errors_json = serde_json::to_string(&errors).unwrap_or_else(|_| "[]".to_string());
    conn.execute(
        "INSERT INTO engine_runs (started_at, finished_at, leagues_ok, leagues_failed, errors_json)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            started_at,
            Utc::now().to_rfc3339(),
            published as i64,
            (output.failures.len() + publish_failures) as i64,
            errors_json,
        ],
    )
    .context("insert engine run")?;
    let run_id = conn.last_insert_rowid();

    if publish_failures > 0 {
        return Err(anyhow!(
            "run {run_id}: {publish_failures} league(s) failed to publish"
        ));
    }
    Ok(run_id)
}

fn write_standings(tx: &Transaction<'_>, tables: &LeagueTables) -> Result<()> {
    for r in &tables.standings {
        tx.execute(
            r#"
            INSERT INTO standings (
                league, team, matches_played, wins, draws, losses, points,
                goals_for, goals_against, goal_difference, league_position
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                r.league,
                r.team,
                r.matches_played as i64,
                r.wins as i64,
                r.draws as i64,
                r.losses as i64,
                r.points as i64,
                r.goals_for as i64,
                r.goals_against as i64,
                r.goal_difference,
                r.league_position as i64,
            ],
        )
        .context("insert standings row")?;
    }
    Ok(())
}

fn write_scorers(tx: &Transaction<'_>, tables: &LeagueTables) -> Result<()> {
    for r in &tables.scorers {
        tx.execute(
            r#"
            INSERT INTO scorers (
                league, team, matches_played, total_goals, goals_per_match,
                home_goals, away_goals, home_goal_pct, away_goal_pct,
                max_goals_in_match, high_scoring_matches, league_rank, efficiency_rank
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                r.league,
                r.team,
                r.matches_played as i64,
                r.total_goals as i64,
                r.goals_per_match,
                r.home_goals as i64,
                r.away_goals as i64,
                r.home_goal_pct,
                r.away_goal_pct,
                r.max_goals_in_match as i64,
                r.high_scoring_matches as i64,
                r.league_rank as i64,
                r.efficiency_rank.map(i64::from),
            ],
        )
        .context("insert scorers row")?;
    }
    Ok(())
}

fn write_form(tx: &Transaction<'_>, tables: &LeagueTables) -> Result<()> {
    for r in &tables.form {
        tx.execute(
            r#"
            INSERT INTO form (
                league, team, form_last_5, points_last_5, goals_for_last_5,
                goals_against_last_5, goal_diff_last_5, form_percentage,
                last_match_date, form_rank
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                r.league,
                r.team,
                r.form_last_5,
                r.points_last_5 as i64,
                r.goals_for_last_5 as i64,
                r.goals_against_last_5 as i64,
                r.goal_diff_last_5,
                r.form_percentage,
                r.last_match_date.format(DATE_FORMAT).to_string(),
                r.form_rank as i64,
            ],
        )
        .context("insert form row")?;
    }
    Ok(())
}

fn write_summary(tx: &Transaction<'_>, tables: &LeagueTables) -> Result<()> {
    let s = &tables.summary;
    tx.execute(
        r#"
        INSERT INTO league_summary (
            league, league_name, total_matches, total_goals, avg_goals_per_match,
            home_wins, draws, away_wins, home_win_pct, draw_pct, away_win_pct
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
        params![
            s.league,
            s.league_name,
            s.total_matches as i64,
            s.total_goals as i64,
            s.avg_goals_per_match,
            s.home_wins as i64,
            s.draws as i64,
            s.away_wins as i64,
            s.home_win_pct,
            s.draw_pct,
            s.away_win_pct,
        ],
    )
    .context("insert league summary")?;
    Ok(())
}
