use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use league_analytics::config::EngineConfig;
use league_analytics::engine::{self, LeagueTables};
use league_analytics::export;
use league_analytics::fixture;
use league_analytics::quality::{self, QualityRules};
use league_analytics::store;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let db_path = parse_path_arg("--db")
        .or_else(|| std::env::var("LEAGUE_DB_PATH").ok().map(PathBuf::from))
        .or_else(store::default_db_path)
        .context("unable to resolve sqlite path")?;
    let mut conn = store::open_db(&db_path)?;

    if let Some(import) = parse_path_arg("--import") {
        let rows = fixture::load_fixtures_json(&import)?;
        let written = store::import_fixtures(&mut conn, &rows)?;
        info!(path = %import.display(), fixtures = written, "fixtures imported");
    }

    let leagues = parse_str_arg("--leagues")
        .map(|raw| parse_leagues(&raw))
        .unwrap_or_default();
    let fixtures = store::load_fixtures(&conn, &leagues)?;

    let rules = QualityRules {
        min_date: parse_date_arg("--min-date")?,
        max_date: parse_date_arg("--max-date")?,
    };
    let report = quality::run_quality_checks(&fixtures, &rules);
    if !report.passed() {
        for check in report.failed() {
            warn!(
                check = check.name,
                detail = check.detail.as_deref().unwrap_or(""),
                "quality check failed"
            );
        }
        return Err(anyhow!(
            "data quality checks failed: {:?}",
            report.failed().iter().map(|c| c.name).collect::<Vec<_>>()
        ));
    }
    info!(checks = report.checks.len(), "all quality checks passed");

    let cfg = EngineConfig::from_env();
    let started_at = Utc::now().to_rfc3339();
    let output = engine::run_all(&fixtures, &cfg);
    let run_id = store::publish_output(&mut conn, &output, &started_at)?;

    let published: Vec<&LeagueTables> = output.tables.values().collect();
    if let Some(path) = parse_path_arg("--json") {
        let json = serde_json::to_string_pretty(&published).context("serialize league tables")?;
        std::fs::write(&path, json)
            .with_context(|| format!("write tables json {}", path.display()))?;
    }
    if let Some(path) = parse_path_arg("--xlsx") {
        let exported = export::export_tables_xlsx(&path, &published)?;
        info!(
            path = %path.display(),
            standings = exported.standings,
            scorers = exported.scorers,
            form = exported.form,
            "workbook written"
        );
    }

    println!("League analytics run {run_id} complete");
    println!("DB: {}", db_path.display());
    println!("Fixtures: {}", fixtures.len());
    for tables in &published {
        let leader = tables
            .standings
            .first()
            .map(|r| format!("{} ({} pts)", r.team, r.points))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "league {} [{}]: teams={} form_rows={} leader={}",
            tables.league,
            tables.summary.league_name.as_deref().unwrap_or("-"),
            tables.standings.len(),
            tables.form.len(),
            leader
        );
    }

    if !output.is_clean() {
        for (league, err) in &output.failures {
            println!("league {league} FAILED: {err}");
        }
        return Err(anyhow!("{} league run(s) failed", output.failures.len()));
    }
    Ok(())
}

fn parse_str_arg(flag: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}

fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    parse_str_arg(flag).map(PathBuf::from)
}

fn parse_date_arg(flag: &str) -> Result<Option<NaiveDate>> {
    let Some(raw) = parse_str_arg(flag) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(Some)
        .with_context(|| format!("{flag} expects YYYY-MM-DD, got {raw:?}"))
}

fn parse_leagues(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for code in raw.split([',', ';', ' ']).map(str::trim) {
        if !code.is_empty() && !out.iter().any(|c| c == code) {
            out.push(code.to_string());
        }
    }
    out
}
