use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::engine::LeagueTables;

pub struct ExportReport {
    pub leagues: usize,
    pub standings: usize,
    pub scorers: usize,
    pub form: usize,
}

/// Write Standings, Scorers, Form and Summary sheets covering every league given.
pub fn export_tables_xlsx(path: &Path, leagues: &[&LeagueTables]) -> Result<ExportReport> {
    let mut standings_rows = vec![header(&[
        "League", "Pos", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts",
    ])];
    let mut scorer_rows = vec![header(&[
        "League",
        "Rank",
        "Team",
        "P",
        "Goals",
        "Goals/Match",
        "Home Goals",
        "Away Goals",
        "Home %",
        "Away %",
        "Max In Match",
        "3+ Goal Matches",
        "Efficiency Rank",
    ])];
    let mut form_rows = vec![header(&[
        "League",
        "Rank",
        "Team",
        "Form",
        "Pts",
        "GF",
        "GA",
        "GD",
        "Form %",
        "Last Match",
    ])];
    let mut summary_rows = vec![header(&[
        "League",
        "Name",
        "Matches",
        "Goals",
        "Avg Goals",
        "Home Wins",
        "Draws",
        "Away Wins",
        "Home Win %",
        "Draw %",
        "Away Win %",
    ])];

    for tables in leagues {
        for r in &tables.standings {
            standings_rows.push(vec![
                r.league.clone(),
                r.league_position.to_string(),
                r.team.clone(),
                r.matches_played.to_string(),
                r.wins.to_string(),
                r.draws.to_string(),
                r.losses.to_string(),
                r.goals_for.to_string(),
                r.goals_against.to_string(),
                r.goal_difference.to_string(),
                r.points.to_string(),
            ]);
        }
        for r in &tables.scorers {
            scorer_rows.push(vec![
                r.league.clone(),
                r.league_rank.to_string(),
                r.team.clone(),
                r.matches_played.to_string(),
                r.total_goals.to_string(),
                format!("{:.2}", r.goals_per_match),
                r.home_goals.to_string(),
                r.away_goals.to_string(),
                opt_pct(r.home_goal_pct),
                opt_pct(r.away_goal_pct),
                r.max_goals_in_match.to_string(),
                r.high_scoring_matches.to_string(),
                r.efficiency_rank.map(|v| v.to_string()).unwrap_or_default(),
            ]);
        }
        for r in &tables.form {
            form_rows.push(vec![
                r.league.clone(),
                r.form_rank.to_string(),
                r.team.clone(),
                r.form_last_5.clone(),
                r.points_last_5.to_string(),
                r.goals_for_last_5.to_string(),
                r.goals_against_last_5.to_string(),
                r.goal_diff_last_5.to_string(),
                format!("{:.1}", r.form_percentage),
                r.last_match_date.to_string(),
            ]);
        }
        let s = &tables.summary;
        summary_rows.push(vec![
            s.league.clone(),
            s.league_name.clone().unwrap_or_default(),
            s.total_matches.to_string(),
            s.total_goals.to_string(),
            s.avg_goals_per_match
                .map(|v| format!("{v:.2}"))
                .unwrap_or_default(),
            s.home_wins.to_string(),
            s.draws.to_string(),
            s.away_wins.to_string(),
            opt_pct(s.home_win_pct),
            opt_pct(s.draw_pct),
            opt_pct(s.away_win_pct),
        ]);
    }

    let mut workbook = Workbook::new();
    for (name, rows) in [
        ("Standings", &standings_rows),
        ("Scorers", &scorer_rows),
        ("Form", &form_rows),
        ("Summary", &summary_rows),
    ] {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        write_rows(sheet, rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        leagues: leagues.len(),
        standings: standings_rows.len().saturating_sub(1),
        scorers: scorer_rows.len().saturating_sub(1),
        form: form_rows.len().saturating_sub(1),
    })
}

fn header(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

fn opt_pct(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.1}")).unwrap_or_default()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
