//! View rendering
//!
//! Pure functions from state to text. Nothing here mutates state.

use crate::contest::{preview_points, Activity, Roster, Standings, Team};
use crate::import::{export_entries, ImportError};
use serde::Serialize;
use thiserror::Error;

/// Output format for rendered views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Errors while rendering a view
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export error: {0}")]
    Export(#[from] ImportError),

    #[error("Invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type RenderResult = Result<String, RenderError>;

#[derive(Serialize)]
struct BoardView<'a> {
    teams: &'a [crate::contest::TeamStanding],
    top: &'a [crate::contest::ParticipantStanding],
}

/// One CSV row of the dashboard; `kind` is "team" or "participant"
#[derive(Serialize)]
struct BoardRow {
    kind: &'static str,
    rank: usize,
    name: String,
    team: Team,
    points: u64,
    members: Option<usize>,
    average: Option<f64>,
}

/// Render team ranking and top-N individual ranking
pub fn render_board(standings: &Standings, top_n: usize, format: OutputFormat) -> RenderResult {
    let top = standings.top(top_n);

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&BoardView {
            teams: &standings.teams,
            top,
        })?),
        OutputFormat::Csv => {
            let team_rows = standings.teams.iter().enumerate().map(|(i, t)| BoardRow {
                kind: "team",
                rank: i + 1,
                name: t.team.to_string(),
                team: t.team,
                points: t.total_points,
                members: Some(t.participants),
                average: Some(t.average_points),
            });
            let participant_rows = top.iter().enumerate().map(|(i, p)| BoardRow {
                kind: "participant",
                rank: i + 1,
                name: p.name.clone(),
                team: p.team,
                points: p.total_points,
                members: None,
                average: None,
            });
            write_csv(team_rows.chain(participant_rows))
        }
        OutputFormat::Table => {
            let mut out = String::new();
            out.push_str("Team ranking\n");
            out.push_str(&format!(
                "{:<4} {:<10} {:>8} {:>8} {:>9}\n",
                "#", "Team", "Points", "Members", "Average"
            ));
            out.push_str(&format!("{}\n", "-".repeat(43)));
            for (i, t) in standings.teams.iter().enumerate() {
                out.push_str(&format!(
                    "{:<4} {:<10} {:>8} {:>8} {:>9.2}\n",
                    i + 1,
                    t.team.to_string(),
                    t.total_points,
                    t.participants,
                    t.average_points
                ));
            }

            out.push('\n');
            out.push_str(&format!("Top {} individual\n", top_n));
            if top.is_empty() {
                out.push_str("No participants\n");
                return Ok(out);
            }
            out.push_str(&format!(
                "{:<4} {:<24} {:<8} {:>8}\n",
                "#", "Name", "Team", "Points"
            ));
            out.push_str(&format!("{}\n", "-".repeat(47)));
            for (i, p) in top.iter().enumerate() {
                out.push_str(&format!(
                    "{:<4} {:<24} {:<8} {:>8}\n",
                    i + 1,
                    p.name,
                    p.team.to_string(),
                    p.total_points
                ));
            }
            Ok(out)
        }
    }
}

/// Render the activity catalog
pub fn render_activities(roster: &Roster, format: OutputFormat) -> RenderResult {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&roster.activities)?),
        OutputFormat::Csv => write_csv(roster.activities.iter()),
        OutputFormat::Table => {
            let mut out = format!(
                "{:<4} {:<32} {:>6}  {}\n",
                "ID", "Activity", "Points", "Evidence"
            );
            out.push_str(&format!("{}\n", "-".repeat(54)));
            for a in &roster.activities {
                out.push_str(&format!(
                    "{:<4} {:<32} {:>6}  {}\n",
                    a.id,
                    a.name,
                    a.points,
                    if a.requires_evidence { "required" } else { "-" }
                ));
            }
            Ok(out)
        }
    }
}

/// Render participants and staff
pub fn render_participants(roster: &Roster, format: OutputFormat) -> RenderResult {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&roster.participants)?),
        OutputFormat::Csv => write_csv(roster.participants.iter()),
        OutputFormat::Table => {
            let mut out = format!("{:<4} {:<24} {}\n", "ID", "Name", "Team");
            out.push_str(&format!("{}\n", "-".repeat(38)));
            for p in &roster.participants {
                out.push_str(&format!("{:<4} {:<24} {}\n", p.id, p.name, p.team));
            }
            let staff: Vec<&str> = roster.staff.iter().map(|s| s.name.as_str()).collect();
            out.push_str(&format!("\nStaff: {}\n", staff.join(", ")));
            Ok(out)
        }
    }
}

/// Render the entry list
pub fn render_entries(
    roster: &Roster,
    entries: &[crate::contest::Entry],
    format: OutputFormat,
) -> RenderResult {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            export_entries(entries, &mut buf)?;
            Ok(String::from_utf8(buf)?)
        }
        OutputFormat::Table => {
            if entries.is_empty() {
                return Ok("No entries registered yet\n".to_string());
            }
            let mut out = format!(
                "{:<12} {:<24} {:<32} {:>6}  {:<10} {}\n",
                "Date", "Participant", "Activity", "Points", "Verified", "Notes"
            );
            out.push_str(&format!("{}\n", "-".repeat(96)));
            for e in entries {
                let participant = roster
                    .participant(&e.participant_id)
                    .map(|p| p.name.as_str())
                    .unwrap_or("-");
                let (activity, points) = match roster.activity(&e.activity_id) {
                    Some(a) => (a.name.as_str(), crate::contest::entry_points(a, e)),
                    None => ("-", 0),
                };
                out.push_str(&format!(
                    "{:<12} {:<24} {:<32} {:>6}  {:<10} {}\n",
                    e.date.format("%Y-%m-%d").to_string(),
                    participant,
                    activity,
                    points,
                    e.verified_by,
                    e.notes.as_deref().unwrap_or("")
                ));
            }
            Ok(out)
        }
    }
}

/// Points preview shown while filling in the registration form
pub fn render_preview(activity: &Activity, group_size: u32) -> String {
    let total = preview_points(activity, group_size);
    if activity.kind.is_group_outing() {
        format!(
            "{}: {} × {} = {} points",
            activity.name, activity.points, group_size, total
        )
    } else {
        format!("{}: {} points", activity.name, total)
    }
}

fn write_csv<T: Serialize>(rows: impl IntoIterator<Item = T>) -> RenderResult {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let buf = writer
        .into_inner()
        .map_err(|e| RenderError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(buf)?)
}
