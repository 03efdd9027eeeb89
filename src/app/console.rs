//! Console driver
//!
//! Turns one console line into a [`Msg`] or a view, runs it to completion,
//! and returns the text to print. The binary feeds it stdin line by line.

use crate::app::command::{ConsoleCommand, ConsoleLine};
use crate::app::state::{AppState, NoticeLevel};
use crate::app::update::{success_message, update, Msg};
use crate::app::view::{
    render_activities, render_board, render_entries, render_participants, render_preview,
    OutputFormat, RenderError,
};
use crate::contest::{ActivityId, EntryDraft};
use crate::import::{export_entries_to_path, ImportError};
use std::time::Instant;
use thiserror::Error;

/// Errors that stop a console command from producing output
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Export error: {0}")]
    Export(#[from] ImportError),
}

/// What to print after a line, and whether to stop
#[derive(Debug, Default, PartialEq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

/// Outcome of replaying a batch of drafts
#[derive(Debug, Default)]
pub struct ReplaySummary {
    pub accepted: usize,
    /// One message per rejected draft, in input order
    pub rejected: Vec<String>,
}

/// Console session over an application state
pub struct Console {
    state: AppState,
    top_n: usize,
    format: OutputFormat,
}

impl Console {
    pub fn new(state: AppState, top_n: usize, format: OutputFormat) -> Self {
        Self {
            state,
            top_n,
            format,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Handle one console line
    pub fn handle_line(&mut self, line: &str, now: Instant) -> Result<Reply, ConsoleError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Reply::default());
        }

        let command = match ConsoleLine::parse_line(line) {
            Ok(parsed) => parsed.command,
            Err(message) => return Ok(Reply::text(message)),
        };

        self.handle_command(command, now)
    }

    fn handle_command(
        &mut self,
        command: ConsoleCommand,
        now: Instant,
    ) -> Result<Reply, ConsoleError> {
        let reply = match command {
            ConsoleCommand::Staff => {
                self.dispatch(Msg::EnterStaff, now);
                Reply::text("Staff access enabled")
            }
            ConsoleCommand::Public => {
                self.dispatch(Msg::EnterPublic, now);
                Reply::text("Public view")
            }
            ConsoleCommand::Logout => {
                self.dispatch(Msg::Logout, now);
                Reply::text("Logged out")
            }
            ConsoleCommand::Dismiss => {
                self.dispatch(Msg::DismissNotice, now);
                Reply::default()
            }
            ConsoleCommand::Quit => Reply {
                output: String::new(),
                quit: true,
            },
            ConsoleCommand::Board => {
                let mut out = String::new();
                if let Some(notice) = self.state.live_notice(now) {
                    out.push_str(&format_notice(notice.level, &notice.message));
                    out.push('\n');
                }
                out.push_str(&render_board(self.state.standings(), self.top_n, self.format)?);
                Reply::text(out)
            }
            ConsoleCommand::Activities => {
                Reply::text(render_activities(self.state.roster(), self.format)?)
            }
            ConsoleCommand::Participants => {
                Reply::text(render_participants(self.state.roster(), self.format)?)
            }
            ConsoleCommand::Entries => Reply::text(render_entries(
                self.state.roster(),
                self.state.store().entries(),
                self.format,
            )?),
            ConsoleCommand::Preview {
                activity,
                group_size,
            } => match self.state.roster().activity(&ActivityId(activity.clone())) {
                Some(a) => Reply::text(render_preview(a, group_size)),
                None => Reply::text(format!("Unknown activity: {}", activity)),
            },
            ConsoleCommand::Register {
                participant,
                activity,
                verified_by,
                date,
                evidence,
                group_size,
                notes,
            } => {
                let draft = EntryDraft {
                    participant_id: participant.map(Into::into),
                    activity_id: activity.map(Into::into),
                    date: Some(date.unwrap_or_else(|| chrono::Local::now().date_naive())),
                    has_evidence: evidence,
                    verified_by,
                    notes,
                    group_size,
                };
                match update(&mut self.state, Msg::Register(draft), now) {
                    Ok(Some(entry)) => Reply::text(format_notice(
                        NoticeLevel::Success,
                        &success_message(&self.state, &entry),
                    )),
                    Ok(None) => Reply::default(),
                    Err(e) => Reply::text(format_notice(NoticeLevel::Error, &e.to_string())),
                }
            }
            ConsoleCommand::Export { path } => {
                export_entries_to_path(self.state.store().entries(), &path)?;
                tracing::info!(
                    path = ?path,
                    entries = self.state.store().len(),
                    "Entries exported"
                );
                Reply::text(format!(
                    "Exported {} entries to {:?}",
                    self.state.store().len(),
                    path
                ))
            }
        };
        Ok(reply)
    }

    fn dispatch(&mut self, msg: Msg, now: Instant) {
        // Only registration can fail
        if let Err(e) = update(&mut self.state, msg, now) {
            tracing::warn!(error = %e, "Console action rejected");
        }
    }

    /// Register a batch of drafts as staff, restoring the previous role after
    pub fn replay(&mut self, drafts: Vec<EntryDraft>, now: Instant) -> ReplaySummary {
        let was_staff = self.state.session().is_staff();
        self.dispatch(Msg::EnterStaff, now);

        let mut summary = ReplaySummary::default();
        for (i, draft) in drafts.into_iter().enumerate() {
            match update(&mut self.state, Msg::Register(draft), now) {
                Ok(_) => summary.accepted += 1,
                Err(e) => summary.rejected.push(format!("Draft {}: {}", i + 1, e)),
            }
        }

        if !was_staff {
            self.dispatch(Msg::EnterPublic, now);
        }
        self.dispatch(Msg::DismissNotice, now);

        tracing::info!(
            accepted = summary.accepted,
            rejected = summary.rejected.len(),
            "Replay finished"
        );
        summary
    }
}

fn format_notice(level: NoticeLevel, message: &str) -> String {
    match level {
        NoticeLevel::Success => format!("[ok] {}", message),
        NoticeLevel::Error => format!("[error] {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Role;
    use chrono::NaiveDate;

    fn console() -> Console {
        Console::new(AppState::default(), 10, OutputFormat::Table)
    }

    #[test]
    fn test_register_requires_staff() {
        let mut console = console();
        let now = Instant::now();

        let reply = console
            .handle_line("register -p 1 -a 3 -v Marian", now)
            .unwrap();
        assert_eq!(reply.output, "[error] Only staff can register activities");
        assert!(console.state().store().is_empty());

        console.handle_line("staff", now).unwrap();
        let reply = console
            .handle_line("register -p 1 -a 3 -v Marian", now)
            .unwrap();
        assert_eq!(reply.output, "[ok] Activity registered: Doblete for Ana García");
        assert_eq!(console.state().store().len(), 1);
    }

    #[test]
    fn test_register_defaults_date_to_today() {
        let mut console = console();
        let now = Instant::now();
        console.handle_line("staff", now).unwrap();
        console
            .handle_line("register -p 1 -a 1 -v Brenda", now)
            .unwrap();

        let entry = &console.state().store().entries()[0];
        assert_eq!(entry.date, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_missing_evidence_message() {
        let mut console = console();
        let now = Instant::now();
        console.handle_line("staff", now).unwrap();

        let reply = console
            .handle_line("register -p 3 -a 5 -v MariLu", now)
            .unwrap();
        assert_eq!(
            reply.output,
            "[error] Activity '2 min de plancha' requires social media evidence"
        );
    }

    #[test]
    fn test_register_reply_without_notice_lifetime() {
        let state = AppState::default().with_notice_ttl(std::time::Duration::ZERO);
        let mut console = Console::new(state, 10, OutputFormat::Table);
        let now = Instant::now();
        console.handle_line("staff", now).unwrap();

        let reply = console
            .handle_line("register -p 3 -a 5 -v MariLu", now)
            .unwrap();
        assert_eq!(
            reply.output,
            "[error] Activity '2 min de plancha' requires social media evidence"
        );
        assert!(console.state().store().is_empty());

        let reply = console
            .handle_line("register -p 1 -a 3 -v Marian", now)
            .unwrap();
        assert_eq!(reply.output, "[ok] Activity registered: Doblete for Ana García");
        assert_eq!(console.state().store().len(), 1);

        // Expired notice never reaches the board
        let reply = console.handle_line("board", now).unwrap();
        assert!(reply.output.starts_with("Team ranking"));
    }

    #[test]
    fn test_preview_rejects_zero_group_size() {
        let mut console = console();
        let reply = console.handle_line("preview 4 -g 0", Instant::now()).unwrap();
        assert!(reply.output.contains("invalid value '0'"));
        assert!(!reply.output.contains("points"));
    }

    #[test]
    fn test_board_shows_live_notice() {
        let mut console = console();
        let now = Instant::now();
        console.handle_line("staff", now).unwrap();
        console
            .handle_line("register -p 2 -a 4 -v Brenda -e -g 4", now)
            .unwrap();

        let reply = console.handle_line("board", now).unwrap();
        assert!(reply.output.starts_with("[ok] Activity registered"));
        assert!(reply.output.contains("1    Fuego"));

        let later = now + std::time::Duration::from_secs(10);
        let reply = console.handle_line("board", later).unwrap();
        assert!(reply.output.starts_with("Team ranking"));
    }

    #[test]
    fn test_quit_and_parse_errors() {
        let mut console = console();
        let now = Instant::now();

        assert!(console.handle_line("quit", now).unwrap().quit);
        assert_eq!(console.handle_line("   ", now).unwrap(), Reply::default());

        let reply = console.handle_line("launch rockets", now).unwrap();
        assert!(!reply.quit);
        assert!(reply.output.contains("launch"));
    }

    #[test]
    fn test_preview() {
        let mut console = console();
        let now = Instant::now();

        let reply = console.handle_line("preview 4 -g 4", now).unwrap();
        assert_eq!(reply.output, "Salida con equipo: 2 × 4 = 8 points");

        let reply = console.handle_line("preview 99", now).unwrap();
        assert_eq!(reply.output, "Unknown activity: 99");
    }

    #[test]
    fn test_replay_keeps_role() {
        let mut console = console();
        let now = Instant::now();
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let drafts = vec![
            EntryDraft::new()
                .participant("1")
                .activity("3")
                .date(day)
                .verified_by("Marian"),
            EntryDraft::new()
                .participant("1")
                .activity("5")
                .date(day)
                .verified_by("Marian"),
        ];

        let summary = console.replay(drafts, now);

        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.rejected.len(), 1);
        assert!(summary.rejected[0].starts_with("Draft 2:"));
        assert_eq!(console.state().session().role, Role::Public);
        assert_eq!(
            console.state().standings().participant_total(&"1".into()),
            Some(1)
        );
    }

    #[test]
    fn test_export_command() {
        let mut console = console();
        let now = Instant::now();
        console.handle_line("staff", now).unwrap();
        console
            .handle_line("register -p 1 -a 2 -v Marian -d 2025-03-05", now)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.csv");
        let reply = console
            .handle_line(&format!("export '{}'", path.display()), now)
            .unwrap();

        assert!(reply.output.starts_with("Exported 1 entries"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains(",1,2,2025-03-05,false,Marian,,"));
    }
}
