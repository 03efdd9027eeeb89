//! Console line grammar
//!
//! Each line typed at the console is parsed with clap as if it were a
//! command line without a binary name.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "soul-contest", no_binary_name = true, disable_version_flag = true)]
pub struct ConsoleLine {
    #[command(subcommand)]
    pub command: ConsoleCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ConsoleCommand {
    /// Switch to staff access
    Staff,

    /// Switch to the public view
    Public,

    /// End the staff session
    Logout,

    /// Show team and individual rankings
    Board,

    /// List contest activities
    Activities,

    /// List participants and staff
    Participants,

    /// List registered entries
    Entries,

    /// Show the points an activity would award
    Preview {
        /// Activity ID
        activity: String,
        /// People in the outing (team outings only)
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        group_size: u32,
    },

    /// Register an activity for a participant (staff only)
    Register {
        /// Participant ID
        #[arg(short, long)]
        participant: Option<String>,
        /// Activity ID
        #[arg(short, long)]
        activity: Option<String>,
        /// Staff member who verified the activity
        #[arg(short, long)]
        verified_by: Option<String>,
        /// Activity date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Evidence was posted on social media
        #[arg(short, long)]
        evidence: bool,
        /// People in the outing (team outings only)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        group_size: Option<u32>,
        /// Free-text notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Write registered entries to a CSV file
    Export {
        /// Output path
        path: std::path::PathBuf,
    },

    /// Hide the current notice
    Dismiss,

    /// Leave the console
    #[command(alias = "exit")]
    Quit,
}

impl ConsoleLine {
    /// Parse a console line, splitting words shell-style
    pub fn parse_line(line: &str) -> Result<Self, String> {
        let words = shlex::split(line).ok_or_else(|| "Unbalanced quotes".to_string())?;
        Self::try_parse_from(words).map_err(|e| e.to_string())
    }
}
