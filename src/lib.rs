//! # Soul Contest
//!
//! Scoreboard for a team-based contest: participants earn points by
//! completing activities, staff verify each entry, and the board ranks
//! teams and individuals.
//!
//! ## Modules
//!
//! - [`contest`]: Roster, entry validation, append-only store, standings
//! - [`app`]: Application state, update cycle, views, and console driver
//! - [`import`]: Entry CSV import and export
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust
//! use soul_contest::app::{update, AppState, Msg};
//! use soul_contest::contest::EntryDraft;
//! use chrono::NaiveDate;
//! use std::time::Instant;
//!
//! let mut state = AppState::default();
//! let now = Instant::now();
//!
//! update(&mut state, Msg::EnterStaff, now).unwrap();
//!
//! let draft = EntryDraft::new()
//!     .participant("2")
//!     .activity("4")
//!     .date(NaiveDate::from_ymd_opt(2025, 3, 2).unwrap())
//!     .evidence(true)
//!     .verified_by("Brenda")
//!     .group_size(4);
//! update(&mut state, Msg::Register(draft), now).unwrap();
//!
//! // Team outing: 2 points × 4 people
//! assert_eq!(state.standings().participant_total(&"2".into()), Some(8));
//! ```

pub mod app;
pub mod config;
pub mod contest;
pub mod import;
pub mod logging;

// Re-export top-level types for convenience
pub use contest::{
    Activity, ActivityKind, ContestError, ContestResult, Entry, EntryDraft, EntryStore,
    EntryValidator, Participant, Roster, Standings, Team,
};

pub use app::{update, AppState, Console, Msg, OutputFormat};

pub use config::{Config, ConfigError, LoggingConfig};

pub use import::{export_entries, EntryImporter, ImportError, ImportResult};
