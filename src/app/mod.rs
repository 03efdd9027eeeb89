//! Application layer
//!
//! Model–update–view over the contest core:
//!
//! - **state**: `AppState`, session role, and transient notices
//! - **update**: `Msg` and the `update` step
//! - **view**: Pure render functions (table, JSON, CSV)
//! - **command**: Console line grammar
//! - **console**: Line-at-a-time driver used by the binary

pub mod command;
pub mod console;
pub mod state;
pub mod update;
pub mod view;

pub use command::{ConsoleCommand, ConsoleLine};
pub use console::{Console, ConsoleError, ReplaySummary, Reply};
pub use state::{AppState, Notice, NoticeLevel, Role, Session, DEFAULT_NOTICE_TTL};
pub use update::{update, Msg};
pub use view::{
    render_activities, render_board, render_entries, render_participants, render_preview,
    OutputFormat, RenderError,
};
