//! Application state
//!
//! A single explicit state object replaces the UI's scattered mutable
//! state. Standings are recomputed from the roster and entry list after
//! every accepted mutation.

use crate::contest::{EntryStore, Roster, Standings};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Default notice lifetime
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

/// Who is using the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Dashboard only
    Public,
    /// Dashboard plus registration
    Staff,
}

/// Current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub role: Role,
}

impl Session {
    pub fn public() -> Self {
        Self { role: Role::Public }
    }

    pub fn staff() -> Self {
        Self { role: Role::Staff }
    }

    pub fn is_staff(&self) -> bool {
        self.role == Role::Staff
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::public()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient message shown after a user action
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notice {
    pub fn new(
        level: NoticeLevel,
        message: impl Into<String>,
        now: Instant,
        ttl: Duration,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: now,
            ttl,
        }
    }

    /// Whether the notice should still be displayed at `now`
    pub fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) < self.ttl
    }
}

/// Everything the board needs to render
#[derive(Debug)]
pub struct AppState {
    roster: Roster,
    store: EntryStore,
    standings: Standings,
    pub(crate) session: Session,
    pub(crate) notice: Option<Notice>,
    notice_ttl: Duration,
}

impl AppState {
    /// Create a fresh state for a seeded roster
    pub fn new(roster: Roster) -> Self {
        let standings = Standings::compute(&roster, &[]);
        Self {
            roster,
            store: EntryStore::new(),
            standings,
            session: Session::default(),
            notice: None,
            notice_ttl: DEFAULT_NOTICE_TTL,
        }
    }

    /// Builder: override the notice lifetime
    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn notice_ttl(&self) -> Duration {
        self.notice_ttl
    }

    /// The current notice, if it has not expired
    pub fn live_notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| n.is_live(now))
    }

    pub(crate) fn store_mut(&mut self) -> &mut EntryStore {
        &mut self.store
    }

    pub(crate) fn set_notice(
        &mut self,
        level: NoticeLevel,
        message: impl Into<String>,
        now: Instant,
    ) {
        self.notice = Some(Notice::new(level, message, now, self.notice_ttl));
    }

    /// Rebuild standings from the current entry list
    pub fn recompute(&mut self) {
        self.standings = Standings::compute(&self.roster, self.store.entries());
        tracing::debug!(
            entries = self.store.len(),
            grand_total = self.standings.grand_total(),
            "Standings recomputed"
        );
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Roster::default())
    }
}
