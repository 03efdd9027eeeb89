//! Update step of the model–update–view cycle
//!
//! Each user action is a [`Msg`]. [`update`] applies it to the state and,
//! for an accepted registration, appends the entry and recomputes standings.
//! A rejected action leaves the entry list and standings untouched.

use crate::app::state::{AppState, NoticeLevel, Session};
use crate::contest::{ContestError, ContestResult, Entry, EntryDraft, EntryValidator};
use std::time::Instant;

/// A user action
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Switch to the staff view
    EnterStaff,
    /// Switch to the public view
    EnterPublic,
    /// End the staff session
    Logout,
    /// Submit the registration form
    Register(EntryDraft),
    /// Hide the current notice
    DismissNotice,
}

/// Apply a message to the state
///
/// Returns the admitted entry for a successful registration.
pub fn update(state: &mut AppState, msg: Msg, now: Instant) -> ContestResult<Option<Entry>> {
    match msg {
        Msg::EnterStaff => {
            state.session = Session::staff();
            tracing::info!("Staff session started");
            Ok(None)
        }
        Msg::EnterPublic | Msg::Logout => {
            if state.session.is_staff() {
                tracing::info!("Staff session ended");
            }
            state.session = Session::public();
            Ok(None)
        }
        Msg::DismissNotice => {
            state.notice = None;
            Ok(None)
        }
        Msg::Register(draft) => match register(state, draft) {
            Ok(entry) => {
                let message = success_message(state, &entry);
                state.set_notice(NoticeLevel::Success, message, now);
                Ok(Some(entry))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Registration rejected");
                state.set_notice(NoticeLevel::Error, e.to_string(), now);
                Err(e)
            }
        },
    }
}

fn register(state: &mut AppState, draft: EntryDraft) -> ContestResult<Entry> {
    if !state.session.is_staff() {
        return Err(ContestError::StaffOnly);
    }

    let entry = EntryValidator::new(state.roster()).validate(draft)?;

    tracing::info!(
        entry_id = %entry.id,
        participant = %entry.participant_id,
        activity = %entry.activity_id,
        verified_by = %entry.verified_by,
        "Entry registered"
    );

    state.store_mut().append(entry.clone());
    state.recompute();
    Ok(entry)
}

pub(crate) fn success_message(state: &AppState, entry: &Entry) -> String {
    let roster = state.roster();
    let activity = roster
        .activity(&entry.activity_id)
        .map(|a| a.name.as_str())
        .unwrap_or("-");
    let participant = roster
        .participant(&entry.participant_id)
        .map(|p| p.name.as_str())
        .unwrap_or("-");
    format!("Activity registered: {} for {}", activity, participant)
}
