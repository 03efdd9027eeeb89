//! Contest error types
//!
//! Every failure in the contest layer is a rejected user action. A rejected
//! action never changes the entry list.

use thiserror::Error;

/// Errors that can occur while registering entries or switching sessions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContestError {
    /// A required registration field was absent or blank
    #[error("Please complete all required fields (missing {0})")]
    MissingField(&'static str),

    /// Participant ID not present in the roster
    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    /// Activity ID not present in the catalog
    #[error("Unknown activity: {0}")]
    UnknownActivity(String),

    /// Verifier is not a staff member
    #[error("Unknown staff member: {0}")]
    UnknownStaff(String),

    /// Activity requires evidence and the evidence flag was not set
    #[error("Activity '{0}' requires social media evidence")]
    EvidenceRequired(String),

    /// Group outing with a group size of zero
    #[error("Group size must be a positive number, got {0}")]
    InvalidGroupSize(u32),

    /// Registration attempted outside a staff session
    #[error("Only staff can register activities")]
    StaffOnly,
}

/// Result type alias for contest operations
pub type ContestResult<T> = Result<T, ContestError>;
