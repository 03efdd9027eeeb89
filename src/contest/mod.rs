//! Contest core
//!
//! - **types**: Core data structures (Participant, Activity, Entry)
//! - **catalog**: The seeded, immutable roster
//! - **validator**: Candidate entry validation
//! - **store**: Append-only entry list
//! - **aggregator**: Participant and team standings
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Register:
//!   EntryDraft → EntryValidator → EntryStore::append → Standings::compute
//! ```
//!
//! # Example
//!
//! ```rust
//! use soul_contest::contest::{EntryDraft, EntryStore, EntryValidator, Roster, Standings};
//! use chrono::NaiveDate;
//!
//! let roster = Roster::default();
//! let mut store = EntryStore::new();
//!
//! let draft = EntryDraft::new()
//!     .participant("1")
//!     .activity("3")
//!     .date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
//!     .verified_by("Marian");
//!
//! let entry = EntryValidator::new(&roster).validate(draft).unwrap();
//! store.append(entry);
//!
//! let standings = Standings::compute(&roster, store.entries());
//! assert_eq!(standings.participant_total(&"1".into()), Some(1));
//! ```

pub mod aggregator;
pub mod catalog;
pub mod error;
pub mod store;
pub mod types;
pub mod validator;

pub use aggregator::{entry_points, preview_points, ParticipantStanding, Standings, TeamStanding};
pub use catalog::{Roster, RosterError};
pub use error::{ContestError, ContestResult};
pub use store::EntryStore;
pub use types::{
    Activity, ActivityId, ActivityKind, Entry, EntryId, Participant, ParticipantId, StaffMember,
    Team,
};
pub use validator::{EntryDraft, EntryValidator, DEFAULT_GROUP_SIZE};
