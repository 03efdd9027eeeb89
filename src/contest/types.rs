//! Core data types for the contest
//!
//! This module defines the fundamental types used throughout the contest layer:
//! - `Participant`: A contestant belonging to one of the fixed teams
//! - `Activity`: A catalog entry worth a fixed number of points
//! - `Entry`: A staff-verified record of a participant completing an activity
//! - `Team` and `ActivityKind`: Classification enums

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Participant identifier as seeded in the roster
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

/// Activity identifier as seeded in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub String);

/// Entry identifier, generated when an entry is admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! impl_id_display {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    std::fmt::Display::fmt(&self.0, f)
                }
            }
        )*
    };
}

impl_id_display!(ParticipantId, ActivityId, EntryId);

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for ActivityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<String> for ActivityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One of the three fixed teams
///
/// Declaration order is the tie-break order for team rankings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Team {
    Agua,
    Fuego,
    Viento,
}

impl Team {
    /// Get all teams in declaration order
    pub fn all() -> &'static [Team] {
        &[Team::Agua, Team::Fuego, Team::Viento]
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Agua => write!(f, "Agua"),
            Team::Fuego => write!(f, "Fuego"),
            Team::Viento => write!(f, "Viento"),
        }
    }
}

/// Kind of activity in the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Riding class
    Riding,
    /// Lab class
    Lab,
    /// Two classes on the same day
    Doblete,
    /// Outing with the team; points scale with group size
    SalidaEquipo,
    /// Two minutes of plank
    Plancha,
    /// Two minutes of mountain climbers
    Montana,
    /// Pantry donation
    Despensa,
    /// Lifestyle reel
    Reel,
}

impl ActivityKind {
    /// Whether points for this kind scale with the number of people involved
    pub fn is_group_outing(&self) -> bool {
        matches!(self, ActivityKind::SalidaEquipo)
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActivityKind::Riding => "riding",
            ActivityKind::Lab => "lab",
            ActivityKind::Doblete => "doblete",
            ActivityKind::SalidaEquipo => "salida_equipo",
            ActivityKind::Plancha => "plancha",
            ActivityKind::Montana => "montana",
            ActivityKind::Despensa => "despensa",
            ActivityKind::Reel => "reel",
        };
        write!(f, "{}", s)
    }
}

/// A contestant
///
/// Point totals are never stored here; see `Standings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub team: Team,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, team: Team) -> Self {
        Self {
            id: ParticipantId(id.into()),
            name: name.into(),
            team,
        }
    }
}

/// A point-earning activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    pub id: ActivityId,
    pub kind: ActivityKind,
    pub name: String,
    pub points: u32,
    #[serde(default)]
    pub requires_evidence: bool,
}

impl Activity {
    /// Create a new activity that needs no evidence
    pub fn new(
        id: impl Into<String>,
        kind: ActivityKind,
        name: impl Into<String>,
        points: u32,
    ) -> Self {
        Self {
            id: ActivityId(id.into()),
            kind,
            name: name.into(),
            points,
            requires_evidence: false,
        }
    }

    /// Builder: require evidence before an entry is admitted
    pub fn with_evidence(mut self) -> Self {
        self.requires_evidence = true;
        self
    }
}

/// A staff member allowed to verify entries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
}

impl StaffMember {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A staff-verified record of one completed activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub participant_id: ParticipantId,
    pub activity_id: ActivityId,
    pub date: NaiveDate,
    pub has_evidence: bool,
    pub verified_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Only present for group outings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_size: Option<u32>,
}
