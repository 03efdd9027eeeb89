//! Seeded roster: participants, activity catalog, and staff
//!
//! The roster is loaded once at startup and never mutated afterwards.

use crate::contest::types::{
    Activity, ActivityId, ActivityKind, Participant, ParticipantId, StaffMember, Team,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors found while checking a roster
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Empty {kind} name for id {id}")]
    EmptyName { kind: &'static str, id: String },
}

/// The immutable set of participants, activities, and staff
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Roster {
    #[serde(default = "default_participants")]
    pub participants: Vec<Participant>,

    #[serde(default = "default_activities")]
    pub activities: Vec<Activity>,

    #[serde(default = "default_staff")]
    pub staff: Vec<StaffMember>,
}

fn default_participants() -> Vec<Participant> {
    vec![
        Participant::new("1", "Ana García", Team::Agua),
        Participant::new("2", "Carlos López", Team::Fuego),
        Participant::new("3", "María Rodríguez", Team::Viento),
    ]
}

fn default_activities() -> Vec<Activity> {
    vec![
        Activity::new("1", ActivityKind::Riding, "1 clase de riding", 2),
        Activity::new("2", ActivityKind::Lab, "1 clase de lab", 2),
        Activity::new("3", ActivityKind::Doblete, "Doblete", 1),
        Activity::new("4", ActivityKind::SalidaEquipo, "Salida con equipo", 2).with_evidence(),
        Activity::new("5", ActivityKind::Plancha, "2 min de plancha", 2).with_evidence(),
        Activity::new("6", ActivityKind::Montana, "2 min de montaña", 2).with_evidence(),
        Activity::new("7", ActivityKind::Despensa, "Traer despensa para donar", 2)
            .with_evidence(),
        Activity::new("8", ActivityKind::Reel, "Reel de estilo de vida en Soul", 2)
            .with_evidence(),
    ]
}

fn default_staff() -> Vec<StaffMember> {
    vec![
        StaffMember::new("1", "Marian"),
        StaffMember::new("2", "Brenda"),
        StaffMember::new("3", "MariLu"),
    ]
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            participants: default_participants(),
            activities: default_activities(),
            staff: default_staff(),
        }
    }
}

impl Roster {
    pub fn new(
        participants: Vec<Participant>,
        activities: Vec<Activity>,
        staff: Vec<StaffMember>,
    ) -> Self {
        Self {
            participants,
            activities,
            staff,
        }
    }

    /// Get participant by ID
    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    /// Get activity by ID
    pub fn activity(&self, id: &ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| &a.id == id)
    }

    /// Get staff member by display name
    pub fn staff_by_name(&self, name: &str) -> Option<&StaffMember> {
        self.staff.iter().find(|s| s.name == name)
    }

    /// Participants belonging to a team, in roster order
    pub fn members(&self, team: Team) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(move |p| p.team == team)
    }

    /// Check ID uniqueness and non-empty names
    pub fn validate(&self) -> Result<(), RosterError> {
        check_unique(
            "participant",
            self.participants.iter().map(|p| (p.id.0.as_str(), p.name.as_str())),
        )?;
        check_unique(
            "activity",
            self.activities.iter().map(|a| (a.id.0.as_str(), a.name.as_str())),
        )?;
        check_unique(
            "staff",
            self.staff.iter().map(|s| (s.id.as_str(), s.name.as_str())),
        )?;
        Ok(())
    }
}

fn check_unique<'a>(
    kind: &'static str,
    items: impl Iterator<Item = (&'a str, &'a str)>,
) -> Result<(), RosterError> {
    let mut seen = HashSet::new();
    for (id, name) in items {
        if !seen.insert(id) {
            return Err(RosterError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
        if name.trim().is_empty() {
            return Err(RosterError::EmptyName {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
