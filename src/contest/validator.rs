//! Entry validation
//!
//! Turns a candidate [`EntryDraft`] into an admitted [`Entry`]. Checks run in
//! a fixed order and the first failure is returned:
//!
//! 1. required fields (participant, activity, verifier, date)
//! 2. roster references (participant, activity, staff)
//! 3. evidence for evidence-required activities
//! 4. group size for group outings
//!
//! Validation has no side effects.

use crate::contest::catalog::Roster;
use crate::contest::error::{ContestError, ContestResult};
use crate::contest::types::{ActivityId, Entry, EntryId, ParticipantId};
use chrono::NaiveDate;

/// Group size assumed for a group outing when none is given
pub const DEFAULT_GROUP_SIZE: u32 = 1;

/// A candidate entry as collected by the registration form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub participant_id: Option<ParticipantId>,
    pub activity_id: Option<ActivityId>,
    pub date: Option<NaiveDate>,
    pub has_evidence: bool,
    pub verified_by: Option<String>,
    pub notes: Option<String>,
    pub group_size: Option<u32>,
}

impl EntryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn participant(mut self, id: impl Into<String>) -> Self {
        self.participant_id = Some(ParticipantId(id.into()));
        self
    }

    pub fn activity(mut self, id: impl Into<String>) -> Self {
        self.activity_id = Some(ActivityId(id.into()));
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn evidence(mut self, has_evidence: bool) -> Self {
        self.has_evidence = has_evidence;
        self
    }

    pub fn verified_by(mut self, name: impl Into<String>) -> Self {
        self.verified_by = Some(name.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn group_size(mut self, size: u32) -> Self {
        self.group_size = Some(size);
        self
    }
}

/// Validates drafts against a roster
pub struct EntryValidator<'a> {
    roster: &'a Roster,
}

impl<'a> EntryValidator<'a> {
    pub fn new(roster: &'a Roster) -> Self {
        Self { roster }
    }

    /// Validate a draft and produce an entry with a fresh ID
    pub fn validate(&self, draft: EntryDraft) -> ContestResult<Entry> {
        let participant_id = draft
            .participant_id
            .filter(|id| !id.0.trim().is_empty())
            .ok_or(ContestError::MissingField("participant"))?;
        let activity_id = draft
            .activity_id
            .filter(|id| !id.0.trim().is_empty())
            .ok_or(ContestError::MissingField("activity"))?;
        let verified_by = draft
            .verified_by
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ContestError::MissingField("verified_by"))?;
        let date = draft.date.ok_or(ContestError::MissingField("date"))?;

        if self.roster.participant(&participant_id).is_none() {
            return Err(ContestError::UnknownParticipant(participant_id.0));
        }
        let activity = self
            .roster
            .activity(&activity_id)
            .ok_or_else(|| ContestError::UnknownActivity(activity_id.0.clone()))?;
        if self.roster.staff_by_name(&verified_by).is_none() {
            return Err(ContestError::UnknownStaff(verified_by));
        }

        if activity.requires_evidence && !draft.has_evidence {
            return Err(ContestError::EvidenceRequired(activity.name.clone()));
        }

        let group_size = if activity.kind.is_group_outing() {
            match draft.group_size.unwrap_or(DEFAULT_GROUP_SIZE) {
                0 => return Err(ContestError::InvalidGroupSize(0)),
                n => Some(n),
            }
        } else {
            if let Some(n) = draft.group_size {
                tracing::debug!(
                    activity = %activity.name,
                    group_size = n,
                    "Ignoring group size for non-outing activity"
                );
            }
            None
        };

        let notes = draft
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Entry {
            id: EntryId::new(),
            participant_id,
            activity_id,
            date,
            has_evidence: draft.has_evidence,
            verified_by,
            notes,
            group_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn draft(activity: &str) -> EntryDraft {
        EntryDraft::new()
            .participant("1")
            .activity(activity)
            .date(day())
            .verified_by("Marian")
    }

    #[test]
    fn test_valid_entry() {
        let roster = Roster::default();
        let validator = EntryValidator::new(&roster);

        let entry = validator.validate(draft("3").notes("after class")).unwrap();
        assert_eq!(entry.participant_id.0, "1");
        assert_eq!(entry.activity_id.0, "3");
        assert_eq!(entry.date, day());
        assert_eq!(entry.verified_by, "Marian");
        assert_eq!(entry.notes.as_deref(), Some("after class"));
        assert_eq!(entry.group_size, None);
    }

    #[test]
    fn test_missing_fields() {
        let roster = Roster::default();
        let validator = EntryValidator::new(&roster);

        let no_participant = EntryDraft::new()
            .activity("3")
            .date(day())
            .verified_by("Marian");
        assert_eq!(
            validator.validate(no_participant),
            Err(ContestError::MissingField("participant"))
        );

        let blank_verifier = draft("3").verified_by("   ");
        assert_eq!(
            validator.validate(blank_verifier),
            Err(ContestError::MissingField("verified_by"))
        );

        let mut no_date = draft("3");
        no_date.date = None;
        assert_eq!(
            validator.validate(no_date),
            Err(ContestError::MissingField("date"))
        );
    }

    #[test]
    fn test_unknown_references() {
        let roster = Roster::default();
        let validator = EntryValidator::new(&roster);

        assert_eq!(
            validator.validate(draft("42")),
            Err(ContestError::UnknownActivity("42".to_string()))
        );
        assert_eq!(
            validator.validate(draft("3").participant("9")),
            Err(ContestError::UnknownParticipant("9".to_string()))
        );
        assert_eq!(
            validator.validate(draft("3").verified_by("Nobody")),
            Err(ContestError::UnknownStaff("Nobody".to_string()))
        );
    }

    #[test]
    fn test_evidence_required() {
        let roster = Roster::default();
        let validator = EntryValidator::new(&roster);

        assert_eq!(
            validator.validate(draft("5")),
            Err(ContestError::EvidenceRequired("2 min de plancha".to_string()))
        );
        assert!(validator.validate(draft("5").evidence(true)).is_ok());
    }

    #[test]
    fn test_group_size_only_for_outings() {
        let roster = Roster::default();
        let validator = EntryValidator::new(&roster);

        let outing = validator
            .validate(draft("4").evidence(true).group_size(4))
            .unwrap();
        assert_eq!(outing.group_size, Some(4));

        let defaulted = validator.validate(draft("4").evidence(true)).unwrap();
        assert_eq!(defaulted.group_size, Some(DEFAULT_GROUP_SIZE));

        let ignored = validator.validate(draft("1").group_size(6)).unwrap();
        assert_eq!(ignored.group_size, None);
    }

    #[test]
    fn test_zero_group_size_rejected() {
        let roster = Roster::default();
        let validator = EntryValidator::new(&roster);

        assert_eq!(
            validator.validate(draft("4").evidence(true).group_size(0)),
            Err(ContestError::InvalidGroupSize(0))
        );
    }

    #[test]
    fn test_blank_notes_dropped() {
        let roster = Roster::default();
        let validator = EntryValidator::new(&roster);

        let entry = validator.validate(draft("2").notes("  ")).unwrap();
        assert_eq!(entry.notes, None);
    }
}
