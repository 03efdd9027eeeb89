//! Append-only entry store

use crate::contest::types::{Entry, ParticipantId};

/// In-memory entry list
///
/// Entries are only ever appended; there is no way to edit or remove one.
#[derive(Debug, Default, Clone)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an admitted entry
    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries recorded for one participant, in insertion order
    pub fn for_participant<'a>(
        &'a self,
        id: &'a ParticipantId,
    ) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |e| &e.participant_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::types::{ActivityId, EntryId};
    use chrono::NaiveDate;

    fn entry(participant: &str) -> Entry {
        Entry {
            id: EntryId::new(),
            participant_id: ParticipantId(participant.to_string()),
            activity_id: ActivityId("1".to_string()),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            has_evidence: false,
            verified_by: "Brenda".to_string(),
            notes: None,
            group_size: None,
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = EntryStore::new();
        assert!(store.is_empty());

        let first = entry("1");
        let second = entry("2");
        store.append(first.clone());
        store.append(second.clone());

        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].id, first.id);
        assert_eq!(store.entries()[1].id, second.id);
    }

    #[test]
    fn test_for_participant() {
        let mut store = EntryStore::new();
        store.append(entry("1"));
        store.append(entry("2"));
        store.append(entry("1"));

        let id = ParticipantId("1".to_string());
        assert_eq!(store.for_participant(&id).count(), 2);
    }
}
