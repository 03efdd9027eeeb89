//! Standings aggregation
//!
//! Standings are a pure function of the roster and the entry list. Nothing
//! here is cached between calls; callers recompute after each accepted entry.
//!
//! ```text
//! entries ──► entry_points ──► participant totals ──► team totals / averages
//!                                     │                        │
//!                                     ▼                        ▼
//!                            individual ranking          team ranking
//! ```

use crate::contest::catalog::Roster;
use crate::contest::types::{Activity, Entry, ParticipantId, Team};
use serde::Serialize;
use std::collections::HashMap;

/// Points an entry contributes for the given activity
///
/// Group outings multiply by group size; every other kind ignores it.
pub fn entry_points(activity: &Activity, entry: &Entry) -> u64 {
    let points = activity.points as u64;
    match entry.group_size {
        Some(size) if activity.kind.is_group_outing() => points * size as u64,
        _ => points,
    }
}

/// Points the registration form would award for an activity and group size
pub fn preview_points(activity: &Activity, group_size: u32) -> u64 {
    if activity.kind.is_group_outing() {
        activity.points as u64 * group_size as u64
    } else {
        activity.points as u64
    }
}

/// Derived total for one participant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantStanding {
    pub participant_id: ParticipantId,
    pub name: String,
    pub team: Team,
    pub total_points: u64,
}

/// Derived totals for one team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStanding {
    pub team: Team,
    pub total_points: u64,
    /// Mean of member totals, rounded to 2 decimals
    pub average_points: f64,
    pub participants: usize,
}

/// Ranked participant and team standings
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Standings {
    /// Descending by total; ties keep roster order
    pub participants: Vec<ParticipantStanding>,
    /// Descending by total; ties keep team declaration order
    pub teams: Vec<TeamStanding>,
}

impl Standings {
    /// Compute standings from scratch
    pub fn compute(roster: &Roster, entries: &[Entry]) -> Self {
        let mut totals: HashMap<&ParticipantId, u64> = HashMap::new();
        for entry in entries {
            // Unknown activities contribute nothing
            let points = roster
                .activity(&entry.activity_id)
                .map(|activity| entry_points(activity, entry))
                .unwrap_or(0);
            *totals.entry(&entry.participant_id).or_insert(0) += points;
        }

        let mut participants: Vec<ParticipantStanding> = roster
            .participants
            .iter()
            .map(|p| ParticipantStanding {
                participant_id: p.id.clone(),
                name: p.name.clone(),
                team: p.team,
                total_points: totals.get(&p.id).copied().unwrap_or(0),
            })
            .collect();

        let mut teams: Vec<TeamStanding> = Team::all()
            .iter()
            .map(|&team| {
                let members: Vec<&ParticipantStanding> =
                    participants.iter().filter(|p| p.team == team).collect();
                let total_points: u64 = members.iter().map(|p| p.total_points).sum();
                TeamStanding {
                    team,
                    total_points,
                    average_points: average(total_points, members.len()),
                    participants: members.len(),
                }
            })
            .collect();

        // sort_by is stable, so exact ties keep input order
        participants.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        teams.sort_by(|a, b| b.total_points.cmp(&a.total_points));

        Self {
            participants,
            teams,
        }
    }

    /// First `n` participants of the individual ranking
    pub fn top(&self, n: usize) -> &[ParticipantStanding] {
        &self.participants[..n.min(self.participants.len())]
    }

    /// Total for a single participant
    pub fn participant_total(&self, id: &ParticipantId) -> Option<u64> {
        self.participants
            .iter()
            .find(|p| &p.participant_id == id)
            .map(|p| p.total_points)
    }

    /// Standing for a single team
    pub fn team(&self, team: Team) -> Option<&TeamStanding> {
        self.teams.iter().find(|t| t.team == team)
    }

    /// Sum of all participant totals
    pub fn grand_total(&self) -> u64 {
        self.participants.iter().map(|p| p.total_points).sum()
    }
}

fn average(total: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let avg = total as f64 / count as f64;
    (avg * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::types::{ActivityId, EntryId, Participant};
    use chrono::NaiveDate;

    fn entry(participant: &str, activity: &str, group_size: Option<u32>) -> Entry {
        Entry {
            id: EntryId::new(),
            participant_id: ParticipantId(participant.to_string()),
            activity_id: ActivityId(activity.to_string()),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            has_evidence: true,
            verified_by: "Marian".to_string(),
            notes: None,
            group_size,
        }
    }

    #[test]
    fn test_empty_entries() {
        let roster = Roster::default();
        let standings = Standings::compute(&roster, &[]);

        assert_eq!(standings.participants.len(), 3);
        assert!(standings.participants.iter().all(|p| p.total_points == 0));
        assert_eq!(standings.teams.len(), 3);
        assert_eq!(standings.grand_total(), 0);

        // All tied: input order preserved
        let order: Vec<Team> = standings.teams.iter().map(|t| t.team).collect();
        assert_eq!(order, vec![Team::Agua, Team::Fuego, Team::Viento]);
    }

    #[test]
    fn test_doblete_twice() {
        let roster = Roster::default();
        let entries = vec![entry("1", "3", None), entry("1", "3", None)];
        let standings = Standings::compute(&roster, &entries);

        assert_eq!(standings.participant_total(&"1".into()), Some(2));
    }

    #[test]
    fn test_group_outing_multiplies() {
        let roster = Roster::default();
        let entries = vec![entry("2", "4", Some(4))];
        let standings = Standings::compute(&roster, &entries);

        assert_eq!(standings.participant_total(&"2".into()), Some(8));
        assert_eq!(standings.team(Team::Fuego).unwrap().total_points, 8);
    }

    #[test]
    fn test_group_size_ignored_for_other_kinds() {
        let roster = Roster::default();
        let entries = vec![entry("3", "5", Some(10))];
        let standings = Standings::compute(&roster, &entries);

        assert_eq!(standings.participant_total(&"3".into()), Some(2));
    }

    #[test]
    fn test_unknown_references_contribute_nothing() {
        let roster = Roster::default();
        let entries = vec![entry("1", "404", None), entry("77", "1", None)];
        let standings = Standings::compute(&roster, &entries);

        assert_eq!(standings.grand_total(), 0);
        let team_sum: u64 = standings.teams.iter().map(|t| t.total_points).sum();
        assert_eq!(team_sum, 0);
    }

    #[test]
    fn test_team_sum_matches_participant_sum() {
        let roster = Roster::default();
        let entries = vec![
            entry("1", "1", None),
            entry("1", "4", Some(3)),
            entry("2", "3", None),
            entry("3", "8", None),
            entry("3", "2", None),
        ];
        let standings = Standings::compute(&roster, &entries);

        let team_sum: u64 = standings.teams.iter().map(|t| t.total_points).sum();
        assert_eq!(team_sum, standings.grand_total());
        assert_eq!(team_sum, 2 + 6 + 1 + 2 + 2);
    }

    #[test]
    fn test_rankings_descending_and_stable() {
        let roster = Roster::default();
        // Fuego and Viento tie at 2, Agua leads with 4
        let entries = vec![
            entry("3", "1", None),
            entry("2", "2", None),
            entry("1", "1", None),
            entry("1", "2", None),
        ];
        let standings = Standings::compute(&roster, &entries);

        let teams: Vec<Team> = standings.teams.iter().map(|t| t.team).collect();
        assert_eq!(teams, vec![Team::Agua, Team::Fuego, Team::Viento]);

        let people: Vec<&str> = standings
            .participants
            .iter()
            .map(|p| p.participant_id.0.as_str())
            .collect();
        assert_eq!(people, vec!["1", "2", "3"]);

        for pair in standings.participants.windows(2) {
            assert!(pair[0].total_points >= pair[1].total_points);
        }
    }

    #[test]
    fn test_team_average_rounding() {
        let mut roster = Roster::default();
        roster.participants = vec![
            Participant::new("1", "A", Team::Agua),
            Participant::new("2", "B", Team::Agua),
            Participant::new("3", "C", Team::Agua),
        ];
        // 1 + 0 + 0 over three members = 0.333...
        let entries = vec![entry("1", "3", None)];
        let standings = Standings::compute(&roster, &entries);

        let agua = standings.team(Team::Agua).unwrap();
        assert_eq!(agua.total_points, 1);
        assert_eq!(agua.participants, 3);
        assert_eq!(agua.average_points, 0.33);

        // Teams without members average to zero
        let fuego = standings.team(Team::Fuego).unwrap();
        assert_eq!(fuego.participants, 0);
        assert_eq!(fuego.average_points, 0.0);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let roster = Roster::default();
        let entries = vec![entry("1", "4", Some(2)), entry("2", "6", None)];

        let first = Standings::compute(&roster, &entries);
        let second = Standings::compute(&roster, &entries);
        assert_eq!(first, second);
    }

    #[test]
    fn test_top_n() {
        let roster = Roster::default();
        let standings = Standings::compute(&roster, &[entry("3", "1", None)]);

        assert_eq!(standings.top(1)[0].participant_id.0, "3");
        assert_eq!(standings.top(10).len(), 3);
        assert!(standings.top(0).is_empty());
    }

    #[test]
    fn test_preview_points() {
        let roster = Roster::default();
        let outing = roster.activity(&"4".into()).unwrap();
        let riding = roster.activity(&"1".into()).unwrap();

        assert_eq!(preview_points(outing, 4), 8);
        assert_eq!(preview_points(riding, 4), 2);
    }
}
