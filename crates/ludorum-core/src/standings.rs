//! House point totals and Victor/Victrix Ludorum tables.
//!
//! [`aggregate`] folds every scored result of a session into:
//! - house totals, crediting individual results to the participant's house
//! - per (age group, gender) Ludorum tables of summed VLP, skip-ranked and
//!   cut off after the podium without ever splitting a tie

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::allocator::EventResult;
use crate::domain::{Directory, EventKind, Gender, ParticipantRef};
use crate::obs;
use crate::ranking::{tie_blocks, TieBlock};

/// An [`EventResult`] annotated with the event metadata aggregation needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    #[serde(flatten)]
    pub result: EventResult,
    pub event_kind: EventKind,
    pub age_group: String,
    pub gender: Gender,
}

/// Indexed id lookups, built once per aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandingsLookup {
    pub participant_house: HashMap<String, String>,
    pub house_names: HashMap<String, String>,
    pub participant_names: HashMap<String, String>,
}

impl StandingsLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_directory(directory: &Directory) -> Self {
        let mut lookup = Self::new();
        for house in &directory.houses {
            lookup
                .house_names
                .insert(house.id.clone(), house.name.clone());
        }
        for participant in &directory.participants {
            lookup
                .participant_names
                .insert(participant.id.clone(), participant.name.clone());
            if let Some(house_id) = &participant.house_id {
                lookup
                    .participant_house
                    .insert(participant.id.clone(), house_id.clone());
            }
        }
        lookup
    }

    pub fn with_house(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.house_names.insert(id.into(), name.into());
        self
    }

    pub fn with_participant(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        house_id: Option<&str>,
    ) -> Self {
        let id = id.into();
        if let Some(house_id) = house_id {
            self.participant_house
                .insert(id.clone(), house_id.to_string());
        }
        self.participant_names.insert(id, name.into());
        self
    }

    /// House a result is credited to: the house itself, or the
    /// participant's house from the roster.
    pub fn house_of<'a>(&'a self, participant: &'a ParticipantRef) -> Option<&'a str> {
        match participant {
            ParticipantRef::House(id) => Some(id.as_str()),
            ParticipantRef::Individual(id) => self.participant_house.get(id).map(String::as_str),
        }
    }

    pub fn display_name(&self, participant: &ParticipantRef) -> Option<&str> {
        match participant {
            ParticipantRef::House(id) => self.house_names.get(id),
            ParticipantRef::Individual(id) => self.participant_names.get(id),
        }
        .map(String::as_str)
    }
}

/// Where the Ludorum tables stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LudorumCutoff {
    /// Keep the first `n` tie blocks, i.e. the top `n` distinct totals.
    Places(u32),
    /// Keep tie blocks whose first rank is at most `n`.
    Rank(u32),
}

impl Default for LudorumCutoff {
    fn default() -> Self {
        Self::Places(3)
    }
}

impl LudorumCutoff {
    fn admits(&self, block_index: usize, block: &TieBlock) -> bool {
        match *self {
            Self::Places(n) => u32::try_from(block_index).map_or(false, |i| i < n),
            Self::Rank(n) => block.slot <= n,
        }
    }
}

/// One house's total for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseStanding {
    pub rank: u32,
    pub house_id: String,
    /// `None` when the house id is missing from the roster.
    pub name: Option<String>,
    pub points: f64,
}

/// One participant's Ludorum placing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudorumEntry {
    pub rank: u32,
    pub participant_id: String,
    /// `None` when the participant id is missing from the roster.
    pub name: Option<String>,
    pub age_group: String,
    pub gender: Gender,
    pub vlp: u32,
}

/// Ranked Ludorum placings for one age group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudorumGroup {
    pub age_group: String,
    pub entries: Vec<LudorumEntry>,
}

/// Victor Ludorum (male) and Victrix Ludorum (female) tables, one group per
/// age group, ordered by age-group label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudorumTables {
    pub male: Vec<LudorumGroup>,
    pub female: Vec<LudorumGroup>,
}

impl LudorumTables {
    pub fn group(&self, gender: Gender, age_group: &str) -> Option<&LudorumGroup> {
        let groups = match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
            Gender::Mixed => return None,
        };
        groups.iter().find(|g| g.age_group == age_group)
    }

    pub fn group_count(&self) -> usize {
        self.male.len() + self.female.len()
    }
}

/// Session standings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    /// Every known house, highest total first.
    pub house_points: Vec<HouseStanding>,
    pub ludorum: LudorumTables,
}

impl Standings {
    pub fn house(&self, house_id: &str) -> Option<&HouseStanding> {
        self.house_points.iter().find(|h| h.house_id == house_id)
    }
}

/// Fold a session's results into house totals and Ludorum tables.
///
/// Results that resolve to no house add to no total but still count
/// towards the participant's VLP.
pub fn aggregate(
    results: &[ScoredResult],
    lookup: &StandingsLookup,
    cutoff: LudorumCutoff,
) -> Standings {
    let house_points = house_totals(results, lookup);
    let ludorum = ludorum_tables(results, lookup, cutoff);
    obs::emit_standings_aggregated(results.len(), house_points.len(), ludorum.group_count());
    Standings {
        house_points,
        ludorum,
    }
}

fn house_totals(results: &[ScoredResult], lookup: &StandingsLookup) -> Vec<HouseStanding> {
    let mut credits: HashMap<&str, Vec<(&str, &ParticipantRef, f64)>> = lookup
        .house_names
        .keys()
        .map(|id| (id.as_str(), Vec::new()))
        .collect();

    for scored in results {
        let result = &scored.result;
        match lookup.house_of(&result.participant) {
            Some(house_id) => credits.entry(house_id).or_default().push((
                result.event_id.as_str(),
                &result.participant,
                result.points,
            )),
            None => obs::emit_unresolved_house(&result.event_id, result.participant.id()),
        }
    }

    // f64 addition is order-sensitive: sum each house in (event, participant)
    // order so the total is independent of submission order.
    let mut sorted: Vec<(&str, f64)> = credits
        .into_iter()
        .map(|(house_id, mut credits)| {
            credits.sort_by(|a, b| {
                a.0.cmp(b.0)
                    .then_with(|| a.1.cmp(b.1))
                    .then_with(|| a.2.total_cmp(&b.2))
            });
            (house_id, credits.iter().map(|&(_, _, points)| points).sum())
        })
        .collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut standings = Vec::with_capacity(sorted.len());
    for block in tie_blocks(&sorted, |&(_, points)| points) {
        for &(house_id, points) in &sorted[block.range()] {
            standings.push(HouseStanding {
                rank: block.slot,
                house_id: house_id.to_string(),
                name: lookup.house_names.get(house_id).cloned(),
                points,
            });
        }
    }
    standings
}

fn ludorum_tables(
    results: &[ScoredResult],
    lookup: &StandingsLookup,
    cutoff: LudorumCutoff,
) -> LudorumTables {
    let mut buckets: BTreeMap<(Gender, &str), HashMap<&str, u32>> = BTreeMap::new();
    for scored in results {
        if scored.event_kind != EventKind::Individual || scored.gender == Gender::Mixed {
            continue;
        }
        let ParticipantRef::Individual(id) = &scored.result.participant else {
            continue;
        };
        *buckets
            .entry((scored.gender, scored.age_group.as_str()))
            .or_default()
            .entry(id.as_str())
            .or_insert(0) += scored.result.vlp;
    }

    let mut tables = LudorumTables::default();
    for ((gender, age_group), totals) in buckets {
        let mut sorted: Vec<(&str, u32)> = totals.into_iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let mut entries = Vec::new();
        for (index, block) in tie_blocks(&sorted, |&(_, vlp)| vlp).iter().enumerate() {
            if !cutoff.admits(index, block) {
                break;
            }
            for &(participant_id, vlp) in &sorted[block.range()] {
                entries.push(LudorumEntry {
                    rank: block.slot,
                    participant_id: participant_id.to_string(),
                    name: lookup.participant_names.get(participant_id).cloned(),
                    age_group: age_group.to_string(),
                    gender,
                    vlp,
                });
            }
        }
        if entries.is_empty() {
            continue;
        }

        let group = LudorumGroup {
            age_group: age_group.to_string(),
            entries,
        };
        match gender {
            Gender::Male => tables.male.push(group),
            Gender::Female => tables.female.push(group),
            Gender::Mixed => {}
        }
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    fn individual(event: &str, id: &str, points: f64, vlp: u32, gender: Gender) -> ScoredResult {
        ScoredResult {
            result: EventResult {
                event_id: event.to_string(),
                participant: ParticipantRef::individual(id),
                position: 1,
                points,
                vlp,
            },
            event_kind: EventKind::Individual,
            age_group: "U14".to_string(),
            gender,
        }
    }

    #[test]
    fn test_house_of_resolves_both_kinds() {
        let lookup = StandingsLookup::new()
            .with_house("red", "Red House")
            .with_participant("p1", "Ada", Some("red"));
        assert_eq!(lookup.house_of(&ParticipantRef::house("blue")), Some("blue"));
        assert_eq!(lookup.house_of(&ParticipantRef::individual("p1")), Some("red"));
        assert_eq!(lookup.house_of(&ParticipantRef::individual("p2")), None);
        assert_eq!(
            lookup.display_name(&ParticipantRef::house("red")),
            Some("Red House")
        );
        assert_eq!(lookup.display_name(&ParticipantRef::individual("p2")), None);
    }

    #[test]
    fn test_roster_houses_appear_with_zero() {
        let lookup = StandingsLookup::new()
            .with_house("red", "Red")
            .with_house("blue", "Blue");
        let standings = aggregate(&[], &lookup, LudorumCutoff::default());
        assert_eq!(standings.house_points.len(), 2);
        assert!(standings.house_points.iter().all(|h| h.points == 0.0 && h.rank == 1));
        assert_eq!(standings.house_points[0].house_id, "blue");
    }

    #[test]
    fn test_house_ranks_skip_after_tie() {
        let lookup = StandingsLookup::new()
            .with_participant("a", "A", Some("red"))
            .with_participant("b", "B", Some("blue"))
            .with_participant("c", "C", Some("green"));
        let results = vec![
            individual("e1", "a", 5.0, 0, Gender::Male),
            individual("e1", "b", 5.0, 0, Gender::Male),
            individual("e1", "c", 2.0, 0, Gender::Male),
        ];
        let standings = aggregate(&results, &lookup, LudorumCutoff::default());
        let ranks: Vec<(&str, u32)> = standings
            .house_points
            .iter()
            .map(|h| (h.house_id.as_str(), h.rank))
            .collect();
        assert_eq!(ranks, vec![("blue", 1), ("red", 1), ("green", 3)]);
        assert!(standings.house("green").unwrap().name.is_none());
    }

    #[test]
    fn test_mixed_and_team_results_skip_ludorum() {
        let mut team = individual("relay", "a", 20.0, 10, Gender::Male);
        team.event_kind = EventKind::Team;
        let results = vec![team, individual("e", "b", 1.0, 5, Gender::Mixed)];
        let standings = aggregate(&results, &StandingsLookup::new(), LudorumCutoff::default());
        assert_eq!(standings.ludorum.group_count(), 0);
    }

    #[test]
    fn test_rank_cutoff_excludes_block_starting_after_rank() {
        let results: Vec<ScoredResult> = [("a", 10), ("b", 10), ("c", 8), ("d", 6), ("e", 6)]
            .iter()
            .map(|(id, vlp)| individual("e", id, 0.0, *vlp, Gender::Female))
            .collect();
        let standings = aggregate(&results, &StandingsLookup::new(), LudorumCutoff::Rank(3));
        let group = standings.ludorum.group(Gender::Female, "U14").unwrap();
        let ranks: Vec<u32> = group.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 1, 3]);
    }

    #[test]
    fn test_places_cutoff_keeps_whole_tie_blocks() {
        let totals = [("a", 10), ("b", 10), ("c", 10), ("d", 9), ("e", 7), ("f", 6)];
        let results: Vec<ScoredResult> = totals
            .iter()
            .map(|(id, vlp)| individual("e", id, 0.0, *vlp, Gender::Male))
            .collect();
        let standings = aggregate(&results, &StandingsLookup::new(), LudorumCutoff::Places(3));
        let group = standings.ludorum.group(Gender::Male, "U14").unwrap();
        let ranks: Vec<(&str, u32)> = group
            .entries
            .iter()
            .map(|e| (e.participant_id.as_str(), e.rank))
            .collect();
        assert_eq!(ranks, vec![("a", 1), ("b", 1), ("c", 1), ("d", 4), ("e", 5)]);
    }

    #[test]
    fn test_house_total_ignores_result_order() {
        let lookup = StandingsLookup::new()
            .with_house("red", "Red")
            .with_participant("a", "A", Some("red"))
            .with_participant("b", "B", Some("red"))
            .with_participant("c", "C", Some("red"));
        let forward = vec![
            individual("100m", "a", 0.1, 0, Gender::Male),
            individual("100m", "b", 0.2, 0, Gender::Male),
            individual("100m", "c", 0.3, 0, Gender::Male),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = aggregate(&forward, &lookup, LudorumCutoff::default());
        let b = aggregate(&reversed, &lookup, LudorumCutoff::default());
        let red_a = a.house("red").unwrap().points;
        let red_b = b.house("red").unwrap().points;
        assert_eq!(red_a.to_bits(), red_b.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_cutoff_wire_format() {
        let json = serde_json::to_value(LudorumCutoff::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "places", "value": 3 }));
    }
}
