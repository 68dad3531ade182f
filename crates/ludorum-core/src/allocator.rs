//! Points allocation for a single event.
//!
//! Turns submitted finishing positions into [`EventResult`]s. Entries that
//! share a submitted position form a tie block: every member gets the mean
//! of the points of the slots the block covers, and the VLP of the block's
//! first slot. Output order matches input order.

use serde::{Deserialize, Serialize};

use crate::domain::{EventKind, ParticipantRef, PointsTable, RawEntry};
use crate::obs;
use crate::ranking::tie_blocks;

/// A participant's scored outcome in one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResult {
    pub event_id: String,
    pub participant: ParticipantRef,
    /// Tie-compressed position; 0 means disqualified or unplaced.
    pub position: u32,
    /// Points earned; fractional when a tie block shares uneven slots.
    pub points: f64,
    /// Victor Ludorum points earned.
    pub vlp: u32,
}

impl EventResult {
    /// A result worth nothing at position 0.
    pub fn unplaced(event_id: impl Into<String>, participant: ParticipantRef) -> Self {
        Self {
            event_id: event_id.into(),
            participant,
            position: 0,
            points: 0.0,
            vlp: 0,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.position > 0
    }
}

/// Allocate points and VLP to every entry of one event.
///
/// Entries with no position, or a position below 1, score nothing at
/// position 0. Participant ids are expected to be unique within `entries`.
pub fn allocate(
    event_id: &str,
    entries: &[RawEntry],
    kind: EventKind,
    table: &PointsTable,
) -> Vec<EventResult> {
    let mut results: Vec<EventResult> = entries
        .iter()
        .map(|entry| EventResult::unplaced(event_id, entry.participant.clone()))
        .collect();

    let mut placed: Vec<(usize, u32)> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| entry.valid_position().map(|p| (index, p)))
        .collect();
    // Stable, so equal positions keep submission order.
    placed.sort_by_key(|&(_, position)| position);

    for block in tie_blocks(&placed, |&(_, position)| position) {
        let total: f64 = block.slots().map(|slot| table.points(kind, slot)).sum();
        let points = total / block.len as f64;
        let vlp = table.vlp(kind, block.slot);
        if block.is_tie() {
            obs::emit_tie_block(event_id, block.slot, block.len, points);
        }

        for &(index, _) in &placed[block.range()] {
            let result = &mut results[index];
            result.position = block.slot;
            result.points = points;
            result.vlp = vlp;
        }
    }

    obs::emit_event_scored(event_id, entries.len(), placed.len());
    results
}
