//! End-to-end scoring of a competition session.
//!
//! Per event: allocate points, then evaluate the record using the event's
//! best score and the first-placed participant. Across the session: fold
//! every result into standings and digest them for audit.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::allocator::{allocate, EventResult};
use crate::config::ScoringConfig;
use crate::domain::digest::digest_of;
use crate::domain::{Directory, Event, PointsTable, RawEntry, Result};
use crate::obs::{self, SessionSpan};
use crate::record::{evaluate_record, RecordVerdict};
use crate::standings::{aggregate, ScoredResult, Standings, StandingsLookup};

/// One event together with the entries submitted for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSheet {
    pub event: Event,
    #[serde(default)]
    pub entries: Vec<RawEntry>,
}

/// A complete session as handed over by data entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSheet {
    pub session_id: String,
    #[serde(default)]
    pub directory: Directory,
    #[serde(default)]
    pub events: Vec<EventSheet>,
}

impl SessionSheet {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Scored outcome of one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventScore {
    pub event_id: String,
    pub results: Vec<EventResult>,
    /// `None` when nothing placed first or no best score was entered.
    pub record: Option<RecordVerdict>,
}

/// Scored outcome of a whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: String,
    pub events: Vec<EventScore>,
    pub standings: Standings,
    /// SHA-256 of the canonical JSON of `standings`.
    pub standings_digest: String,
}

/// Score one event and update its record in place.
///
/// The record is evaluated against `event.best_score` with the display name
/// of the participant placed first (its id when the roster has no name).
/// When several tie for first, the smallest participant reference wins, so
/// the holder never depends on submission order.
/// When the verdict is broken, `event.record` is replaced and
/// `event.record_broken` set.
pub fn score_event(
    event: &mut Event,
    entries: &[RawEntry],
    table: &PointsTable,
    lookup: &StandingsLookup,
) -> EventScore {
    let results = allocate(&event.id, entries, event.kind, table);

    let winner = results
        .iter()
        .filter(|r| r.position == 1)
        .min_by(|a, b| a.participant.cmp(&b.participant));
    let record = match winner {
        Some(winner) if !event.best_score.trim().is_empty() => {
            let participant = &winner.participant;
            let name = lookup
                .display_name(participant)
                .unwrap_or_else(|| participant.id());
            let verdict = evaluate_record(
                event.record.as_ref(),
                &event.best_score,
                event.nature,
                &event.metric,
                name,
            );
            if let Some(new_record) = &verdict.new_record {
                event.record = Some(new_record.clone());
                event.record_broken = true;
            }
            obs::emit_record_evaluated(
                &event.id,
                verdict.broken,
                verdict.new_record.as_ref().map(|r| r.holder.as_str()),
            );
            Some(verdict)
        }
        _ => None,
    };

    EventScore {
        event_id: event.id.clone(),
        results,
        record,
    }
}

/// Score every event of a session and aggregate the standings.
///
/// Events are mutated in place exactly as [`score_event`] does.
pub fn score_session(sheet: &mut SessionSheet, config: &ScoringConfig) -> Result<SessionReport> {
    let _span = SessionSpan::enter(&sheet.session_id);
    let lookup = StandingsLookup::from_directory(&sheet.directory);

    let mut events = Vec::with_capacity(sheet.events.len());
    let mut scored = Vec::new();
    for EventSheet { event, entries } in &mut sheet.events {
        let score = score_event(event, entries, &config.points, &lookup);
        scored.extend(score.results.iter().map(|result| ScoredResult {
            result: result.clone(),
            event_kind: event.kind,
            age_group: event.age_group.clone(),
            gender: event.gender,
        }));
        events.push(score);
    }

    let standings = aggregate(&scored, &lookup, config.ludorum.cutoff);
    let standings_digest = digest_of(&standings)?;

    Ok(SessionReport {
        session_id: sheet.session_id.clone(),
        events,
        standings,
        standings_digest,
    })
}
