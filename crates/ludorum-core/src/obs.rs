//! Structured observability hooks for scoring computations.
//!
//! Lifecycle milestones are emitted at `info!`, per-block detail at
//! `debug!`, degraded inputs at `warn!`. Every event carries an
//! `event = "<dotted.name>"` field for filtering.

use tracing::{debug, info, warn};

/// RAII guard that enters a session-scoped span while it is alive.
///
/// ```ignore
/// let _span = SessionSpan::enter("sports-day-2026");
/// // every event emitted here carries session_id = "sports-day-2026"
/// ```
pub struct SessionSpan {
    _span: tracing::span::EnteredSpan,
}

impl SessionSpan {
    pub fn enter(session_id: &str) -> Self {
        let span = tracing::info_span!("ludorum.session", session_id = %session_id);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: one event's entries were allocated points.
pub fn emit_event_scored(event_id: &str, entries: usize, placed: usize) {
    info!(
        event = "event.scored",
        event_id = %event_id,
        entries = entries,
        placed = placed,
        disqualified = entries - placed,
    );
}

/// Emit event: a tie block shared its slots' points.
pub fn emit_tie_block(event_id: &str, slot: u32, size: usize, points: f64) {
    debug!(
        event = "event.tie_block",
        event_id = %event_id,
        slot = slot,
        size = size,
        points = points,
    );
}

/// Emit event: a record comparison finished.
pub fn emit_record_evaluated(event_id: &str, broken: bool, holder: Option<&str>) {
    info!(
        event = "record.evaluated",
        event_id = %event_id,
        broken = broken,
        holder = holder.unwrap_or(""),
    );
}

/// Emit event: a score string could not be read as a magnitude (warning level).
pub fn emit_unparsable_score(value: &str, metric: &str) {
    warn!(event = "record.unparsable_score", value = %value, metric = %metric);
}

/// Emit event: a result could not be credited to any house.
pub fn emit_unresolved_house(event_id: &str, participant_id: &str) {
    debug!(
        event = "standings.unresolved_house",
        event_id = %event_id,
        participant_id = %participant_id,
    );
}

/// Emit event: standings were folded from a session's results.
pub fn emit_standings_aggregated(results: usize, houses: usize, ludorum_groups: usize) {
    info!(
        event = "standings.aggregated",
        results = results,
        houses = houses,
        ludorum_groups = ludorum_groups,
    );
}
