//! Ludorum Core - competition scoring engine
//!
//! Turns raw finishing positions into auditable standings for
//! multi-discipline athletics meetings:
//! - [`allocate`]: tie-aware points and VLP per event
//! - [`evaluate_record`]: record-break checks with duration-aware comparison
//! - [`aggregate`]: house totals and Victor/Victrix Ludorum tables
//! - [`score_session`]: the three composed over a whole session
//!
//! Every scoring call is synchronous and holds no state between calls.

pub mod allocator;
pub mod config;
pub mod domain;
pub mod duration;
pub mod obs;
pub mod ranking;
pub mod record;
pub mod session;
pub mod standings;
pub mod telemetry;

pub use allocator::{allocate, EventResult};
pub use config::{LudorumPolicy, ScoringConfig};
pub use domain::digest::{canonical_json, digest_of};
pub use domain::{
    age_on, resolve_age_group, AgeBound, AgeGroupRule, Directory, Event, EventKind, Gender, House,
    MeasurementNature, Participant, ParticipantRef, PointsTable, RawEntry, Result, ScoringError,
    StandingRecord,
};
pub use duration::{Duration, DurationUnit};
pub use obs::{
    emit_event_scored, emit_record_evaluated, emit_standings_aggregated, emit_tie_block,
    emit_unparsable_score, emit_unresolved_house, SessionSpan,
};
pub use ranking::{tie_blocks, TieBlock};
pub use record::{evaluate_record, parse_magnitude, RecordVerdict};
pub use session::{score_event, score_session, EventScore, EventSheet, SessionReport, SessionSheet};
pub use standings::{
    aggregate, HouseStanding, LudorumCutoff, LudorumEntry, LudorumGroup, LudorumTables,
    ScoredResult, Standings, StandingsLookup,
};
pub use telemetry::init_tracing;

/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
