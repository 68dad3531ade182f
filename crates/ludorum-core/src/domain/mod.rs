//! Domain models for the scoring engine.
//!
//! Canonical definitions for the entities the engine consumes and produces:
//! - `Event`: one scored discipline with its standing record
//! - `RawEntry` / `ParticipantRef`: submitted finishes, tagged by house or individual
//! - `PointsTable`: points and VLP per finishing slot
//! - `AgeGroupRule`: age brackets resolved from a date of birth

pub mod age_group;
pub mod digest;
pub mod error;
pub mod event;
pub mod participant;
pub mod points;

pub use age_group::{age_on, resolve_age_group, AgeBound, AgeGroupRule};
pub use error::{Result, ScoringError};
pub use event::{Event, EventKind, Gender, MeasurementNature, StandingRecord};
pub use participant::{Directory, House, Participant, ParticipantRef, RawEntry};
pub use points::PointsTable;
