//! Events, measurement natures and standing records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ScoringError;

/// Whether an event is contested by houses or by individual competitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Team,
    Individual,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Individual => "individual",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "team" => Ok(Self::Team),
            "individual" => Ok(Self::Individual),
            other => Err(ScoringError::UnknownVariant {
                kind: "event kind",
                value: other.to_string(),
            }),
        }
    }
}

/// The axis an event is measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementNature {
    Time,
    Length,
    Height,
    Score,
}

impl MeasurementNature {
    /// `true` when a smaller magnitude is the better result.
    pub fn lower_is_better(self) -> bool {
        matches!(self, Self::Time)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Length => "length",
            Self::Height => "height",
            Self::Score => "score",
        }
    }
}

impl fmt::Display for MeasurementNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementNature {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(Self::Time),
            "length" => Ok(Self::Length),
            "height" => Ok(Self::Height),
            "score" => Ok(Self::Score),
            other => Err(ScoringError::UnknownVariant {
                kind: "measurement nature",
                value: other.to_string(),
            }),
        }
    }
}

/// Gender category of an event.
///
/// Victor/Victrix Ludorum tables exist only for `Male` and `Female`; results
/// from `Mixed` events still count towards house points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Mixed,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "boys" => Ok(Self::Male),
            "female" | "f" | "girls" => Ok(Self::Female),
            "mixed" | "open" => Ok(Self::Mixed),
            other => Err(ScoringError::UnknownVariant {
                kind: "gender",
                value: other.to_string(),
            }),
        }
    }
}

/// A competition record: the unit-formatted value and who set it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRecord {
    /// Record value, formatted in the event's metric (e.g. `"1:02.50"`).
    pub value: String,
    /// Display name of the record holder.
    pub holder: String,
}

impl StandingRecord {
    pub fn new(value: impl Into<String>, holder: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            holder: holder.into(),
        }
    }
}

/// One scored discipline instance within a competition session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier.
    pub id: String,

    /// Display name (e.g. `"U14 Boys 100m"`).
    #[serde(default)]
    pub name: String,

    /// Team or individual.
    pub kind: EventKind,

    /// Measurement axis; `None` when the event keeps no comparable measurement.
    #[serde(default)]
    pub nature: Option<MeasurementNature>,

    /// Free-form unit label (e.g. `"minutes"`, `"meters"`, `"points"`).
    #[serde(default)]
    pub metric: String,

    /// Age-group label (e.g. `"U16"`).
    #[serde(default)]
    pub age_group: String,

    /// Gender category.
    pub gender: Gender,

    /// Standing record, if one has ever been set.
    #[serde(default)]
    pub record: Option<StandingRecord>,

    /// Best score achieved in this session, in the event's metric.
    #[serde(default)]
    pub best_score: String,

    /// Set once this session's best score has replaced the standing record.
    #[serde(default)]
    pub record_broken: bool,
}

impl Event {
    /// Create an event with no record, no best score and no measurement nature.
    pub fn new(id: impl Into<String>, kind: EventKind, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            nature: None,
            metric: String::new(),
            age_group: String::new(),
            gender,
            record: None,
            best_score: String::new(),
            record_broken: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_measurement(
        mut self,
        nature: MeasurementNature,
        metric: impl Into<String>,
    ) -> Self {
        self.nature = Some(nature);
        self.metric = metric.into();
        self
    }

    pub fn with_age_group(mut self, age_group: impl Into<String>) -> Self {
        self.age_group = age_group.into();
        self
    }

    pub fn with_record(mut self, record: StandingRecord) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_best_score(mut self, best_score: impl Into<String>) -> Self {
        self.best_score = best_score.into();
        self
    }
}
