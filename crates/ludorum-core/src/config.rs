//! Scoring configuration passed explicitly into every session computation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::age_group::validate_rules;
use crate::domain::{AgeGroupRule, PointsTable, Result, ScoringError};
use crate::standings::LudorumCutoff;

/// Victor Ludorum ranking policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudorumPolicy {
    #[serde(default)]
    pub cutoff: LudorumCutoff,
}

/// Everything a session needs besides its results and roster.
///
/// Sections missing from a config file take their defaults: the standard
/// points table, a top-three Ludorum cutoff and no age groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "PointsTable::standard")]
    pub points: PointsTable,
    #[serde(default)]
    pub ludorum: LudorumPolicy,
    #[serde(default)]
    pub age_groups: Vec<AgeGroupRule>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points: PointsTable::standard(),
            ludorum: LudorumPolicy::default(),
            age_groups: Vec::new(),
        }
    }
}

impl ScoringConfig {
    pub fn with_points(mut self, points: PointsTable) -> Self {
        self.points = points;
        self
    }

    pub fn with_cutoff(mut self, cutoff: LudorumCutoff) -> Self {
        self.ludorum.cutoff = cutoff;
        self
    }

    pub fn with_age_groups(mut self, age_groups: Vec<AgeGroupRule>) -> Self {
        self.age_groups = age_groups;
        self
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(event = "config.loaded", path = %path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.points.validate()?;
        validate_rules(&self.age_groups)?;
        match self.ludorum.cutoff {
            LudorumCutoff::Places(0) | LudorumCutoff::Rank(0) => Err(ScoringError::InvalidConfig(
                "ludorum cutoff must keep at least one place".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
