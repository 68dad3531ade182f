//! Points and Victor Ludorum point tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::{Result, ScoringError};
use crate::domain::event::EventKind;

/// Position-to-points configuration for one session.
///
/// Positions missing from a map are worth 0. VLP only applies to individual
/// events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointsTable {
    #[serde(default)]
    pub team: BTreeMap<u32, f64>,
    #[serde(default)]
    pub individual: BTreeMap<u32, f64>,
    #[serde(default)]
    pub vlp: BTreeMap<u32, u32>,
}

impl PointsTable {
    /// An empty table: every position is worth 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock sports-day table scoring the first eight places.
    pub fn standard() -> Self {
        let individual = [10.0, 8.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let vlp = [10, 8, 6, 5, 4, 3, 2, 1];
        Self {
            team: (1..).zip(individual.iter().map(|p| p * 2.0)).collect(),
            individual: (1..).zip(individual).collect(),
            vlp: (1..).zip(vlp).collect(),
        }
    }

    pub fn with_team(mut self, position: u32, points: f64) -> Self {
        self.team.insert(position, points);
        self
    }

    pub fn with_individual(mut self, position: u32, points: f64) -> Self {
        self.individual.insert(position, points);
        self
    }

    pub fn with_vlp(mut self, position: u32, vlp: u32) -> Self {
        self.vlp.insert(position, vlp);
        self
    }

    /// Points a single finishing slot is worth for `kind`.
    pub fn points(&self, kind: EventKind, slot: u32) -> f64 {
        let table = match kind {
            EventKind::Team => &self.team,
            EventKind::Individual => &self.individual,
        };
        table.get(&slot).copied().unwrap_or(0.0)
    }

    /// VLP a finishing slot is worth for `kind`; always 0 for team events.
    pub fn vlp(&self, kind: EventKind, slot: u32) -> u32 {
        match kind {
            EventKind::Team => 0,
            EventKind::Individual => self.vlp.get(&slot).copied().unwrap_or(0),
        }
    }

    /// Reject position 0 and negative or non-finite point values.
    pub fn validate(&self) -> Result<()> {
        for (name, table) in [("team", &self.team), ("individual", &self.individual)] {
            for (position, points) in table {
                if *position == 0 {
                    return Err(ScoringError::InvalidPointsTable(format!(
                        "position 0 in {name} table; positions start at 1"
                    )));
                }
                if !points.is_finite() || *points < 0.0 {
                    return Err(ScoringError::InvalidPointsTable(format!(
                        "{name} table position {position} has invalid points {points}"
                    )));
                }
            }
        }
        if self.vlp.contains_key(&0) {
            return Err(ScoringError::InvalidPointsTable(
                "position 0 in vlp table; positions start at 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_positions_are_zero() {
        let table = PointsTable::new().with_individual(1, 10.0);
        assert_eq!(table.points(EventKind::Individual, 1), 10.0);
        assert_eq!(table.points(EventKind::Individual, 2), 0.0);
        assert_eq!(table.points(EventKind::Team, 1), 0.0);
    }

    #[test]
    fn test_team_events_never_earn_vlp() {
        let table = PointsTable::new().with_vlp(1, 10);
        assert_eq!(table.vlp(EventKind::Individual, 1), 10);
        assert_eq!(table.vlp(EventKind::Team, 1), 0);
    }

    #[test]
    fn test_standard_table_shape() {
        let table = PointsTable::standard();
        assert_eq!(table.points(EventKind::Individual, 1), 10.0);
        assert_eq!(table.points(EventKind::Team, 1), 20.0);
        assert_eq!(table.points(EventKind::Individual, 8), 1.0);
        assert_eq!(table.points(EventKind::Individual, 9), 0.0);
        assert_eq!(table.vlp(EventKind::Individual, 3), 6);
        table.validate().expect("standard table is valid");
    }

    #[test]
    fn test_validate_rejects_position_zero() {
        let err = PointsTable::new().with_team(0, 5.0).validate().unwrap_err();
        assert!(err.to_string().contains("position 0"));

        let err = PointsTable::new().with_vlp(0, 5).validate().unwrap_err();
        assert!(err.to_string().contains("vlp"));
    }

    #[test]
    fn test_validate_rejects_bad_points() {
        assert!(PointsTable::new()
            .with_individual(1, f64::NAN)
            .validate()
            .is_err());
        assert!(PointsTable::new()
            .with_individual(1, -1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_json_keys_are_positions() {
        let table: PointsTable = serde_json::from_str(
            r#"{ "individual": { "1": 10, "2": 8 }, "vlp": { "1": 5 } }"#,
        )
        .expect("deserialize");
        assert_eq!(table.points(EventKind::Individual, 2), 8.0);
        assert_eq!(table.vlp(EventKind::Individual, 1), 5);
        assert!(table.team.is_empty());
    }
}
