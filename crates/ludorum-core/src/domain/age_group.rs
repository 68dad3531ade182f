//! Age-group brackets resolved from a date of birth.
//!
//! Age groups are informative metadata: the engine never refuses a result
//! because a participant falls outside the event's bracket.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::error::{Result, ScoringError};

/// Age threshold for one bracket, in whole years on the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgeBound {
    /// Younger than `age` (the "U16" style).
    Under { age: u32 },
    /// Between `min` and `max`, both inclusive.
    Range { min: u32, max: u32 },
    /// `age` or older.
    AtLeast { age: u32 },
}

impl AgeBound {
    pub fn contains(&self, years: u32) -> bool {
        match *self {
            Self::Under { age } => years < age,
            Self::Range { min, max } => (min..=max).contains(&years),
            Self::AtLeast { age } => years >= age,
        }
    }
}

/// A labelled age bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeGroupRule {
    pub label: String,
    pub bound: AgeBound,
}

impl AgeGroupRule {
    pub fn new(label: impl Into<String>, bound: AgeBound) -> Self {
        Self {
            label: label.into(),
            bound,
        }
    }

    pub fn under(label: impl Into<String>, age: u32) -> Self {
        Self::new(label, AgeBound::Under { age })
    }

    pub fn range(label: impl Into<String>, min: u32, max: u32) -> Self {
        Self::new(label, AgeBound::Range { min, max })
    }

    pub fn at_least(label: impl Into<String>, age: u32) -> Self {
        Self::new(label, AgeBound::AtLeast { age })
    }
}

/// Whole years between `date_of_birth` and `on`; `None` if born after `on`.
pub fn age_on(date_of_birth: NaiveDate, on: NaiveDate) -> Option<u32> {
    if on < date_of_birth {
        return None;
    }
    let mut years = on.year() - date_of_birth.year();
    if (on.month(), on.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// Label of the first rule whose bound contains the participant's age on `on`.
pub fn resolve_age_group(
    date_of_birth: NaiveDate,
    on: NaiveDate,
    rules: &[AgeGroupRule],
) -> Option<&str> {
    let years = age_on(date_of_birth, on)?;
    rules
        .iter()
        .find(|rule| rule.bound.contains(years))
        .map(|rule| rule.label.as_str())
}

/// Reject empty or duplicate labels and inverted ranges.
pub fn validate_rules(rules: &[AgeGroupRule]) -> Result<()> {
    let mut seen = HashSet::new();
    for rule in rules {
        let label = rule.label.trim();
        if label.is_empty() {
            return Err(ScoringError::InvalidAgeGroup(
                "age group label must not be empty".to_string(),
            ));
        }
        if !seen.insert(label) {
            return Err(ScoringError::InvalidAgeGroup(format!(
                "duplicate age group label: {label}"
            )));
        }
        if let AgeBound::Range { min, max } = rule.bound {
            if min > max {
                return Err(ScoringError::InvalidAgeGroup(format!(
                    "age group {label} has inverted range {min}..={max}"
                )));
            }
        }
    }
    Ok(())
}
