//! Record-break evaluation.
//!
//! Compares a session's best score against the standing record. Duration
//! metrics are compared in centiseconds through [`crate::duration`]; every
//! other metric is read as a plain number. Timed events prefer the smaller
//! magnitude, all others the larger.
//!
//! A score that cannot be read never breaks a record and never fails the
//! computation.

use serde::{Deserialize, Serialize};

use crate::domain::{MeasurementNature, StandingRecord};
use crate::duration::{Duration, DurationUnit};
use crate::obs;

/// Outcome of a record comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordVerdict {
    pub broken: bool,
    /// The replacement record, present only when `broken`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_record: Option<StandingRecord>,
}

impl RecordVerdict {
    fn broken(value: &str, holder: &str) -> Self {
        Self {
            broken: true,
            new_record: Some(StandingRecord::new(value, holder)),
        }
    }

    fn kept() -> Self {
        Self {
            broken: false,
            new_record: None,
        }
    }
}

/// Read `value` as a comparable magnitude in `metric`.
///
/// Duration metrics yield total seconds; other metrics read the leading
/// decimal number, so `"12.40m"` is 12.4. `None` when nothing numeric can
/// be read.
pub fn parse_magnitude(value: &str, metric: &str) -> Option<f64> {
    match DurationUnit::from_metric(metric) {
        Some(unit) => Duration::parse(value, unit).map(|d| d.as_secs_f64()),
        None => parse_leading_number(value),
    }
}

fn parse_leading_number(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let bytes = value.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    value[..end].parse().ok()
}

/// Decide whether `best_score` breaks `prior`.
///
/// With no prior record (or a blank one) the best score always sets the
/// record. The new record keeps `best_score` exactly as written.
pub fn evaluate_record(
    prior: Option<&StandingRecord>,
    best_score: &str,
    nature: Option<MeasurementNature>,
    metric: &str,
    winner: &str,
) -> RecordVerdict {
    let Some(prior) = prior.filter(|record| !record.value.trim().is_empty()) else {
        return RecordVerdict::broken(best_score, winner);
    };

    let current = parse_magnitude(&prior.value, metric);
    let candidate = parse_magnitude(best_score, metric);
    let (Some(current), Some(candidate)) = (current, candidate) else {
        if current.is_none() {
            obs::emit_unparsable_score(&prior.value, metric);
        }
        if candidate.is_none() {
            obs::emit_unparsable_score(best_score, metric);
        }
        return RecordVerdict::kept();
    };

    let lower_is_better = nature.is_some_and(MeasurementNature::lower_is_better);
    let broken = if lower_is_better {
        candidate < current
    } else {
        candidate > current
    };

    if broken {
        RecordVerdict::broken(best_score, winner)
    } else {
        RecordVerdict::kept()
    }
}
