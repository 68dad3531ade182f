//! Clock-style duration values for timed events.
//!
//! A duration string is `[[[dd:]hh:]mm:]ss[.ff]`. The trailing fraction is
//! read as hundredths of a second: it is right-padded or truncated to two
//! digits, so `".5"` is 50cs and `".567"` is 56cs. The `:`-segments are
//! right-aligned to (days, hours, minutes, seconds) and missing higher
//! segments are zero. A unit declares how many segments a value may carry:
//! `minutes` expects `mm:ss`, `hours` expects `hh:mm:ss`.
//!
//! Values are held as integer centiseconds so parsing and formatting
//! round-trip without loss.

use serde::{Deserialize, Serialize};

/// Seconds per segment, highest first: days, hours, minutes, seconds.
const PLACE_SECONDS: [u64; 4] = [86_400, 3_600, 60, 1];

/// Clock-style segment names, highest first, for composite unit labels.
const PLACE_NAMES: [&str; 4] = ["dd", "hh", "mm", "ss"];

const UNIT_ALIASES: &[(&str, DurationUnit)] = &[
    ("s", DurationUnit::Seconds),
    ("sec", DurationUnit::Seconds),
    ("secs", DurationUnit::Seconds),
    ("second", DurationUnit::Seconds),
    ("seconds", DurationUnit::Seconds),
    ("min", DurationUnit::Minutes),
    ("mins", DurationUnit::Minutes),
    ("minute", DurationUnit::Minutes),
    ("minutes", DurationUnit::Minutes),
    ("h", DurationUnit::Hours),
    ("hr", DurationUnit::Hours),
    ("hrs", DurationUnit::Hours),
    ("hour", DurationUnit::Hours),
    ("hours", DurationUnit::Hours),
    ("d", DurationUnit::Days),
    ("day", DurationUnit::Days),
    ("days", DurationUnit::Days),
];

/// Coarsest segment a duration value is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    /// Number of `:`-separated segments a value in this unit may carry.
    pub const fn segments(self) -> usize {
        match self {
            Self::Seconds => 1,
            Self::Minutes => 2,
            Self::Hours => 3,
            Self::Days => 4,
        }
    }

    fn from_segments(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::Seconds),
            2 => Some(Self::Minutes),
            3 => Some(Self::Hours),
            4 => Some(Self::Days),
            _ => None,
        }
    }

    /// Interpret an event's metric label as a duration unit.
    ///
    /// Accepts unit words (`"minutes"`, `"secs"`, `"h"`, ...) and clock
    /// layouts (`"mm:ss"`, `"hh:mm:ss.ff"`, ...). Returns `None` for
    /// non-duration metrics such as `"meters"`.
    pub fn from_metric(metric: &str) -> Option<Self> {
        let metric = metric.trim().to_ascii_lowercase();
        if let Some((_, unit)) = UNIT_ALIASES.iter().find(|(alias, _)| *alias == metric) {
            return Some(*unit);
        }

        let clock = match metric.split_once('.') {
            Some((clock, fraction))
                if !fraction.is_empty() && fraction.bytes().all(|b| b.is_ascii_alphabetic()) =>
            {
                clock
            }
            Some(_) => return None,
            None => metric.as_str(),
        };
        let segments: Vec<&str> = clock.split(':').collect();
        let unit = Self::from_segments(segments.len())?;
        let expected = &PLACE_NAMES[PLACE_NAMES.len() - segments.len()..];
        (segments.as_slice() == expected).then_some(unit)
    }
}

/// A non-negative duration with centisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Duration {
    centis: u64,
}

impl Duration {
    pub const fn from_centis(centis: u64) -> Self {
        Self { centis }
    }

    pub const fn centis(&self) -> u64 {
        self.centis
    }

    /// Total seconds, including the hundredths.
    pub fn as_secs_f64(&self) -> f64 {
        self.centis as f64 / 100.0
    }

    /// Parse a clock-style value written in `unit`.
    ///
    /// Returns `None` for empty input, non-digit segments, or more segments
    /// than `unit` allows.
    pub fn parse(value: &str, unit: DurationUnit) -> Option<Self> {
        let value = value.trim();
        let (clock, fraction) = match value.split_once('.') {
            Some((clock, fraction)) => (clock, parse_hundredths(fraction)?),
            None => (value, 0),
        };

        let segments: Vec<&str> = clock.split(':').collect();
        if segments.len() > unit.segments() {
            return None;
        }
        let places = &PLACE_SECONDS[PLACE_SECONDS.len() - segments.len()..];

        let mut seconds: u64 = 0;
        for (segment, place) in segments.iter().zip(places) {
            let n = parse_digits(segment)?;
            seconds = seconds.checked_add(n.checked_mul(*place)?)?;
        }
        let centis = seconds.checked_mul(100)?.checked_add(fraction)?;
        Some(Self { centis })
    }

    /// Render in the clock layout `unit` declares.
    ///
    /// The leading segment is unpadded and absorbs any overflow (90 minutes
    /// in unit `minutes` is `"90:00.00"`); later segments are two digits and
    /// the hundredths are always present.
    pub fn format(&self, unit: DurationUnit) -> String {
        let places = &PLACE_SECONDS[PLACE_SECONDS.len() - unit.segments()..];
        let mut rest = self.centis / 100;
        let mut out = String::new();
        for (i, place) in places.iter().enumerate() {
            let value = rest / place;
            rest %= place;
            if i == 0 {
                out.push_str(&value.to_string());
            } else {
                out.push_str(&format!(":{value:02}"));
            }
        }
        out.push_str(&format!(".{:02}", self.centis % 100));
        out
    }
}

fn parse_digits(segment: &str) -> Option<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Read a fraction as hundredths: right-pad or truncate to two digits.
fn parse_hundredths(fraction: &str) -> Option<u64> {
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut digits = fraction.bytes().map(|b| u64::from(b - b'0'));
    let tens = digits.next().unwrap_or(0);
    let ones = digits.next().unwrap_or(0);
    Some(tens * 10 + ones)
}
