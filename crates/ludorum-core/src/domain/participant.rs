//! Houses, participants and the raw entries submitted for an event.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::event::Gender;

/// Who an entry or result belongs to.
///
/// Serialized as `{"kind": "house" | "individual", "id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ParticipantRef {
    /// A house competing as a team.
    House(String),
    /// A single competitor, credited to a house through the roster.
    Individual(String),
}

impl ParticipantRef {
    pub fn house(id: impl Into<String>) -> Self {
        Self::House(id.into())
    }

    pub fn individual(id: impl Into<String>) -> Self {
        Self::Individual(id.into())
    }

    /// The underlying house or participant id.
    pub fn id(&self) -> &str {
        match self {
            Self::House(id) | Self::Individual(id) => id,
        }
    }

    pub fn is_house(&self) -> bool {
        matches!(self, Self::House(_))
    }
}

/// One participant's submitted finish for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub participant: ParticipantRef,

    /// Submitted finishing position. `None`, zero or negative means
    /// disqualified or unplaced.
    #[serde(default, deserialize_with = "lenient_position")]
    pub position: Option<i64>,
}

impl RawEntry {
    pub fn new(participant: ParticipantRef, position: Option<i64>) -> Self {
        Self {
            participant,
            position,
        }
    }

    pub fn placed(participant: ParticipantRef, position: i64) -> Self {
        Self::new(participant, Some(position))
    }

    pub fn unplaced(participant: ParticipantRef) -> Self {
        Self::new(participant, None)
    }

    /// The submitted position when it counts as a finish (`>= 1`).
    pub fn valid_position(&self) -> Option<u32> {
        self.position
            .filter(|p| *p >= 1)
            .and_then(|p| u32::try_from(p).ok())
    }
}

/// Accept integers, integral floats and numeric strings; anything else is
/// treated as no position at all.
fn lenient_position<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// A standing team-like group participants belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct House {
    pub id: String,
    pub name: String,
}

impl House {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// An individual competitor known to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,

    /// House the participant's points are credited to.
    #[serde(default)]
    pub house_id: Option<String>,

    #[serde(default)]
    pub gender: Option<Gender>,

    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            house_id: None,
            gender: None,
            date_of_birth: None,
        }
    }

    pub fn in_house(mut self, house_id: impl Into<String>) -> Self {
        self.house_id = Some(house_id.into());
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn born_on(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }
}

/// The roster of houses and participants supplied with a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    #[serde(default)]
    pub houses: Vec<House>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_house(mut self, house: House) -> Self {
        self.houses.push(house);
        self
    }

    pub fn with_participant(mut self, participant: Participant) -> Self {
        self.participants.push(participant);
        self
    }
}
