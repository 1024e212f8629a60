//! Wire model of the result document written by the swarm optimizer.

use crate::core::HistoryError;
use serde::de::{self, value::MapAccessDeserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A position vector as the optimizer serializes it: `{ "position": [..], "dim": n }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionEntry {
    pub position: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dim: Option<usize>,
}

impl PositionEntry {
    pub fn new(position: Vec<f64>) -> Self {
        let dim = Some(position.len());
        Self { position, dim }
    }
}

impl From<Vec<f64>> for PositionEntry {
    fn from(position: Vec<f64>) -> Self {
        Self::new(position)
    }
}

/// A particle's own best-known position and, when recorded, its value.
///
/// On the wire this is the pair `[ {"position": [..]}, value ]`; the object
/// form `{ "position": [..], "value": v }` is accepted as well.
#[derive(Clone, Debug, PartialEq)]
pub struct PersonalBest {
    pub position: Vec<f64>,
    pub value: Option<f64>,
}

impl PersonalBest {
    pub fn new(position: Vec<f64>, value: Option<f64>) -> Self {
        Self { position, value }
    }
}

impl Serialize for PersonalBest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.value.is_some() { 2 } else { 1 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&PositionEntry::new(self.position.clone()))?;
        if let Some(value) = self.value {
            seq.serialize_element(&value)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for PersonalBest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PersonalBestVisitor)
    }
}

struct PersonalBestVisitor;

impl<'de> Visitor<'de> for PersonalBestVisitor {
    type Value = PersonalBest;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a [position, value] pair or a {position, value} object")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let entry: PositionEntry = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let value = seq.next_element::<Option<f64>>()?.flatten();
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(PersonalBest::new(entry.position, value))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        #[derive(Deserialize)]
        struct Tagged {
            position: Vec<f64>,
            #[serde(default)]
            value: Option<f64>,
        }

        let tagged = Tagged::deserialize(MapAccessDeserializer::new(map))?;
        Ok(PersonalBest::new(tagged.position, tagged.value))
    }
}

/// One optimizer step
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub particles: Vec<PositionEntry>,
    pub velocities: Vec<PositionEntry>,
    pub particle_bests: Vec<PersonalBest>,
    pub global_best_x: PositionEntry,
    pub global_best_value: f64,
}

/// The full result document. Fields other than these (e.g. `solution`) are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRecord {
    pub swarm_size: usize,
    pub lower_bound: PositionEntry,
    pub upper_bound: PositionEntry,
    pub history: Vec<IterationRecord>,
}

impl OptimizationRecord {
    pub fn from_json_str(json: &str) -> Result<Self, HistoryError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, HistoryError> {
        Ok(serde_json::from_value(value)?)
    }
}
