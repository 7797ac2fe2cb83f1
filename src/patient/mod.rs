//! Patient records and their vital-sign series
//!
//! These are the shapes the patient store hands out. Every vital sign is a
//! time-ordered series (oldest first); the monitoring engine only ever reads
//! them.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[cfg(test)]
pub(crate) mod fixtures;

/// Identifier of a patient in the store.
///
/// The mock store and its clients use both numeric and string ids, so both
/// are accepted on input. It is always written back out as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    pub fn new(id: impl Into<String>) -> Self {
        PatientId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatientId {
    fn from(id: &str) -> Self {
        PatientId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for PatientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => PatientId(text),
            RawId::Number(number) => PatientId(number.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    #[serde(default)]
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub vitals: VitalsBundle,
}

/// Vital-sign series for one patient, oldest reading first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsBundle {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub heart_rate: Vec<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub temperature: Vec<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub blood_pressure: Vec<BloodPressure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: f64,
    pub diastolic: f64,
}

impl BloodPressure {
    pub fn new(systolic: f64, diastolic: f64) -> Self {
        BloodPressure { systolic, diastolic }
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

// A series sent as `null` means the same thing as one that was never sent.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
