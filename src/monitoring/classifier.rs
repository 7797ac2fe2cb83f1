//! Status classification from current vitals and age
//!
//! Classification is a layered threshold decision: any critical breach wins
//! outright, then the age-tiered comfort bands decide between WATCH and
//! STABLE. Missing readings are read as 0 (or 0/0 for blood pressure), which
//! lands in the critical ranges. A patient without a heart rate is therefore
//! never reported as STABLE.

use tracing::debug;

use super::sampler::latest;
use super::Status;
use crate::patient::{BloodPressure, Patient};

/// Closed range of acceptable values; both bounds are acceptable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, high: f64) -> Self {
        Band { low, high }
    }

    /// True when `value` lies strictly outside the band.
    pub fn excludes(&self, value: f64) -> bool {
        value < self.low || value > self.high
    }
}

pub const CRITICAL_TEMPERATURE: Band = Band::new(29.0, 42.6);
pub const CRITICAL_HEART_RATE: Band = Band::new(40.0, 180.0);
pub const CRITICAL_SYSTOLIC: Band = Band::new(80.0, 200.0);
pub const CRITICAL_DIASTOLIC: Band = Band::new(50.0, 120.0);

/// Temperature comfort band used for classification, independent of age.
pub const TEMPERATURE_BAND: Band = Band::new(36.3, 37.9);

/// Temperature band used when raising WATCH alerts.
///
/// Deliberately narrower than `TEMPERATURE_BAND`: a temperature of 37.7 does
/// not by itself make a patient WATCH, but does raise an alert when the
/// patient is WATCH for another reason.
pub const ALERT_TEMPERATURE_BAND: Band = Band::new(36.3, 37.5);

/// Age bucket selecting which comfort bands apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeTier {
    Child,
    Adult,
    Elderly,
}

impl AgeTier {
    pub fn from_age(age: u32) -> Self {
        if age >= 65 {
            AgeTier::Elderly
        } else if age < 18 {
            AgeTier::Child
        } else {
            AgeTier::Adult
        }
    }

    pub fn heart_rate_band(self) -> Band {
        match self {
            AgeTier::Elderly => Band::new(70.0, 90.0),
            AgeTier::Child => Band::new(80.0, 120.0),
            AgeTier::Adult => Band::new(60.0, 80.0),
        }
    }

    // Children have no band of their own and share the adult one.
    pub fn systolic_band(self) -> Band {
        match self {
            AgeTier::Elderly => Band::new(150.0, 170.0),
            AgeTier::Child | AgeTier::Adult => Band::new(120.0, 140.0),
        }
    }

    pub fn diastolic_band(self) -> Band {
        match self {
            AgeTier::Elderly => Band::new(90.0, 110.0),
            AgeTier::Child | AgeTier::Adult => Band::new(60.0, 80.0),
        }
    }

    pub fn pressure_out_of_band(self, bp: BloodPressure) -> bool {
        self.systolic_band().excludes(bp.systolic) || self.diastolic_band().excludes(bp.diastolic)
    }
}

pub fn temperature_is_critical(temperature: f64) -> bool {
    CRITICAL_TEMPERATURE.excludes(temperature)
}

pub fn heart_rate_is_critical(heart_rate: f64) -> bool {
    heart_rate <= 0.0 || CRITICAL_HEART_RATE.excludes(heart_rate)
}

pub fn pressure_is_critical(bp: BloodPressure) -> bool {
    CRITICAL_SYSTOLIC.excludes(bp.systolic) || CRITICAL_DIASTOLIC.excludes(bp.diastolic)
}

/// Compute the clinical status of a patient from their latest vitals and age.
pub fn classify(patient: &Patient) -> Status {
    let vitals = &patient.vitals;
    let heart_rate = latest(&vitals.heart_rate).unwrap_or(0.0);
    let temperature = latest(&vitals.temperature).unwrap_or(0.0);
    let bp = latest(&vitals.blood_pressure).unwrap_or(BloodPressure::new(0.0, 0.0));

    let status = classify_reading(patient.age, heart_rate, temperature, bp);
    debug!(
        patient = %patient.id,
        age = patient.age,
        heart_rate,
        temperature,
        blood_pressure = %bp,
        %status,
        "classified patient"
    );
    status
}

fn classify_reading(age: u32, heart_rate: f64, temperature: f64, bp: BloodPressure) -> Status {
    if temperature_is_critical(temperature)
        || heart_rate_is_critical(heart_rate)
        || pressure_is_critical(bp)
    {
        return Status::Critical;
    }

    let tier = AgeTier::from_age(age);
    if tier.heart_rate_band().excludes(heart_rate)
        || tier.pressure_out_of_band(bp)
        || TEMPERATURE_BAND.excludes(temperature)
    {
        return Status::Watch;
    }

    Status::Stable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::fixtures::patient;
    use pretty_assertions::assert_eq;

    // Adult with every vital in band except the heart rate under test.
    fn adult_with_heart_rate(heart_rate: f64) -> Status {
        classify(&patient(40, &[heart_rate], &[37.0], &[(130.0, 70.0)]))
    }

    #[test]
    fn test_stable_adult() {
        let p = patient(40, &[70.0], &[37.0], &[(130.0, 70.0)]);
        assert_eq!(classify(&p), Status::Stable);
    }

    #[test]
    fn test_watch_adult() {
        let p = patient(40, &[100.0], &[38.0], &[(150.0, 90.0)]);
        assert_eq!(classify(&p), Status::Watch);
    }

    #[test]
    fn test_critical_adult() {
        let p = patient(30, &[200.0], &[43.0], &[(210.0, 130.0)]);
        assert_eq!(classify(&p), Status::Critical);

        let p = patient(40, &[190.0], &[45.0], &[(210.0, 130.0)]);
        assert_eq!(classify(&p), Status::Critical);
    }

    #[test]
    fn test_elderly_bands() {
        let p = patient(70, &[80.0], &[37.0], &[(160.0, 100.0)]);
        assert_eq!(classify(&p), Status::Stable);

        // Adult-normal pressure is below the elderly band.
        let p = patient(70, &[80.0], &[37.0], &[(130.0, 70.0)]);
        assert_eq!(classify(&p), Status::Watch);
    }

    #[test]
    fn test_child_uses_adult_pressure_band() {
        let p = patient(10, &[100.0], &[37.0], &[(130.0, 70.0)]);
        assert_eq!(classify(&p), Status::Stable);

        let p = patient(10, &[100.0], &[37.0], &[(160.0, 100.0)]);
        assert_eq!(classify(&p), Status::Watch);
    }

    #[test]
    fn test_adult_heart_rate_boundaries() {
        assert_eq!(adult_with_heart_rate(60.0), Status::Stable);
        assert_eq!(adult_with_heart_rate(80.0), Status::Stable);
        assert_eq!(adult_with_heart_rate(59.0), Status::Watch);
        assert_eq!(adult_with_heart_rate(81.0), Status::Watch);
        assert_eq!(adult_with_heart_rate(40.0), Status::Watch);
        assert_eq!(adult_with_heart_rate(180.0), Status::Watch);
        assert_eq!(adult_with_heart_rate(39.0), Status::Critical);
        assert_eq!(adult_with_heart_rate(181.0), Status::Critical);
        assert_eq!(adult_with_heart_rate(0.0), Status::Critical);
    }

    #[test]
    fn test_tiered_heart_rate_boundaries() {
        let elderly = |hr: f64| classify(&patient(65, &[hr], &[37.0], &[(160.0, 100.0)]));
        assert_eq!(elderly(70.0), Status::Stable);
        assert_eq!(elderly(90.0), Status::Stable);
        assert_eq!(elderly(69.0), Status::Watch);
        assert_eq!(elderly(91.0), Status::Watch);

        let child = |hr: f64| classify(&patient(17, &[hr], &[37.0], &[(130.0, 70.0)]));
        assert_eq!(child(80.0), Status::Stable);
        assert_eq!(child(120.0), Status::Stable);
        assert_eq!(child(79.0), Status::Watch);
        assert_eq!(child(121.0), Status::Watch);
    }

    #[test]
    fn test_age_tier_edges() {
        assert_eq!(AgeTier::from_age(0), AgeTier::Child);
        assert_eq!(AgeTier::from_age(17), AgeTier::Child);
        assert_eq!(AgeTier::from_age(18), AgeTier::Adult);
        assert_eq!(AgeTier::from_age(64), AgeTier::Adult);
        assert_eq!(AgeTier::from_age(65), AgeTier::Elderly);
    }

    #[test]
    fn test_temperature_boundaries() {
        let adult = |t: f64| classify(&patient(40, &[70.0], &[t], &[(130.0, 70.0)]));
        assert_eq!(adult(36.3), Status::Stable);
        assert_eq!(adult(37.9), Status::Stable);
        assert_eq!(adult(36.2), Status::Watch);
        assert_eq!(adult(38.0), Status::Watch);
        assert_eq!(adult(29.0), Status::Watch);
        assert_eq!(adult(42.6), Status::Watch);
        assert_eq!(adult(28.9), Status::Critical);
        assert_eq!(adult(42.7), Status::Critical);
    }

    #[test]
    fn test_pressure_boundaries() {
        let adult = |s: f64, d: f64| classify(&patient(40, &[70.0], &[37.0], &[(s, d)]));
        assert_eq!(adult(120.0, 60.0), Status::Stable);
        assert_eq!(adult(140.0, 80.0), Status::Stable);
        assert_eq!(adult(80.0, 50.0), Status::Watch);
        assert_eq!(adult(200.0, 120.0), Status::Watch);
        assert_eq!(adult(79.0, 70.0), Status::Critical);
        assert_eq!(adult(201.0, 70.0), Status::Critical);
        assert_eq!(adult(130.0, 49.0), Status::Critical);
        assert_eq!(adult(130.0, 121.0), Status::Critical);
    }

    #[test]
    fn test_missing_vitals_are_critical() {
        assert_eq!(classify(&patient(40, &[], &[], &[])), Status::Critical);

        // Only the heart rate is missing.
        let p = patient(40, &[], &[37.0], &[(130.0, 70.0)]);
        assert_eq!(classify(&p), Status::Critical);
    }

    #[test]
    fn test_latest_reading_decides() {
        let p = patient(40, &[200.0, 70.0], &[43.0, 37.0], &[(210.0, 130.0), (130.0, 70.0)]);
        assert_eq!(classify(&p), Status::Stable);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let p = patient(52, &[95.0, 101.0], &[37.2], &[(145.0, 85.0)]);
        let first = classify(&p);
        for _ in 0..10 {
            assert_eq!(classify(&p), first);
        }
    }
}
