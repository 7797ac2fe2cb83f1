//! Alert generation over a patient collection
//!
//! `scan` rebuilds the whole alert list from the patients it is given; no
//! alert survives from one scan to the next.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::classifier::{
    classify, heart_rate_is_critical, temperature_is_critical, AgeTier, ALERT_TEMPERATURE_BAND,
};
use super::sampler::latest;
use super::Status;
use crate::patient::{BloodPressure, Patient};

/// Vital sign an alert is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertKind {
    Temperature,
    HeartRate,
    BloodPressure,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::Temperature => write!(f, "temperature"),
            AlertKind::HeartRate => write!(f, "heartRate"),
            AlertKind::BloodPressure => write!(f, "bloodPressure"),
        }
    }
}

/// The reading an alert reports.
///
/// Serializes as a bare number, a `"systolic/diastolic"` string, or `null`
/// when the patient is critical and the vital was never recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AlertValue {
    Reading(f64),
    Pressure(String),
    Missing,
}

impl From<Option<f64>> for AlertValue {
    fn from(reading: Option<f64>) -> Self {
        reading.map_or(AlertValue::Missing, AlertValue::Reading)
    }
}

impl From<BloodPressure> for AlertValue {
    fn from(bp: BloodPressure) -> Self {
        AlertValue::Pressure(bp.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub patient: Patient,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub value: AlertValue,
    pub level: Status,
}

impl Alert {
    fn new(patient: &Patient, kind: AlertKind, value: AlertValue, level: Status) -> Self {
        Alert {
            patient: patient.clone(),
            kind,
            value,
            level,
        }
    }
}

// A numeric reading of 0 counts as no signal, the same as a missing one.
// NaN is not filtered: deserialized input cannot carry it, only patients
// built in code can.
fn signal(reading: Option<f64>) -> Option<f64> {
    reading.filter(|&value| value != 0.0)
}

/// Produce the alert list for a patient collection.
///
/// Patients are visited in order; per patient, alerts come out as
/// temperature, heart rate, then blood pressure.
pub fn scan(patients: &[Patient]) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for patient in patients {
        let heart_rate = latest(&patient.vitals.heart_rate);
        let temperature = latest(&patient.vitals.temperature);
        let bp = latest(&patient.vitals.blood_pressure);

        if signal(heart_rate).is_none() && signal(temperature).is_none() && bp.is_none() {
            debug!(patient = %patient.id, "no vitals recorded, skipping");
            continue;
        }

        match classify(patient) {
            Status::Critical => critical_alerts(patient, heart_rate, temperature, bp, &mut alerts),
            Status::Watch => watch_alerts(patient, heart_rate, temperature, bp, &mut alerts),
            Status::Stable => {}
        }
    }

    alerts
}

fn critical_alerts(
    patient: &Patient,
    heart_rate: Option<f64>,
    temperature: Option<f64>,
    bp: Option<BloodPressure>,
    alerts: &mut Vec<Alert>,
) {
    // Missing readings compare as 0, so they breach and are reported as missing.
    if temperature_is_critical(temperature.unwrap_or(0.0)) {
        alerts.push(Alert::new(
            patient,
            AlertKind::Temperature,
            temperature.into(),
            Status::Critical,
        ));
    }
    if heart_rate_is_critical(heart_rate.unwrap_or(0.0)) {
        alerts.push(Alert::new(
            patient,
            AlertKind::HeartRate,
            heart_rate.into(),
            Status::Critical,
        ));
    }
    // Any recorded pressure is reported for a critical patient, in range or not.
    if let Some(bp) = bp {
        alerts.push(Alert::new(
            patient,
            AlertKind::BloodPressure,
            bp.into(),
            Status::Critical,
        ));
    }
}

fn watch_alerts(
    patient: &Patient,
    heart_rate: Option<f64>,
    temperature: Option<f64>,
    bp: Option<BloodPressure>,
    alerts: &mut Vec<Alert>,
) {
    let tier = AgeTier::from_age(patient.age);

    if let Some(temperature) = signal(temperature) {
        if ALERT_TEMPERATURE_BAND.excludes(temperature) {
            alerts.push(Alert::new(
                patient,
                AlertKind::Temperature,
                AlertValue::Reading(temperature),
                Status::Watch,
            ));
        }
    }
    if let Some(heart_rate) = signal(heart_rate) {
        if tier.heart_rate_band().excludes(heart_rate) {
            alerts.push(Alert::new(
                patient,
                AlertKind::HeartRate,
                AlertValue::Reading(heart_rate),
                Status::Watch,
            ));
        }
    }
    if let Some(bp) = bp {
        if tier.pressure_out_of_band(bp) {
            alerts.push(Alert::new(
                patient,
                AlertKind::BloodPressure,
                bp.into(),
                Status::Watch,
            ));
        }
    }
}
