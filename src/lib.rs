//! VitalWatch: patient vital-sign monitoring
//!
//! VitalWatch classifies each patient's clinical status from their latest
//! vital signs and age, and raises alerts when vitals leave age-adjusted
//! bands. The classification and alerting engine lives in `monitoring`;
//! everything around it (storage, dashboard state, HTTP) feeds it data.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod monitoring;
pub mod patient;
pub mod storage;

pub use dashboard::{Dashboard, DashboardError, DashboardState};
pub use error::VitalsError;
pub use monitoring::{classify, latest, scan, Alert, AlertKind, AlertValue, Status};
pub use patient::{BloodPressure, Patient, PatientId, VitalsBundle};
pub use storage::{JsonFileRepository, MemoryRepository, PatientRepository, StorageError};
