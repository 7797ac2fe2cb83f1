//! Dashboard state and the fetch/update flow around it
//!
//! `DashboardState` is the explicit state a monitoring front-end works
//! against: the patient collection, the alert list derived from it, and a
//! loading flag. `Dashboard` owns that state together with the repository
//! and re-runs the alert scan after every mutation of the collection.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{error, info};

use crate::monitoring::{self, Alert, Status};
use crate::patient::{Patient, PatientId};
use crate::storage::{PatientRepository, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("dashboard state lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub patients: Vec<Patient>,
    pub alerts: Vec<Alert>,
    pub loading: bool,
    pub last_scan: Option<DateTime<Utc>>,
}

impl DashboardState {
    /// Rebuild the alert list from the current patient collection.
    pub fn check_alerts(&mut self) {
        self.alerts = monitoring::scan(&self.patients);
        self.last_scan = Some(Utc::now());
    }
}

pub struct Dashboard<R> {
    repository: R,
    state: RwLock<DashboardState>,
    // Held from the repository call until the state is applied, so
    // fetches and updates land in the same order in both places.
    sync: Mutex<()>,
}

impl<R: PatientRepository> Dashboard<R> {
    pub fn new(repository: R) -> Self {
        Dashboard {
            repository,
            state: RwLock::new(DashboardState::default()),
            sync: Mutex::new(()),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Load every patient from the repository and rescan.
    ///
    /// On failure the previous collection and alerts are kept.
    pub fn fetch_patients(&self) -> Result<(), DashboardError> {
        let _sync = self.lock_sync()?;
        self.write_state()?.loading = true;

        let result = self.repository.list_patients();
        let mut state = self.write_state()?;
        state.loading = false;

        match result {
            Ok(patients) => {
                state.patients = patients;
                state.check_alerts();
                info!(
                    patients = state.patients.len(),
                    alerts = state.alerts.len(),
                    "patients fetched"
                );
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to fetch patients");
                Err(err.into())
            }
        }
    }

    /// Write a patient through the repository and return the stored form.
    ///
    /// The local copy is replaced and alerts are rescanned only when the
    /// patient is already part of the loaded collection.
    pub fn update_patient(&self, patient: Patient) -> Result<Patient, DashboardError> {
        let _sync = self.lock_sync()?;
        let stored = self.repository.update_patient(patient).map_err(|err| {
            error!(error = %err, "failed to update patient");
            err
        })?;

        let mut state = self.write_state()?;
        if let Some(index) = state.patients.iter().position(|p| p.id == stored.id) {
            state.patients[index] = stored.clone();
            state.check_alerts();
            info!(
                patient = %stored.id,
                alerts = state.alerts.len(),
                "patient updated"
            );
        }

        Ok(stored)
    }

    /// Rescan the loaded collection without touching the repository.
    pub fn check_alerts(&self) -> Result<(), DashboardError> {
        self.write_state()?.check_alerts();
        Ok(())
    }

    pub fn snapshot(&self) -> Result<DashboardState, DashboardError> {
        Ok(self.read_state()?.clone())
    }

    pub fn patients(&self) -> Result<Vec<Patient>, DashboardError> {
        Ok(self.read_state()?.patients.clone())
    }

    pub fn alerts(&self) -> Result<Vec<Alert>, DashboardError> {
        Ok(self.read_state()?.alerts.clone())
    }

    /// Status of a loaded patient, or `None` if it is not in the collection.
    pub fn status_of(&self, id: &PatientId) -> Result<Option<Status>, DashboardError> {
        Ok(self
            .read_state()?
            .patients
            .iter()
            .find(|p| &p.id == id)
            .map(monitoring::classify))
    }

    fn lock_sync(&self) -> Result<MutexGuard<'_, ()>, DashboardError> {
        self.sync.lock().map_err(|_| DashboardError::Poisoned)
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, DashboardState>, DashboardError> {
        self.state.read().map_err(|_| DashboardError::Poisoned)
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, DashboardState>, DashboardError> {
        self.state.write().map_err(|_| DashboardError::Poisoned)
    }
}
