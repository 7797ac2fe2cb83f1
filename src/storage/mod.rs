//! Patient storage
//!
//! The monitoring engine never touches storage directly. Patients are loaded
//! and written back through a `PatientRepository`:
//! - `JsonFileRepository`: a flat JSON document on disk
//! - `MemoryRepository`: the same contract held in memory

mod memory;
mod persistence;

pub use memory::MemoryRepository;
pub use persistence::JsonFileRepository;

use crate::patient::{Patient, PatientId};
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("patient not found: {0}")]
    NotFound(PatientId),
    #[error("patient store I/O failed ({path}): {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize patient store: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patient store: {0}")]
    Deserialization(serde_json::Error),
    #[error("patient store lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Source of truth for patient records.
pub trait PatientRepository: Send + Sync {
    fn list_patients(&self) -> Result<Vec<Patient>, StorageError>;

    fn get_patient(&self, id: &PatientId) -> Result<Patient, StorageError>;

    /// Replace the stored patient with the same id and return the stored form.
    ///
    /// Fails with `StorageError::NotFound` for an unknown id; updates never insert.
    fn update_patient(&self, patient: Patient) -> Result<Patient, StorageError>;
}
