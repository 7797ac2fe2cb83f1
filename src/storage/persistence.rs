use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

use super::{PatientRepository, StorageError};
use crate::patient::{Patient, PatientId};

/// On-disk layout of the patient store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PatientDocument {
    #[serde(default)]
    patients: Vec<Patient>,
}

/// Patient store backed by a single JSON file
///
/// The whole document is loaded when the store is opened and cached in
/// memory. Every update rewrites the file.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    document: RwLock<PatientDocument>,
}

impl JsonFileRepository {
    /// Open the store at `path`, creating an empty one if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let document = if path.exists() {
            let content =
                fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;
            serde_json::from_str(&content).map_err(StorageError::Deserialization)?
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
            let document = PatientDocument::default();
            write_document(&path, &document)?;
            info!(path = %path.display(), "created empty patient store");
            document
        };

        info!(
            path = %path.display(),
            patients = document.patients.len(),
            "opened patient store"
        );

        Ok(JsonFileRepository {
            path,
            document: RwLock::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PatientRepository for JsonFileRepository {
    fn list_patients(&self) -> Result<Vec<Patient>, StorageError> {
        let document = self.document.read().map_err(|_| StorageError::Poisoned)?;
        Ok(document.patients.clone())
    }

    fn get_patient(&self, id: &PatientId) -> Result<Patient, StorageError> {
        let document = self.document.read().map_err(|_| StorageError::Poisoned)?;
        document
            .patients
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.clone()))
    }

    fn update_patient(&self, patient: Patient) -> Result<Patient, StorageError> {
        let mut document = self.document.write().map_err(|_| StorageError::Poisoned)?;
        let index = document
            .patients
            .iter()
            .position(|p| p.id == patient.id)
            .ok_or_else(|| StorageError::NotFound(patient.id.clone()))?;

        let previous = std::mem::replace(&mut document.patients[index], patient.clone());
        if let Err(err) = write_document(&self.path, &document) {
            // Keep memory and disk in agreement.
            document.patients[index] = previous;
            return Err(err);
        }

        debug!(patient = %patient.id, "patient updated");
        Ok(patient)
    }
}

fn write_document(path: &Path, document: &PatientDocument) -> Result<(), StorageError> {
    let serialized =
        serde_json::to_vec_pretty(document).map_err(StorageError::Serialization)?;

    // Write to a temporary file first
    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path).map_err(|e| StorageError::io(&temp_path, e))?;
    file.write_all(&serialized)
        .map_err(|e| StorageError::io(&temp_path, e))?;
    file.sync_all().map_err(|e| StorageError::io(&temp_path, e))?;

    // Rename temp file to final name (atomic on most filesystems)
    fs::rename(&temp_path, path).map_err(|e| StorageError::io(path, e))?;

    Ok(())
}
