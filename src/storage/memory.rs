use std::sync::RwLock;

use super::{PatientRepository, StorageError};
use crate::patient::{Patient, PatientId};

/// In-memory patient store
#[derive(Debug, Default)]
pub struct MemoryRepository {
    patients: RwLock<Vec<Patient>>,
}

impl MemoryRepository {
    pub fn new(patients: Vec<Patient>) -> Self {
        MemoryRepository {
            patients: RwLock::new(patients),
        }
    }
}

impl PatientRepository for MemoryRepository {
    fn list_patients(&self) -> Result<Vec<Patient>, StorageError> {
        let patients = self.patients.read().map_err(|_| StorageError::Poisoned)?;
        Ok(patients.clone())
    }

    fn get_patient(&self, id: &PatientId) -> Result<Patient, StorageError> {
        let patients = self.patients.read().map_err(|_| StorageError::Poisoned)?;
        patients
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.clone()))
    }

    fn update_patient(&self, patient: Patient) -> Result<Patient, StorageError> {
        let mut patients = self.patients.write().map_err(|_| StorageError::Poisoned)?;
        let slot = patients
            .iter_mut()
            .find(|p| p.id == patient.id)
            .ok_or_else(|| StorageError::NotFound(patient.id.clone()))?;
        *slot = patient.clone();
        Ok(patient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::fixtures::named_patient;

    #[test]
    fn test_update_replaces_in_place() {
        let repo = MemoryRepository::new(vec![
            named_patient("a", 40, &[70.0], &[37.0], &[]),
            named_patient("b", 50, &[75.0], &[36.8], &[]),
        ]);

        let mut b = repo.get_patient(&PatientId::from("b")).unwrap();
        b.age = 51;
        repo.update_patient(b).unwrap();

        let patients = repo.list_patients().unwrap();
        assert_eq!(patients[1].age, 51);
        assert_eq!(patients[0].id.as_str(), "a");
    }

    #[test]
    fn test_update_never_inserts() {
        let repo = MemoryRepository::default();
        let err = repo
            .update_patient(named_patient("x", 40, &[], &[], &[]))
            .unwrap_err();

        assert!(matches!(err, StorageError::NotFound(_)));
        assert!(repo.list_patients().unwrap().is_empty());
    }
}
