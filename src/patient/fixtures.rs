use super::{BloodPressure, Patient, PatientId, VitalsBundle};

pub(crate) fn patient(age: u32, heart_rate: &[f64], temperature: &[f64], bp: &[(f64, f64)]) -> Patient {
    named_patient("p-test", age, heart_rate, temperature, bp)
}

pub(crate) fn named_patient(
    id: &str,
    age: u32,
    heart_rate: &[f64],
    temperature: &[f64],
    bp: &[(f64, f64)],
) -> Patient {
    Patient {
        id: PatientId::from(id),
        name: format!("Patient {}", id),
        age,
        vitals: VitalsBundle {
            heart_rate: heart_rate.to_vec(),
            temperature: temperature.to_vec(),
            blood_pressure: bp
                .iter()
                .map(|&(systolic, diastolic)| BloodPressure::new(systolic, diastolic))
                .collect(),
        },
    }
}
