use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vitalwatch::{scan, BloodPressure, Patient, PatientId, VitalsBundle};

fn ward(size: usize) -> Vec<Patient> {
    (0..size)
        .map(|i| {
            let offset = (i % 40) as f64;
            Patient {
                id: PatientId::new(i.to_string()),
                name: format!("Patient {}", i),
                age: (i % 90) as u32,
                vitals: VitalsBundle {
                    heart_rate: vec![60.0 + offset, 55.0 + offset * 3.0],
                    temperature: vec![36.5, 36.0 + offset / 10.0],
                    blood_pressure: vec![BloodPressure::new(110.0 + offset * 2.0, 60.0 + offset)],
                },
            }
        })
        .collect()
}

fn bench_scan(c: &mut Criterion) {
    let patients = ward(1_000);
    c.bench_function("scan 1000 patients", |b| b.iter(|| scan(black_box(&patients))));
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
