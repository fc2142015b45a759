use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Patient, VitalSigns};
use crate::store::{PatientStore, StoreError};

/// In-memory record store. Keeps insertion order so monitoring cycles walk
/// patients in a stable sequence.
#[derive(Debug, Default)]
pub struct MemoryPatientStore {
    patients: RwLock<Vec<Patient>>,
}

impl MemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, stamping `created_at`/`updated_at`.
    pub async fn add_patient(&self, mut patient: Patient) -> Uuid {
        let now = Utc::now();
        patient.created_at = now;
        patient.updated_at = now;
        let id = patient.id;
        self.patients.write().await.push(patient);
        id
    }

    pub async fn get_patient(&self, id: Uuid) -> Option<Patient> {
        self.patients
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.patients.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.patients.read().await.is_empty()
    }
}

#[async_trait]
impl PatientStore for MemoryPatientStore {
    async fn list_patients(&self) -> Result<Vec<Patient>, StoreError> {
        Ok(self.patients.read().await.clone())
    }

    async fn update_vitals(&self, id: Uuid, vitals: &VitalSigns) -> Result<(), StoreError> {
        let mut patients = self.patients.write().await;
        let patient = patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        patient.vitals = Some(*vitals);
        patient.updated_at = Utc::now();
        Ok(())
    }

    async fn count_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let count = self
            .patients
            .read()
            .await
            .iter()
            .filter(|p| p.created_at >= start && p.created_at < end)
            .count();
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_patient;
    use chrono::Duration;

    #[tokio::test]
    async fn update_vitals_touches_only_the_target_record() {
        let store = MemoryPatientStore::new();
        let first = store.add_patient(sample_patient("Orlova", "Maria")).await;
        let second = store.add_patient(sample_patient("Sokolov", "Pavel")).await;

        let vitals = VitalSigns {
            temperature: 36.6,
            systolic: 120,
            diastolic: 80,
            pulse: 70,
        };
        store.update_vitals(first, &vitals).await.unwrap();

        assert_eq!(store.get_patient(first).await.unwrap().vitals, Some(vitals));
        assert_eq!(store.get_patient(second).await.unwrap().vitals, None);
    }

    #[tokio::test]
    async fn update_vitals_unknown_id_is_not_found() {
        let store = MemoryPatientStore::new();
        let vitals = VitalSigns {
            temperature: 36.6,
            systolic: 120,
            diastolic: 80,
            pulse: 70,
        };
        let err = store.update_vitals(Uuid::new_v4(), &vitals).await;
        assert!(matches!(err, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_patients_preserves_insertion_order() {
        let store = MemoryPatientStore::new();
        store.add_patient(sample_patient("Orlova", "Maria")).await;
        store.add_patient(sample_patient("Sokolov", "Pavel")).await;
        store.add_patient(sample_patient("Ivanova", "Anna")).await;

        let names: Vec<String> = store
            .list_patients()
            .await
            .unwrap()
            .iter()
            .map(|p| p.last_name.clone())
            .collect();
        assert_eq!(names, ["Orlova", "Sokolov", "Ivanova"]);
    }

    #[tokio::test]
    async fn count_created_between_is_half_open() {
        let store = MemoryPatientStore::new();
        let id = store.add_patient(sample_patient("Orlova", "Maria")).await;
        let created = store.get_patient(id).await.unwrap().created_at;

        let counted = store
            .count_created_between(created, created + Duration::seconds(1))
            .await
            .unwrap();
        assert_eq!(counted, 1);

        // created_at exactly at the end bound is excluded
        let excluded = store
            .count_created_between(created - Duration::seconds(1), created)
            .await
            .unwrap();
        assert_eq!(excluded, 0);
    }
}
