//! Patient record store interface.
//!
//! The canonical record set lives in an external store; the monitoring
//! scheduler and the statistics service only see this trait. The bundled
//! in-memory implementation backs the demo binary and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Patient, VitalSigns};

pub mod memory;

pub use memory::MemoryPatientStore;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("patient not found: {0}")]
    NotFound(Uuid),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Access to the patient record set.
///
/// `list_patients` returns records in a stable retrieval order;
/// `update_vitals` is a scoped partial update that only touches the vitals
/// snapshot and the `updated_at` stamp.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Full scan of the record set.
    async fn list_patients(&self) -> Result<Vec<Patient>, StoreError>;

    /// Overwrite one record's vitals snapshot.
    async fn update_vitals(&self, id: Uuid, vitals: &VitalSigns) -> Result<(), StoreError>;

    /// Count records whose `created_at` falls in the half-open range
    /// `[start, end)`.
    async fn count_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, StoreError>;
}
