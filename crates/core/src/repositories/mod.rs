//! Record store access.
//!
//! The analytics layer only ever needs a handful of exact-match reads, captured by the
//! [`RecordStore`] trait. Backends:
//!
//! - [`mongo::MongoStore`]: the production MongoDB collections
//! - [`memory::MemoryStore`]: in-process documents for tests and local demos

pub mod memory;
pub mod mongo;

use crate::config::StoreConfig;
use crate::error::CoreResult;
use crate::model::{Doctor, DoctorId, Patient};
use std::sync::Arc;
use vitals_types::PatientId;

/// Read-only access to patient and doctor documents.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Number of patient documents.
    async fn count_patients(&self) -> CoreResult<u64>;

    /// Every patient document.
    async fn patients(&self) -> CoreResult<Vec<Patient>>;

    /// The patient whose external `patientid` equals `id`.
    async fn find_patient(&self, id: PatientId) -> CoreResult<Option<Patient>>;

    /// Every doctor document.
    async fn doctors(&self) -> CoreResult<Vec<Doctor>>;

    /// The doctor whose `doctor_id` equals `id`.
    async fn find_doctor(&self, id: &DoctorId) -> CoreResult<Option<Doctor>>;
}

/// Open the configured store.
///
/// Intended to run once at startup; the returned handle is shared by every request.
///
/// # Errors
/// Returns a `CoreError` if the MongoDB client cannot be created or the fixture file cannot be
/// read or parsed.
pub async fn connect(cfg: &StoreConfig) -> CoreResult<Arc<dyn RecordStore>> {
    match cfg {
        StoreConfig::Mongo(mongo_cfg) => {
            let store = mongo::MongoStore::connect(mongo_cfg).await?;
            Ok(Arc::new(store))
        }
        StoreConfig::Memory { fixture } => {
            let store = match fixture {
                Some(path) => memory::MemoryStore::from_fixture(path)?,
                None => memory::MemoryStore::default(),
            };
            tracing::info!(
                patients = store.patient_count(),
                "using in-memory record store"
            );
            Ok(Arc::new(store))
        }
    }
}
