//! MongoDB-backed record store.
//!
//! Patients and doctors live in two collections of the same database. All reads are exact-match
//! filters with projections; nothing here writes.

use super::RecordStore;
use crate::config::MongoConfig;
use crate::error::CoreResult;
use crate::model::{Doctor, DoctorId, Patient};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{FindOneOptions, FindOptions};
use mongodb::{Client, Collection};
use vitals_types::PatientId;

/// Handle to the patient and doctor collections.
///
/// Cloning is cheap: the underlying client holds a shared connection pool.
#[derive(Clone, Debug)]
pub struct MongoStore {
    patients: Collection<Patient>,
    doctors: Collection<Doctor>,
}

impl MongoStore {
    /// Create the client and resolve both collections.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the first query rather
    /// than here.
    pub async fn connect(cfg: &MongoConfig) -> CoreResult<Self> {
        let client = Client::with_uri_str(cfg.connection_string()).await?;
        let db = client.database(cfg.database());

        tracing::info!(
            database = cfg.database(),
            patients = cfg.patients_collection(),
            doctors = cfg.doctors_collection(),
            "connected MongoDB record store"
        );

        Ok(Self {
            patients: db.collection(cfg.patients_collection()),
            doctors: db.collection(cfg.doctors_collection()),
        })
    }
}

fn patient_projection() -> Document {
    doc! {
        "_id": 0,
        "patientid": 1,
        "name": 1,
        "gender": 1,
        "registered_at": 1,
        "medications": 1,
    }
}

fn doctor_projection() -> Document {
    doc! {
        "_id": 0,
        "doctor_id": 1,
        "name": 1,
        "specialisation": 1,
    }
}

impl From<&DoctorId> for Bson {
    fn from(id: &DoctorId) -> Self {
        match id {
            DoctorId::Number(n) => Bson::Int64(*n),
            DoctorId::Text(s) => Bson::String(s.clone()),
        }
    }
}

#[async_trait::async_trait]
impl RecordStore for MongoStore {
    async fn count_patients(&self) -> CoreResult<u64> {
        Ok(self.patients.count_documents(doc! {}, None).await?)
    }

    async fn patients(&self) -> CoreResult<Vec<Patient>> {
        let options = FindOptions::builder()
            .projection(patient_projection())
            .build();
        let cursor = self.patients.find(doc! {}, options).await?;
        let patients: Vec<Patient> = cursor.try_collect().await?;
        tracing::debug!(count = patients.len(), "fetched patients");
        Ok(patients)
    }

    async fn find_patient(&self, id: PatientId) -> CoreResult<Option<Patient>> {
        let options = FindOneOptions::builder()
            .projection(patient_projection())
            .build();
        Ok(self
            .patients
            .find_one(doc! { "patientid": id.value() }, options)
            .await?)
    }

    async fn doctors(&self) -> CoreResult<Vec<Doctor>> {
        let options = FindOptions::builder()
            .projection(doctor_projection())
            .build();
        let cursor = self.doctors.find(doc! {}, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_doctor(&self, id: &DoctorId) -> CoreResult<Option<Doctor>> {
        let options = FindOneOptions::builder()
            .projection(doctor_projection())
            .build();
        Ok(self
            .doctors
            .find_one(doc! { "doctor_id": Bson::from(id) }, options)
            .await?)
    }
}
