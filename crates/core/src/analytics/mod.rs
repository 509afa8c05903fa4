//! Read-only analytics over the record store.
//!
//! [`AnalyticsService`] fetches documents through a [`RecordStore`] and hands them to the pure
//! view builders in the submodules. Every query is a fresh read; nothing is cached between
//! requests.

pub mod appointments;
pub mod dashboard;
pub mod prescriptions;
pub mod summary;
pub mod trends;

use crate::error::{CoreError, CoreResult};
use crate::model::{Doctor, DoctorId, Patient};
use crate::repositories::RecordStore;
use api_shared::{
    AppointmentsByDateRes, AverageActualRes, DoctorAppointments, DoctorListEntry, Episode,
    HealthTrendRes, MonthlyRisk, PatientDashboardRes, PatientListEntry, PrescriptionTrackingRes,
    RecommendationsRes, RiskWeightageRes, TotalCountsRes,
};
use appointments::Window;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use vitals_types::{PatientId, ReportDate};

/// Source of "now" for the year and month windows.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Query entry point shared by the REST handlers and the CLI.
#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn RecordStore>,
    clock: Clock,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_clock(store, Arc::new(Utc::now))
    }

    /// Build a service with a fixed or simulated clock.
    pub fn with_clock(store: Arc<dyn RecordStore>, clock: Clock) -> Self {
        Self { store, clock }
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    async fn patient(&self, id: PatientId) -> CoreResult<Patient> {
        self.store
            .find_patient(id)
            .await?
            .ok_or(CoreError::PatientNotFound)
    }

    /// Look each distinct doctor id up once.
    async fn directory(&self, meetings: &[DoctorId]) -> CoreResult<HashMap<DoctorId, Doctor>> {
        let mut directory = HashMap::new();
        let mut missing = Vec::new();
        for id in meetings {
            if directory.contains_key(id) || missing.contains(id) {
                continue;
            }
            match self.store.find_doctor(id).await? {
                Some(doctor) => {
                    directory.insert(id.clone(), doctor);
                }
                None => {
                    tracing::debug!(doctor_id = %id, "meeting references unknown doctor");
                    missing.push(id.clone());
                }
            }
        }
        Ok(directory)
    }

    async fn appointments_in(&self, window: &Window) -> CoreResult<Vec<DoctorAppointments>> {
        let patients = self.store.patients().await?;
        let meetings = appointments::meetings_in_window(&patients, window);
        let directory = self.directory(&meetings).await?;
        Ok(appointments::tally(&meetings, &directory))
    }

    pub async fn total_counts(&self) -> CoreResult<TotalCountsRes> {
        let total_patients = self.store.count_patients().await?;
        let patients = self.store.patients().await?;
        Ok(summary::total_counts(total_patients, &patients, self.now()))
    }

    pub async fn patients_list(&self) -> CoreResult<Vec<PatientListEntry>> {
        let patients = self.store.patients().await?;
        Ok(summary::patients_list(&patients))
    }

    pub async fn doctors_list(&self) -> CoreResult<Vec<DoctorListEntry>> {
        let doctors = self.store.doctors().await?;
        Ok(summary::doctors_list(&doctors))
    }

    /// Appointment counts per doctor for one calendar day.
    pub async fn appointments_by_date(&self, date: ReportDate) -> CoreResult<AppointmentsByDateRes> {
        let counts = self.appointments_in(&Window::day(date.date())).await?;
        Ok(appointments::by_date(counts))
    }

    /// Appointment counts per doctor for the current calendar month.
    pub async fn monthly_reports(&self) -> CoreResult<Vec<DoctorAppointments>> {
        let window = Window::month_of(self.now());
        let counts = self.appointments_in(&window).await?;
        Ok(appointments::monthly(counts))
    }

    pub async fn patient_dashboard(&self, id: PatientId) -> CoreResult<PatientDashboardRes> {
        let patient = self.patient(id).await?;
        dashboard::patient_dashboard(id, &patient)
    }

    pub async fn dashboard_risk(&self, id: PatientId) -> CoreResult<Vec<MonthlyRisk>> {
        let patient = self.patient(id).await?;
        Ok(trends::monthly_risk(&patient))
    }

    pub async fn health_trend(&self, id: PatientId) -> CoreResult<HealthTrendRes> {
        let patient = self.patient(id).await?;
        Ok(trends::health_trend(&patient))
    }

    pub async fn average_actual(&self, id: PatientId) -> CoreResult<AverageActualRes> {
        let patient = self.patient(id).await?;
        dashboard::average_actual(&patient)
    }

    pub async fn risk_weightage(&self, id: PatientId) -> CoreResult<RiskWeightageRes> {
        let patient = self.patient(id).await?;
        dashboard::risk_weightage(&patient)
    }

    pub async fn recommendations(&self, id: PatientId) -> CoreResult<RecommendationsRes> {
        let patient = self.patient(id).await?;
        dashboard::recommendations(&patient)
    }

    pub async fn episodes(&self, id: PatientId) -> CoreResult<Vec<Episode>> {
        let patient = self.patient(id).await?;
        dashboard::episodes(&patient)
    }

    pub async fn prescription_tracking(&self, id: PatientId) -> CoreResult<PrescriptionTrackingRes> {
        let patient = self.patient(id).await?;
        prescriptions::prescription_tracking(&patient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::MemoryStore;
    use chrono::TimeZone;

    const FIXTURE: &str = r#"{
        "patients": [
            {"patientid": 1, "name": "Asha", "gender": "F", "registered_at": "2024-03-01",
             "medications": {
                "m1": {"time": "2024-05-01T09:00:00Z", "riskrate": 30, "heartrate": "72 bpm",
                       "meeting_details": {"doctor_id": 7, "meeting_datetime": "2024-05-01T09:00:00"}},
                "m2": {"time": "2024-05-09T09:00:00Z", "riskrate": 50,
                       "meeting_details": {"doctor_id": 8, "meeting_datetime": "2024-05-09T09:00:00"}}
             }},
            {"patientid": 2, "name": "Bo", "gender": "M",
             "medications": {
                "m1": {"time": "2024-05-01T11:00:00Z", "riskrate": 90,
                       "meeting_details": {"doctor_id": 7, "meeting_datetime": "2024-05-01T11:00:00"}}
             }},
            {"patientid": 3, "name": "Cy"}
        ],
        "doctors": [
            {"doctor_id": 7, "name": "Dr Seven", "specialisation": "Cardiology"},
            {"doctor_id": 8, "name": "Dr Eight", "specialisation": "Dermatology"}
        ]
    }"#;

    fn service() -> AnalyticsService {
        let store = MemoryStore::from_json_str(FIXTURE).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        AnalyticsService::with_clock(Arc::new(store), Arc::new(move || now))
    }

    #[tokio::test]
    async fn total_counts_reads_whole_population() {
        let counts = service().total_counts().await.unwrap();
        assert_eq!(counts.total_patients, 3);
        assert_eq!(counts.total_appointments, 3);
        assert_eq!(counts.new_patients, 1);
        assert_eq!(counts.risk_summary.mid_risk, 1);
        assert_eq!(counts.risk_summary.high_risk, 1);
    }

    #[tokio::test]
    async fn appointments_resolve_doctors() {
        let service = service();
        let date = ReportDate::parse("2024-05-01").unwrap();
        match service.appointments_by_date(date).await.unwrap() {
            AppointmentsByDateRes::Doctors(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].doctor_name, "Dr Seven");
                assert_eq!(rows[0].appointment_count, 2);
            }
            other => panic!("expected doctor rows, got {other:?}"),
        }

        let monthly = service.monthly_reports().await.unwrap();
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].doctor_name, "Dr Seven");
        assert_eq!(monthly[1].doctor_name, "Dr Eight");
        assert_eq!(monthly[1].appointment_count, 1);
    }

    #[tokio::test]
    async fn unknown_patient_is_not_found() {
        let err = service().episodes(PatientId::new(404)).await.unwrap_err();
        assert!(matches!(err, CoreError::PatientNotFound));
    }

    #[tokio::test]
    async fn patient_without_readings_is_reported() {
        let service = service();
        let id = PatientId::new(3);
        assert!(matches!(
            service.patient_dashboard(id).await,
            Err(CoreError::NoMedicationRecords)
        ));
        assert!(matches!(service.episodes(id).await, Err(CoreError::NoReadings)));
        // Trend views still answer with empty months.
        let risk = service.dashboard_risk(id).await.unwrap();
        assert!(risk.iter().all(|m| m.average_riskrate.is_none()));
    }

    #[tokio::test]
    async fn per_patient_views_use_the_requested_patient() {
        let service = service();
        let id = PatientId::new(1);

        let dashboard = service.patient_dashboard(id).await.unwrap();
        assert_eq!(dashboard.name.as_deref(), Some("Asha"));

        let risk = service.dashboard_risk(id).await.unwrap();
        assert_eq!(risk[4].month, "May");
        assert_eq!(risk[4].average_riskrate, Some(40.0));

        let trend = service.health_trend(id).await.unwrap();
        assert_eq!(trend.get("May").unwrap().heartrate, Some(72.0));

        let episodes = service.episodes(id).await.unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].time.as_deref(), Some("2024-05-09T09:00:00Z"));

        let tracking = service.prescription_tracking(id).await.unwrap();
        assert_eq!(tracking.len(), 2);
    }
}
