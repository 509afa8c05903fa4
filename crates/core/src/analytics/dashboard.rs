//! Single-patient snapshot views.
//!
//! Two notions of "latest reading" are in use here and they are deliberately not unified:
//!
//! | view | latest reading |
//! |---|---|
//! | [`patient_dashboard`], [`risk_weightage`] | greatest parsed `time` |
//! | [`average_actual`], [`recommendations`] | greatest map key |
//!
//! Dashboards built against each endpoint depend on its current choice.

use crate::constants::{REFERENCE_BLOOD_PRESSURE, REFERENCE_HEART_RATE, REFERENCE_SPO2};
use crate::error::{CoreError, CoreResult};
use crate::model::{Patient, Reading};
use crate::normalize::{latest_by_key, latest_by_time, parse_measurement};
use crate::risk::{calc_bp_risk, calc_hr_risk, calc_spo2_risk};
use api_shared::{
    ActualVitals, AverageActualRes, Episode, HealthyVitals, PatientDashboardRes,
    RecommendationsRes, RiskPercent, RiskWeightageRes,
};
use vitals_types::{Measurement, PatientId};

fn require_readings(patient: &Patient) -> CoreResult<()> {
    if patient.medications.is_empty() {
        return Err(CoreError::NoReadings);
    }
    Ok(())
}

fn latest_timed(patient: &Patient) -> CoreResult<&Reading> {
    require_readings(patient)?;
    latest_by_time(patient.medications.values())
        .map(|(_, reading)| reading)
        .ok_or(CoreError::NoValidTimestamps)
}

fn latest_keyed(patient: &Patient) -> CoreResult<&Reading> {
    latest_by_key(&patient.medications)
        .map(|(_, reading)| reading)
        .ok_or(CoreError::NoReadings)
}

fn number(value: Option<&Measurement>) -> Option<f64> {
    value.and_then(parse_measurement)
}

/// Identity plus the vitals of the latest reading by time, as stored.
pub fn patient_dashboard(id: PatientId, patient: &Patient) -> CoreResult<PatientDashboardRes> {
    if patient.medications.is_empty() {
        return Err(CoreError::NoMedicationRecords);
    }
    let latest = latest_timed(patient)?;

    Ok(PatientDashboardRes {
        patientid: patient.patientid.unwrap_or(id.value()),
        name: patient.name.clone(),
        gender: patient.gender.clone(),
        bp: latest.bp.clone(),
        age: latest.age.clone(),
        heartrate: latest.heartrate.clone(),
        spo2: latest.spo2.clone(),
        stress: latest.stress.clone(),
        respiratory_rate: latest.respiratory_rate.clone(),
        riskrate: latest.riskrate.clone(),
    })
}

/// The latest-by-key reading next to healthy reference values.
pub fn average_actual(patient: &Patient) -> CoreResult<AverageActualRes> {
    let latest = latest_keyed(patient)?;

    Ok(AverageActualRes {
        actual: ActualVitals {
            heartrate: number(latest.heartrate.as_ref()),
            spo2: number(latest.spo2.as_ref()),
            bp: latest.bp.clone(),
        },
        average: HealthyVitals {
            heartrate: REFERENCE_HEART_RATE,
            spo2: REFERENCE_SPO2,
            bp: REFERENCE_BLOOD_PRESSURE.into(),
        },
    })
}

/// Deviation-from-healthy percentages for the latest reading by time.
///
/// A vital that is missing or unreadable scores `null` rather than 0.
pub fn risk_weightage(patient: &Patient) -> CoreResult<RiskWeightageRes> {
    let latest = latest_timed(patient)?;

    Ok(RiskWeightageRes {
        heartrate: RiskPercent {
            risk_percent: number(latest.heartrate.as_ref()).map(calc_hr_risk),
        },
        spo2: RiskPercent {
            risk_percent: number(latest.spo2.as_ref()).map(calc_spo2_risk),
        },
        blood_pressure: RiskPercent {
            risk_percent: number(latest.bp.as_ref()).map(calc_bp_risk),
        },
    })
}

/// The three 7-day plans of the latest-by-key reading, as stored.
pub fn recommendations(patient: &Patient) -> CoreResult<RecommendationsRes> {
    let latest = latest_keyed(patient)?;

    Ok(RecommendationsRes {
        diet_plan: latest.diet_plan.clone(),
        exercise_plan: latest.exercise_plan.clone(),
        routine_plan: latest.routine_plan.clone(),
    })
}

/// Every reading, newest `time` string first, numbered from 1 after sorting.
///
/// Ordering is on the stored text; readings without a time sort last.
pub fn episodes(patient: &Patient) -> CoreResult<Vec<Episode>> {
    require_readings(patient)?;

    let mut readings: Vec<&Reading> = patient.medications.values().collect();
    readings.sort_by(|a, b| b.time.cmp(&a.time));

    Ok(readings
        .into_iter()
        .enumerate()
        .map(|(index, reading)| Episode {
            heartrate: reading.heartrate.clone(),
            spo2: reading.spo2.clone(),
            respiratory_rate: reading.respiratory_rate.clone(),
            bp: reading.bp.clone(),
            riskrate: reading.riskrate.clone(),
            time: reading.time.clone(),
            kind: reading.kind.clone(),
            sno: index + 1,
        })
        .collect())
}
