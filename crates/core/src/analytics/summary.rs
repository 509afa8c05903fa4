//! Whole-population summaries: headline counts, the patient list and the doctor list.

use crate::model::{Doctor, Patient, Reading};
use crate::normalize::{latest_by_key, latest_by_time, parse_timestamp, risk_value};
use crate::risk::RiskBucket;
use api_shared::{DoctorListEntry, PatientListEntry, RiskSummary, TotalCountsRes};
use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Risk used for the population summary: a missing `riskrate` counts as 0, an unreadable one
/// disqualifies the reading.
fn summary_risk(reading: &Reading) -> Option<i64> {
    match &reading.riskrate {
        Some(value) => risk_value(value),
        None => Some(0),
    }
}

fn year_bounds(now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = Utc.with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0).single()?;
    let end = Utc.with_ymd_and_hms(now.year() + 1, 1, 1, 0, 0, 0).single()?;
    Some((start, end))
}

/// Headline counts for the operations dashboard.
///
/// `total_patients` is the store's own document count. Each patient contributes the risk of
/// their latest reading by parsed time, considering only readings whose risk can be read.
pub fn total_counts(total_patients: u64, patients: &[Patient], now: DateTime<Utc>) -> TotalCountsRes {
    let this_year = year_bounds(now);

    let mut total_appointments = 0u64;
    let mut new_patients = 0u64;
    let mut risk_summary = RiskSummary::default();

    for patient in patients {
        total_appointments += patient.reading_count as u64;

        let registered = patient.registered_at.as_deref().and_then(parse_timestamp);
        if let (Some(registered), Some((start, end))) = (registered, this_year) {
            if start <= registered && registered < end {
                new_patients += 1;
            }
        }

        let scored = patient
            .medications
            .values()
            .filter(|reading| summary_risk(reading).is_some());
        let Some(risk) = latest_by_time(scored).and_then(|(_, reading)| summary_risk(reading))
        else {
            continue;
        };

        match RiskBucket::classify(risk) {
            RiskBucket::Low => risk_summary.low_risk += 1,
            RiskBucket::Mid => risk_summary.mid_risk += 1,
            RiskBucket::High => risk_summary.high_risk += 1,
        }
    }

    TotalCountsRes {
        total_patients,
        total_appointments,
        new_patients,
        risk_summary,
    }
}

/// One row per patient, numbered from 1.
///
/// "Last updated" is the reading under the greatest map key, not the latest by time.
pub fn patients_list(patients: &[Patient]) -> Vec<PatientListEntry> {
    patients
        .iter()
        .enumerate()
        .map(|(index, patient)| {
            let last = latest_by_key(&patient.medications).map(|(_, reading)| reading);
            PatientListEntry {
                si_no: index + 1,
                patient_id: patient
                    .patientid
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
                name: patient.name.clone().unwrap_or_default(),
                gender: patient.gender.clone().unwrap_or_default(),
                last_updated: last.and_then(|r| r.time.clone()),
                risk_score: last.and_then(|r| r.riskrate.clone()),
            }
        })
        .collect()
}

pub fn doctors_list(doctors: &[Doctor]) -> Vec<DoctorListEntry> {
    doctors
        .iter()
        .map(|doctor| DoctorListEntry {
            name: doctor.name.clone(),
            specialisation: doctor.specialisation.clone(),
        })
        .collect()
}
