//! Month-of-year trends for one patient.
//!
//! Readings are bucketed by calendar month only; the year is discarded, so January 2023 and
//! January 2024 share a bucket. Output always covers all twelve months in calendar order.

use crate::constants::MONTH_NAMES;
use crate::model::Patient;
use crate::normalize::{mean2, parse_blood_pressure, parse_measurement, reading_time};
use api_shared::{HealthTrendRes, MonthlyRisk, MonthlyVitals};
use chrono::Datelike;

#[derive(Default)]
struct VitalSamples {
    heartrate: Vec<f64>,
    spo2: Vec<f64>,
    stress: Vec<f64>,
    systolic: Vec<f64>,
    diastolic: Vec<f64>,
}

/// Average risk per calendar month, `None` for months without a scored reading.
///
/// Stored fractions are kept; only the average is rounded.
pub fn monthly_risk(patient: &Patient) -> Vec<MonthlyRisk> {
    let mut buckets: [Vec<f64>; 12] = Default::default();

    for reading in patient.medications.values() {
        let Some(risk) = reading.riskrate.as_ref().and_then(parse_measurement) else {
            continue;
        };
        let Some(time) = reading_time(reading) else {
            continue;
        };
        buckets[time.month0() as usize].push(risk);
    }

    MONTH_NAMES
        .iter()
        .zip(buckets.iter())
        .map(|(month, risks)| MonthlyRisk {
            month: (*month).to_string(),
            average_riskrate: mean2(risks),
        })
        .collect()
}

/// Average heart rate, SpO2, stress and blood pressure per calendar month.
pub fn health_trend(patient: &Patient) -> HealthTrendRes {
    let mut buckets: [VitalSamples; 12] = Default::default();

    for reading in patient.medications.values() {
        let Some(time) = reading_time(reading) else {
            continue;
        };
        let samples = &mut buckets[time.month0() as usize];

        if let Some(v) = reading.heartrate.as_ref().and_then(parse_measurement) {
            samples.heartrate.push(v);
        }
        if let Some(v) = reading.spo2.as_ref().and_then(parse_measurement) {
            samples.spo2.push(v);
        }
        if let Some(v) = reading.stress.as_ref().and_then(parse_measurement) {
            samples.stress.push(v);
        }
        if let Some((systolic, diastolic)) = reading.bp.as_ref().and_then(parse_blood_pressure) {
            samples.systolic.push(systolic);
            samples.diastolic.push(diastolic);
        }
    }

    let months = MONTH_NAMES
        .iter()
        .zip(buckets.iter())
        .map(|(month, samples)| {
            let vitals = MonthlyVitals {
                heartrate: mean2(&samples.heartrate),
                spo2: mean2(&samples.spo2),
                stress: mean2(&samples.stress),
                systolic: mean2(&samples.systolic),
                diastolic: mean2(&samples.diastolic),
            };
            ((*month).to_string(), vitals)
        })
        .collect();

    HealthTrendRes { months }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patient() -> Patient {
        serde_json::from_value(json!({
            "patientid": 3,
            "medications": {
                "a": {"time": "2024-01-10T08:00:00Z", "riskrate": 40, "heartrate": "70 bpm",
                       "SpO2": "97%", "Stress": 2, "bp": "120/80"},
                "b": {"time": "2023-01-20T08:00:00", "riskrate": 45, "heartrate": 75,
                       "SpO2": 95, "Stress": "4", "bp": "130/85"},
                "c": {"time": "2024-03-03T08:00:00Z", "riskrate": 90, "heartrate": "fast",
                       "bp": "high"},
                "d": {"time": "not a time", "riskrate": 10, "heartrate": 200},
                "e": {"time": "2024-03-04T08:00:00Z", "riskrate": "n/a"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn risk_always_has_twelve_months_in_order() {
        let months = monthly_risk(&patient());
        assert_eq!(months.len(), 12);
        let names: Vec<_> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(names, MONTH_NAMES.to_vec());

        let empty = monthly_risk(&Patient::default());
        assert_eq!(empty.len(), 12);
        assert!(empty.iter().all(|m| m.average_riskrate.is_none()));
    }

    #[test]
    fn risk_merges_years_and_skips_unusable_readings() {
        let months = monthly_risk(&patient());
        assert_eq!(months[0].average_riskrate, Some(42.5));
        assert_eq!(months[1].average_riskrate, None);
        assert_eq!(months[2].average_riskrate, Some(90.0));
    }

    #[test]
    fn risk_average_keeps_fractional_scores() {
        let patient: Patient = serde_json::from_value(json!({
            "patientid": 4,
            "medications": {
                "a": {"time": "2024-01-05T08:00:00Z", "riskrate": 76.4},
                "b": {"time": "2024-01-25T08:00:00Z", "riskrate": 76.4},
                "c": {"time": "2024-02-01T08:00:00Z", "riskrate": 10.5},
                "d": {"time": "2024-02-02T08:00:00Z", "riskrate": 11}
            }
        }))
        .unwrap();

        let months = monthly_risk(&patient);
        assert_eq!(months[0].average_riskrate, Some(76.4));
        assert_eq!(months[1].average_riskrate, Some(10.75));
    }

    #[test]
    fn trend_averages_each_vital_independently() {
        let trend = health_trend(&patient());
        assert_eq!(trend.months.len(), 12);

        let january = trend.get("January").unwrap();
        assert_eq!(january.heartrate, Some(72.5));
        assert_eq!(january.spo2, Some(96.0));
        assert_eq!(january.stress, Some(3.0));
        assert_eq!(january.systolic, Some(125.0));
        assert_eq!(january.diastolic, Some(82.5));

        let march = trend.get("March").unwrap();
        assert_eq!(march.heartrate, None);
        assert_eq!(march.systolic, None);

        assert_eq!(trend.get("July").unwrap(), &MonthlyVitals::default());
    }
}
