//! Day-by-day prescription tracking.

use crate::constants::PLAN_DAYS;
use crate::error::{CoreError, CoreResult};
use crate::model::Patient;
use api_shared::{DayPlan, DayPrescription, PrescriptionTrackingRes};
use std::collections::BTreeMap;

fn day_entry(plan: Option<&DayPlan>, day: &str) -> Option<serde_json::Value> {
    plan.and_then(|plan| plan.get(day)).cloned()
}

/// Reshape every reading's diet, exercise and routine plans into one record per day.
///
/// Missing plans or days yield `null` fields.
pub fn prescription_tracking(patient: &Patient) -> CoreResult<PrescriptionTrackingRes> {
    if patient.medications.is_empty() {
        return Err(CoreError::NoReadings);
    }

    Ok(patient
        .medications
        .iter()
        .map(|(key, reading)| {
            let days: BTreeMap<String, DayPrescription> = PLAN_DAYS
                .iter()
                .map(|day| {
                    let prescription = DayPrescription {
                        diet: day_entry(reading.diet_plan.as_ref(), day),
                        exercise: day_entry(reading.exercise_plan.as_ref(), day),
                        routine: day_entry(reading.routine_plan.as_ref(), day),
                    };
                    ((*day).to_string(), prescription)
                })
                .collect();
            (key.clone(), days)
        })
        .collect())
}
