//! Constants used throughout the vitals core crate.
//!
//! Clinical thresholds live here so every endpoint buckets and scores against the same numbers.

/// Highest risk score classed as low risk.
pub const LOW_RISK_MAX: i64 = 45;

/// Highest risk score classed as mid risk. Anything above is high risk.
pub const MID_RISK_MAX: i64 = 75;

/// Healthy resting heart rate band, in bpm.
pub const HEALTHY_HEART_RATE: (f64, f64) = (60.0, 100.0);

/// Lowest healthy oxygen saturation, in percent.
pub const HEALTHY_SPO2_MIN: f64 = 95.0;

/// Healthy systolic blood pressure band, in mmHg.
pub const HEALTHY_SYSTOLIC: (f64, f64) = (90.0, 120.0);

/// Reference heart rate shown next to a patient's actual value (midpoint of 60-100).
pub const REFERENCE_HEART_RATE: u32 = 80;

/// Reference SpO2 shown next to a patient's actual value (midpoint of 95-100).
pub const REFERENCE_SPO2: f64 = 97.5;

/// Reference blood pressure shown next to a patient's actual value.
pub const REFERENCE_BLOOD_PRESSURE: &str = "120/80";

/// Day keys of a 7-day plan, in order.
pub const PLAN_DAYS: [&str; 7] = ["DAY1", "DAY2", "DAY3", "DAY4", "DAY5", "DAY6", "DAY7"];

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returned instead of an empty list when a day has no appointments.
pub const NO_APPOINTMENTS_MESSAGE: &str = "No doctor appointments found for this date.";

/// Default collection holding patient documents.
pub const DEFAULT_PATIENTS_COLLECTION: &str = "patients";

/// Default collection holding doctor documents.
pub const DEFAULT_DOCTORS_COLLECTION: &str = "doctors";
