//! Risk classification and deviation scoring.

use crate::constants::{
    HEALTHY_HEART_RATE, HEALTHY_SPO2_MIN, HEALTHY_SYSTOLIC, LOW_RISK_MAX, MID_RISK_MAX,
};
use crate::normalize::round2;

/// Low/mid/high classification of a 0-100 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBucket {
    Low,
    Mid,
    High,
}

impl RiskBucket {
    pub fn classify(risk: i64) -> Self {
        if risk <= LOW_RISK_MAX {
            RiskBucket::Low
        } else if risk <= MID_RISK_MAX {
            RiskBucket::Mid
        } else {
            RiskBucket::High
        }
    }
}

/// Percentage deviation of `value` from the nearer edge of `[low, high]`, or 0 inside it.
fn band_risk(value: f64, low: f64, high: f64) -> f64 {
    if (low..=high).contains(&value) {
        0.0
    } else if value < low {
        round2((low - value) / low * 100.0)
    } else {
        round2((value - high) / high * 100.0)
    }
}

/// Heart rate risk percentage against the 60-100 bpm band.
pub fn calc_hr_risk(heart_rate: f64) -> f64 {
    band_risk(heart_rate, HEALTHY_HEART_RATE.0, HEALTHY_HEART_RATE.1)
}

/// SpO2 risk percentage. Only a shortfall below 95% counts.
pub fn calc_spo2_risk(spo2: f64) -> f64 {
    if spo2 >= HEALTHY_SPO2_MIN {
        0.0
    } else {
        round2((HEALTHY_SPO2_MIN - spo2) / HEALTHY_SPO2_MIN * 100.0)
    }
}

/// Systolic blood pressure risk percentage against the 90-120 band.
pub fn calc_bp_risk(systolic: f64) -> f64 {
    band_risk(systolic, HEALTHY_SYSTOLIC.0, HEALTHY_SYSTOLIC.1)
}
