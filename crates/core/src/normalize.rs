//! Timestamp and measurement normalisation.
//!
//! Everything here is total: malformed input yields `None` so aggregation loops can skip the
//! offending reading and carry on. Nothing in this module returns an error.

use crate::model::Reading;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::BTreeMap;
use vitals_types::Measurement;

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a timestamp and normalises it to UTC.
///
/// Accepts RFC 3339 (`Z` or an offset), offsets without a colon, naive date-times and bare
/// dates. Naive values are taken to already be UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parses the `time` of a reading, if present and well-formed.
pub fn reading_time(reading: &Reading) -> Option<DateTime<Utc>> {
    reading.time.as_deref().and_then(parse_timestamp)
}

/// Interprets a stored measurement as a single number.
///
/// Unit suffixes (`bpm`, `%`) are stripped. For a composite such as `"120/80"` only the first
/// component is used.
pub fn parse_measurement(value: &Measurement) -> Option<f64> {
    let parsed = match value {
        Measurement::Integer(v) => *v as f64,
        Measurement::Real(v) => *v,
        Measurement::Text(s) => {
            let cleaned = s.replace('%', "").replace("bpm", "");
            let first = cleaned.split('/').next().unwrap_or_default();
            first.trim().parse::<f64>().ok()?
        }
    };
    parsed.is_finite().then_some(parsed)
}

/// Splits a `"systolic/diastolic"` reading into both components.
///
/// Both sides must be integers; anything else yields `None` for the pair.
pub fn parse_blood_pressure(value: &Measurement) -> Option<(f64, f64)> {
    let text = value.as_text()?;
    let (systolic, diastolic) = text.split_once('/')?;
    let systolic = systolic.trim().parse::<i64>().ok()?;
    let diastolic = diastolic.trim().parse::<i64>().ok()?;
    Some((systolic as f64, diastolic as f64))
}

/// Interprets a stored risk score as an integer.
///
/// Reals are truncated towards zero; text must hold an integer.
pub fn risk_value(value: &Measurement) -> Option<i64> {
    match value {
        Measurement::Integer(v) => Some(*v),
        Measurement::Real(v) if v.is_finite() => Some(v.trunc() as i64),
        Measurement::Real(_) => None,
        Measurement::Text(s) => s.trim().parse::<i64>().ok(),
    }
}

/// Selects the reading with the latest parseable `time`.
///
/// Ties go to the reading seen last. Readings without a parseable time are ignored; if none
/// remain there is no latest reading.
pub fn latest_by_time<'a, I>(readings: I) -> Option<(DateTime<Utc>, &'a Reading)>
where
    I: IntoIterator<Item = &'a Reading>,
{
    readings
        .into_iter()
        .filter_map(|reading| reading_time(reading).map(|time| (time, reading)))
        .fold(None, |latest, (time, reading)| match latest {
            Some((best, _)) if time < best => latest,
            _ => Some((time, reading)),
        })
}

/// Selects the reading stored under the lexicographically greatest key.
///
/// This ignores `time` entirely. See [`latest_by_time`] for the chronological rule.
pub fn latest_by_key(readings: &BTreeMap<String, Reading>) -> Option<(&str, &Reading)> {
    readings
        .last_key_value()
        .map(|(key, reading)| (key.as_str(), reading))
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean of the values rounded to two decimals, or `None` for an empty slice.
pub fn mean2(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(round2(values.iter().sum::<f64>() / values.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading_at(time: &str, risk: i64) -> Reading {
        Reading {
            time: Some(time.to_string()),
            riskrate: Some(Measurement::Integer(risk)),
            ..Reading::default()
        }
    }

    #[test]
    fn parses_timestamp_variants_to_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        for raw in [
            "2024-01-05T10:00:00Z",
            "2024-01-05T10:00:00+00:00",
            "2024-01-05T12:00:00+02:00",
            "2024-01-05T12:00:00+0200",
            "2024-01-05T10:00:00",
            "2024-01-05 10:00:00",
            "2024-01-05T10:00:00.000",
            "2024-01-05T10:00",
        ] {
            assert_eq!(parse_timestamp(raw), Some(expected), "{raw}");
        }
        assert_eq!(
            parse_timestamp("2024-01-05"),
            Some(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn unparseable_timestamps_are_absent() {
        for raw in ["", "   ", "yesterday", "2024-13-01T00:00:00", "05/01/2024"] {
            assert_eq!(parse_timestamp(raw), None, "{raw}");
        }
    }

    #[test]
    fn parses_measurements_with_units_and_composites() {
        assert_eq!(parse_measurement(&Measurement::Integer(72)), Some(72.0));
        assert_eq!(parse_measurement(&Measurement::Real(97.5)), Some(97.5));
        assert_eq!(parse_measurement(&"72 bpm".into()), Some(72.0));
        assert_eq!(parse_measurement(&"96%".into()), Some(96.0));
        assert_eq!(parse_measurement(&"120/80".into()), Some(120.0));
        assert_eq!(parse_measurement(&"high".into()), None);
        assert_eq!(parse_measurement(&"".into()), None);
    }

    #[test]
    fn blood_pressure_needs_both_integer_components() {
        assert_eq!(parse_blood_pressure(&"120/80".into()), Some((120.0, 80.0)));
        assert_eq!(parse_blood_pressure(&" 130 / 85 ".into()), Some((130.0, 85.0)));
        assert_eq!(parse_blood_pressure(&"120".into()), None);
        assert_eq!(parse_blood_pressure(&"120/eighty".into()), None);
        assert_eq!(parse_blood_pressure(&"120/80/60".into()), None);
        assert_eq!(parse_blood_pressure(&Measurement::Integer(120)), None);
    }

    #[test]
    fn risk_values_are_integers() {
        assert_eq!(risk_value(&Measurement::Integer(80)), Some(80));
        assert_eq!(risk_value(&Measurement::Real(80.9)), Some(80));
        assert_eq!(risk_value(&" 45 ".into()), Some(45));
        assert_eq!(risk_value(&"45.5".into()), None);
    }

    #[test]
    fn latest_by_time_ignores_key_order() {
        let mut readings = BTreeMap::new();
        readings.insert("a".to_string(), reading_at("2024-03-01T00:00:00Z", 10));
        readings.insert("b".to_string(), reading_at("2024-01-01T00:00:00Z", 20));
        readings.insert("c".to_string(), reading_at("garbage", 30));

        let (time, latest) = latest_by_time(readings.values()).unwrap();
        assert_eq!(time, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(latest.riskrate, Some(Measurement::Integer(10)));

        let (key, by_key) = latest_by_key(&readings).unwrap();
        assert_eq!(key, "c");
        assert_eq!(by_key.riskrate, Some(Measurement::Integer(30)));
    }

    #[test]
    fn latest_by_time_ties_go_to_last_seen() {
        let readings = [
            reading_at("2024-03-01T00:00:00Z", 1),
            reading_at("2024-03-01T02:00:00+02:00", 2),
        ];
        let (_, latest) = latest_by_time(readings.iter()).unwrap();
        assert_eq!(latest.riskrate, Some(Measurement::Integer(2)));
    }

    #[test]
    fn no_parseable_time_means_no_latest() {
        let readings = [reading_at("nope", 1), Reading::default()];
        assert!(latest_by_time(readings.iter()).is_none());
        assert!(latest_by_key(&BTreeMap::new()).is_none());
    }

    #[test]
    fn averages_round_to_two_decimals() {
        assert_eq!(mean2(&[]), None);
        assert_eq!(mean2(&[1.0, 2.0, 2.0]), Some(1.67));
        assert_eq!(round2(5.263157), 5.26);
    }
}
