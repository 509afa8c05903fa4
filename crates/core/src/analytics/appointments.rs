//! Appointment counts per doctor over a time window.
//!
//! Windows are half-open `[start, end)` bounds rendered as naive ISO strings
//! (`2024-05-01T00:00:00`), and a meeting is inside the window when its stored
//! `meeting_datetime` string sorts inside them. The comparison is on text, not on parsed
//! instants, so a bare date such as `"2024-05-01"` sorts before its own day's start.

use crate::constants::NO_APPOINTMENTS_MESSAGE;
use crate::model::{Doctor, DoctorId, Patient};
use api_shared::{AppointmentsByDateRes, DoctorAppointments, InfoMessage};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, Utc};
use std::collections::HashMap;

const WINDOW_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Half-open window of meeting datetimes, as ISO strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub start: String,
    pub end: String,
}

impl Window {
    fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: start.format(WINDOW_FORMAT).to_string(),
            end: end.format(WINDOW_FORMAT).to_string(),
        }
    }

    /// The calendar day `[date 00:00, date+1 00:00)`.
    pub fn day(date: NaiveDate) -> Self {
        let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
        Self::between(date.and_time(Default::default()), next.and_time(Default::default()))
    }

    /// The calendar month containing `now`.
    pub fn month_of(now: DateTime<Utc>) -> Self {
        let first = now.date_naive().with_day(1).unwrap_or(now.date_naive());
        let next = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
        }
        .unwrap_or(first);
        Self::between(first.and_time(Default::default()), next.and_time(Default::default()))
    }

    pub fn contains(&self, meeting_datetime: &str) -> bool {
        self.start.as_str() <= meeting_datetime && meeting_datetime < self.end.as_str()
    }
}

/// Doctor ids of every meeting inside `window`, in encounter order.
///
/// Meetings without a doctor id or a datetime are skipped.
pub fn meetings_in_window(patients: &[Patient], window: &Window) -> Vec<DoctorId> {
    patients
        .iter()
        .flat_map(|patient| patient.medications.values())
        .filter_map(|reading| reading.meeting_details.as_ref())
        .filter_map(|meeting| {
            let doctor_id = meeting.doctor_id.as_ref().filter(|id| !id.is_blank())?;
            let when = meeting
                .meeting_datetime
                .as_deref()
                .filter(|when| !when.is_empty())?;
            window.contains(when).then(|| doctor_id.clone())
        })
        .collect()
}

/// Count meetings per doctor, in order of each doctor's first meeting.
///
/// Meetings with a doctor missing from `directory` are dropped.
pub fn tally(meetings: &[DoctorId], directory: &HashMap<DoctorId, Doctor>) -> Vec<DoctorAppointments> {
    let mut positions: HashMap<&DoctorId, usize> = HashMap::new();
    let mut counts: Vec<DoctorAppointments> = Vec::new();

    for id in meetings {
        let Some(doctor) = directory.get(id) else {
            continue;
        };
        match positions.get(id) {
            Some(&index) => counts[index].appointment_count += 1,
            None => {
                positions.insert(id, counts.len());
                counts.push(DoctorAppointments {
                    doctor_name: doctor.name.clone(),
                    specialisation: doctor.specialisation.clone(),
                    appointment_count: 1,
                });
            }
        }
    }

    counts
}

/// Per-doctor counts for one day, by doctor name; a message object when there are none.
pub fn by_date(mut counts: Vec<DoctorAppointments>) -> AppointmentsByDateRes {
    if counts.is_empty() {
        return AppointmentsByDateRes::Empty(InfoMessage {
            message: NO_APPOINTMENTS_MESSAGE.into(),
        });
    }
    counts.sort_by(|a, b| a.doctor_name.cmp(&b.doctor_name));
    AppointmentsByDateRes::Doctors(counts)
}

/// Per-doctor counts for a month, busiest first. Ties keep first-meeting order.
pub fn monthly(mut counts: Vec<DoctorAppointments>) -> Vec<DoctorAppointments> {
    counts.sort_by(|a, b| b.appointment_count.cmp(&a.appointment_count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn patients() -> Vec<Patient> {
        serde_json::from_value(json!([
            {"patientid": 1, "medications": {
                "a": {"meeting_details": {"doctor_id": 2, "meeting_datetime": "2024-05-01T09:00:00Z"}},
                "b": {"meeting_details": {"doctor_id": 1, "meeting_datetime": "2024-05-01T10:00:00"}},
                "c": {"meeting_details": {"doctor_id": 1, "meeting_datetime": "2024-05-02T00:00:00"}},
                "d": {"meeting_details": {"doctor_id": 9, "meeting_datetime": "2024-05-01T11:00:00"}},
                "e": {"time": "2024-05-01T11:00:00"}
            }},
            {"patientid": 2, "medications": {
                "a": {"meeting_details": {"doctor_id": 1, "meeting_datetime": "2024-05-01"}},
                "b": {"meeting_details": {"doctor_id": 0, "meeting_datetime": "2024-05-01T12:00:00"}},
                "c": {"meeting_details": {"doctor_id": 2, "meeting_datetime": ""}},
                "d": {"meeting_details": {"doctor_id": 1, "meeting_datetime": "2024-05-01T23:59:59"}}
            }}
        ]))
        .unwrap()
    }

    fn directory() -> HashMap<DoctorId, Doctor> {
        let doctors: Vec<Doctor> = serde_json::from_value(json!([
            {"doctor_id": 1, "name": "Dr Zed", "specialisation": "Cardiology"},
            {"doctor_id": 2, "name": "Dr Amin", "specialisation": "Neurology"}
        ]))
        .unwrap();
        doctors
            .into_iter()
            .filter_map(|d| d.doctor_id.clone().map(|id| (id, d)))
            .collect()
    }

    #[test]
    fn day_window_uses_iso_string_bounds() {
        let window = Window::day(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(window.start, "2024-05-01T00:00:00");
        assert_eq!(window.end, "2024-05-02T00:00:00");

        assert!(window.contains("2024-05-01T00:00:00"));
        assert!(window.contains("2024-05-01T23:59:59Z"));
        assert!(!window.contains("2024-05-02T00:00:00"));
        // A bare date sorts before the window's own start.
        assert!(!window.contains("2024-05-01"));
    }

    #[test]
    fn month_window_rolls_over_year_end() {
        let window = Window::month_of(Utc.with_ymd_and_hms(2024, 12, 15, 8, 0, 0).unwrap());
        assert_eq!(window.start, "2024-12-01T00:00:00");
        assert_eq!(window.end, "2025-01-01T00:00:00");

        let window = Window::month_of(Utc.with_ymd_and_hms(2024, 2, 29, 23, 0, 0).unwrap());
        assert_eq!(window.start, "2024-02-01T00:00:00");
        assert_eq!(window.end, "2024-03-01T00:00:00");
    }

    #[test]
    fn collects_meetings_inside_window_only() {
        let window = Window::day(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let meetings = meetings_in_window(&patients(), &window);
        assert_eq!(
            meetings,
            vec![
                DoctorId::Number(2),
                DoctorId::Number(1),
                DoctorId::Number(9),
                DoctorId::Number(1),
            ]
        );
    }

    #[test]
    fn tallies_known_doctors_and_sorts_by_name() {
        let window = Window::day(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let counts = tally(&meetings_in_window(&patients(), &window), &directory());

        match by_date(counts) {
            AppointmentsByDateRes::Doctors(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].doctor_name, "Dr Amin");
                assert_eq!(rows[0].appointment_count, 1);
                assert_eq!(rows[1].doctor_name, "Dr Zed");
                assert_eq!(rows[1].specialisation, "Cardiology");
                assert_eq!(rows[1].appointment_count, 2);
            }
            other => panic!("expected doctor rows, got {other:?}"),
        }
    }

    #[test]
    fn empty_day_returns_message() {
        let window = Window::day(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        let counts = tally(&meetings_in_window(&patients(), &window), &directory());
        assert_eq!(
            by_date(counts),
            AppointmentsByDateRes::Empty(InfoMessage {
                message: NO_APPOINTMENTS_MESSAGE.into()
            })
        );
    }

    #[test]
    fn monthly_sorts_busiest_first() {
        let window = Window::month_of(Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap());
        let rows = monthly(tally(&meetings_in_window(&patients(), &window), &directory()));

        // The next-day meeting now counts; the bare "2024-05-01" still sorts before the start.
        assert_eq!(rows[0].doctor_name, "Dr Zed");
        assert_eq!(rows[0].appointment_count, 3);
        assert_eq!(rows[1].doctor_name, "Dr Amin");
        assert_eq!(rows[1].appointment_count, 1);
    }

    #[test]
    fn monthly_ties_keep_first_meeting_order() {
        let counts = vec![
            DoctorAppointments {
                doctor_name: "B".into(),
                specialisation: String::new(),
                appointment_count: 1,
            },
            DoctorAppointments {
                doctor_name: "A".into(),
                specialisation: String::new(),
                appointment_count: 1,
            },
        ];
        let rows = monthly(counts);
        assert_eq!(rows[0].doctor_name, "B");
    }
}
