#![cfg(feature = "serde")]

use tempus::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc, Weekday};

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Appointment {
    day: NaiveDate,
    starts: DateTime<FixedOffset>,
    length: Duration,
    weekday: Weekday,
}

#[test]
fn test_struct_round_trip() {
    let starts = DateTime::parse_from_rfc3339("2024-12-25T15:30:45.5-08:00").unwrap();
    let appointment = Appointment {
        day: starts.date_naive(),
        starts,
        length: Duration::minutes(90),
        weekday: starts.weekday(),
    };
    let json = serde_json::to_value(&appointment).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "day": "2024-12-25",
            "starts": "2024-12-25T15:30:45.500-08:00",
            "length": { "secs": 5400, "nanos": 0 },
            "weekday": "Wed",
        })
    );
    let back: Appointment = serde_json::from_value(json).unwrap();
    assert_eq!(back, appointment);
    assert_eq!(back.starts.offset(), starts.offset());
}

#[test]
fn test_rejects_malformed_values() {
    assert!(serde_json::from_str::<DateTime<Utc>>("\"2024-12-25 15:30\"").is_err());
    assert!(serde_json::from_str::<NaiveDateTime>("\"2024-12-25T25:00:00\"").is_err());
    assert!(serde_json::from_str::<Duration>(r#"{"secs":1}"#).is_err());
    assert!(serde_json::from_str::<FixedOffset>("\"+24:00\"").is_err());
}
