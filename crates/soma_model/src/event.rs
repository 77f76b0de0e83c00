//! Phase-crossing event records.

use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// A single phase-crossing event: the instant a principal phase is reached.
///
/// Serializes to the wire record `{ "Date": "YYYY-MM-DDTHH:MM:SS", "Phase": 0..3 }`.
/// The timestamp means UTC; the wire format carries no zone suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MoonEvent {
    /// Event instant (UTC).
    #[serde(rename = "Date")]
    pub timestamp: NaiveDateTime,
    /// Which principal phase was reached.
    #[serde(rename = "Phase")]
    pub phase: Phase,
}

impl MoonEvent {
    pub fn new(timestamp: NaiveDateTime, phase: Phase) -> Self {
        Self { timestamp, phase }
    }
}

impl Display for MoonEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} (phase {})",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S"),
            self.phase.glyph(),
            self.phase.name(),
            self.phase.id()
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn serializes_to_wire_shape() {
        let event = MoonEvent::new(dt(2025, 1, 13, 22, 27), Phase::FullMoon);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Date":"2025-01-13T22:27:00","Phase":2}"#);
    }

    #[test]
    fn deserializes_from_wire_shape() {
        let json = r#"{ "Date": "2025-01-13T22:27:00", "Phase": 2 }"#;
        let event: MoonEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, MoonEvent::new(dt(2025, 1, 13, 22, 27), Phase::FullMoon));
    }

    #[test]
    fn rejects_bad_date() {
        let json = r#"{ "Date": "not-a-date", "Phase": 2 }"#;
        assert!(serde_json::from_str::<MoonEvent>(json).is_err());
    }

    #[test]
    fn rejects_bad_phase() {
        let json = r#"{ "Date": "2025-01-13T22:27:00", "Phase": 7 }"#;
        assert!(serde_json::from_str::<MoonEvent>(json).is_err());
    }

    #[test]
    fn orders_by_timestamp_first() {
        let a = MoonEvent::new(dt(2025, 1, 13, 22, 27), Phase::LastQuarter);
        let b = MoonEvent::new(dt(2025, 1, 21, 0, 0), Phase::NewMoon);
        assert!(a < b);
    }
}
