//! Booking domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::DomainError;

/// The interval a room is occupied for.
///
/// Two periods overlap when `a.start <= b.end && a.end >= b.start`, so a
/// stay that starts on the instant another one ends still collides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl StayPeriod {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::Validation(format!(
                "Stay end {} is before start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

/// A tenant's reservation of one room for one stay period
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub tenant_name: String,
    pub tenant_passport_number: String,
    pub tenant_phone_number: String,
    pub period: StayPeriod,
    pub room_id: Uuid,
}

impl Booking {
    pub fn new(
        tenant_name: impl Into<String>,
        tenant_passport_number: impl Into<String>,
        tenant_phone_number: impl Into<String>,
        period: StayPeriod,
        room_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_name: tenant_name.into(),
            tenant_passport_number: tenant_passport_number.into(),
            tenant_phone_number: tenant_phone_number.into(),
            period,
            room_id,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap() + Duration::days(n - 1)
    }

    fn period(s: i64, e: i64) -> StayPeriod {
        StayPeriod::new(day(s), day(e)).unwrap()
    }

    #[test]
    fn inverted_period_is_rejected() {
        let err = StayPeriod::new(day(3), day(1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn zero_length_period_is_allowed() {
        let p = StayPeriod::new(day(2), day(2)).unwrap();
        assert_eq!(p.start(), p.end());
    }

    #[test]
    fn partial_overlap_is_detected_both_ways() {
        assert!(period(1, 3).overlaps(&period(2, 4)));
        assert!(period(2, 4).overlaps(&period(1, 3)));
    }

    #[test]
    fn containment_overlaps() {
        assert!(period(1, 10).overlaps(&period(3, 4)));
        assert!(period(3, 4).overlaps(&period(1, 10)));
    }

    #[test]
    fn touching_boundaries_overlap() {
        assert!(period(1, 3).overlaps(&period(3, 5)));
        assert!(period(3, 5).overlaps(&period(1, 3)));
    }

    #[test]
    fn disjoint_periods_do_not_overlap() {
        assert!(!period(1, 3).overlaps(&period(4, 5)));
        assert!(!period(4, 5).overlaps(&period(1, 3)));
    }

    #[test]
    fn new_booking_gets_unique_id() {
        let room_id = Uuid::new_v4();
        let a = Booking::new("A", "P1", "1", period(1, 2), room_id);
        let b = Booking::new("A", "P1", "1", period(1, 2), room_id);
        assert_ne!(a.id, b.id);
        assert_eq!(a.room_id, room_id);
    }
}
