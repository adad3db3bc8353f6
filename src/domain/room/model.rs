//! Room domain entity

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::booking::{Booking, StayPeriod};
use crate::domain::DomainError;

/// Room category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RoomType {
    Standard,
    Deluxe,
    Suite,
    Penthouse,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Deluxe => "Deluxe",
            Self::Suite => "Suite",
            Self::Penthouse => "Penthouse",
        }
    }
}

impl FromStr for RoomType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Standard" => Ok(Self::Standard),
            "Deluxe" => Ok(Self::Deluxe),
            "Suite" => Ok(Self::Suite),
            "Penthouse" => Ok(Self::Penthouse),
            other => Err(DomainError::Validation(format!(
                "Unknown room type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How many guests a room sleeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RoomCapacity {
    Single,
    Double,
    Triple,
    Quad,
}

impl RoomCapacity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Triple => "Triple",
            Self::Quad => "Quad",
        }
    }
}

impl FromStr for RoomCapacity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Single" => Ok(Self::Single),
            "Double" => Ok(Self::Double),
            "Triple" => Ok(Self::Triple),
            "Quad" => Ok(Self::Quad),
            other => Err(DomainError::Validation(format!(
                "Unknown room capacity: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for RoomCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bookable room inside a hotel.
///
/// `bookings` is populated only by `RoomRepository::find_with_bookings`.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: Uuid,
    pub number: i32,
    pub room_type: RoomType,
    pub capacity: RoomCapacity,
    pub hotel_id: Uuid,
    pub bookings: Vec<Booking>,
}

impl Room {
    pub fn new(number: i32, room_type: RoomType, capacity: RoomCapacity, hotel_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            room_type,
            capacity,
            hotel_id,
            bookings: Vec::new(),
        }
    }

    /// First loaded booking whose period overlaps `period`, ignoring the
    /// booking identified by `except` (the one being rescheduled).
    pub fn conflicting_booking(&self, period: &StayPeriod, except: Option<Uuid>) -> Option<&Booking> {
        self.bookings
            .iter()
            .filter(|b| Some(b.id) != except)
            .find(|b| b.period.overlaps(period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn day(n: i64) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap() + Duration::days(n - 1)
    }

    fn booked_room() -> (Room, Uuid) {
        let mut room = Room::new(101, RoomType::Standard, RoomCapacity::Double, Uuid::new_v4());
        let booking = Booking::new(
            "John Doe",
            "AB123456",
            "555-1234",
            StayPeriod::new(day(1), day(3)).unwrap(),
            room.id,
        );
        let id = booking.id;
        room.bookings.push(booking);
        (room, id)
    }

    #[test]
    fn enum_names_roundtrip_through_strings() {
        for t in [RoomType::Standard, RoomType::Deluxe, RoomType::Suite, RoomType::Penthouse] {
            assert_eq!(t.as_str().parse::<RoomType>().unwrap(), t);
        }
        for c in [RoomCapacity::Single, RoomCapacity::Double, RoomCapacity::Triple, RoomCapacity::Quad] {
            assert_eq!(c.to_string().parse::<RoomCapacity>().unwrap(), c);
        }
    }

    #[test]
    fn unknown_enum_name_is_rejected() {
        assert!(matches!(
            "Closet".parse::<RoomType>(),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            "Dorm".parse::<RoomCapacity>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn detects_overlapping_booking() {
        let (room, id) = booked_room();
        let wanted = StayPeriod::new(day(2), day(4)).unwrap();
        assert_eq!(room.conflicting_booking(&wanted, None).map(|b| b.id), Some(id));
    }

    #[test]
    fn disjoint_period_has_no_conflict() {
        let (room, _) = booked_room();
        let wanted = StayPeriod::new(day(4), day(5)).unwrap();
        assert!(room.conflicting_booking(&wanted, None).is_none());
    }

    #[test]
    fn excluded_booking_does_not_conflict_with_itself() {
        let (room, id) = booked_room();
        let same = StayPeriod::new(day(1), day(3)).unwrap();
        assert!(room.conflicting_booking(&same, Some(id)).is_none());
    }
}
