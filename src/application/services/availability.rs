//! Room availability check
//!
//! Runs before every booking create and update. A booking occupies its room
//! for the closed interval `[start, end]`, so a stay starting on the instant
//! another one ends is refused.

use tracing::warn;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, StayPeriod, UnitOfWork};

/// Fail unless `room_id` exists and none of its bookings overlap `period`.
///
/// `except` names a booking to leave out of the comparison, the one being
/// rescheduled on update.
pub async fn ensure_room_is_available(
    uow: &dyn UnitOfWork,
    room_id: Uuid,
    period: &StayPeriod,
    except: Option<Uuid>,
) -> DomainResult<()> {
    let room = uow
        .rooms()
        .find_with_bookings(room_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Room", room_id))?;

    if let Some(existing) = room.conflicting_booking(period, except) {
        warn!(
            room_id = %room_id,
            booking_id = %existing.id,
            start = %period.start(),
            end = %period.end(),
            "Requested stay overlaps an existing booking"
        );
        metrics::counter!("booking_conflicts_total").increment(1);
        return Err(DomainError::Conflict(format!(
            "Room {} is already booked from {} to {}",
            room.number,
            existing.period.start().to_rfc3339(),
            existing.period.end().to_rfc3339()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Booking, Hotel, Room, RoomCapacity, RoomType, UnitOfWorkFactory};
    use crate::infrastructure::InMemoryUnitOfWorkFactory;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap() + Duration::days(n - 1)
    }

    fn period(s: i64, e: i64) -> StayPeriod {
        StayPeriod::new(day(s), day(e)).unwrap()
    }

    async fn room_booked_for_days_1_to_3(factory: &InMemoryUnitOfWorkFactory) -> (Uuid, Uuid) {
        let hotel = Hotel::new("Grand", "1 Main St");
        let room = Room::new(101, RoomType::Standard, RoomCapacity::Double, hotel.id);
        let booking = Booking::new("John Doe", "AB123456", "555-1234", period(1, 3), room.id);
        let ids = (room.id, booking.id);

        let uow = factory.begin();
        uow.hotels().add(hotel).await.unwrap();
        uow.rooms().add(room).await.unwrap();
        uow.bookings().add(booking).await.unwrap();
        uow.save_changes().await.unwrap();
        ids
    }

    #[tokio::test]
    async fn missing_room_is_not_found() {
        let factory = InMemoryUnitOfWorkFactory::new();
        let uow = factory.begin();
        let err = ensure_room_is_available(uow.as_ref(), Uuid::new_v4(), &period(1, 2), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Room", .. }));
    }

    #[tokio::test]
    async fn overlapping_stay_conflicts() {
        let factory = InMemoryUnitOfWorkFactory::new();
        let (room_id, _) = room_booked_for_days_1_to_3(&factory).await;
        let uow = factory.begin();

        for wanted in [period(2, 4), period(3, 5), period(0, 1), period(0, 10)] {
            let err = ensure_room_is_available(uow.as_ref(), room_id, &wanted, None)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Conflict(_)));
        }
    }

    #[tokio::test]
    async fn disjoint_stay_is_available() {
        let factory = InMemoryUnitOfWorkFactory::new();
        let (room_id, _) = room_booked_for_days_1_to_3(&factory).await;
        let uow = factory.begin();

        ensure_room_is_available(uow.as_ref(), room_id, &period(4, 5), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rescheduled_booking_is_ignored() {
        let factory = InMemoryUnitOfWorkFactory::new();
        let (room_id, booking_id) = room_booked_for_days_1_to_3(&factory).await;
        let uow = factory.begin();

        ensure_room_is_available(uow.as_ref(), room_id, &period(2, 4), Some(booking_id))
            .await
            .unwrap();
    }
}
