//! Booking service
//!
//! Every create and update runs the availability check against the target
//! room before anything is staged. Nothing serializes two concurrent
//! requests for the same room, so overlapping bookings can still race past
//! the check.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::availability::ensure_room_is_available;
use crate::domain::{
    Booking, DomainError, DomainResult, Room, StayPeriod, UnitOfWork, UnitOfWorkFactory,
};

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub tenant_name: String,
    pub tenant_passport_number: String,
    pub tenant_phone_number: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub room_id: Uuid,
}

/// Replacement fields for an existing booking, possibly moving it to
/// another room
#[derive(Debug, Clone)]
pub struct BookingChanges {
    pub id: Uuid,
    pub tenant_name: String,
    pub tenant_passport_number: String,
    pub tenant_phone_number: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub room_id: Uuid,
}

impl BookingChanges {
    fn apply_to(self, booking: &mut Booking, period: StayPeriod) {
        booking.tenant_name = self.tenant_name;
        booking.tenant_passport_number = self.tenant_passport_number;
        booking.tenant_phone_number = self.tenant_phone_number;
        booking.period = period;
        booking.room_id = self.room_id;
    }
}

/// A booking and the room it occupies
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub booking: Booking,
    pub room: Room,
}

pub struct BookingService {
    uow: Arc<dyn UnitOfWorkFactory>,
}

impl BookingService {
    pub fn new(uow: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow }
    }

    pub async fn add(&self, input: NewBooking) -> DomainResult<Booking> {
        let period = StayPeriod::new(input.start, input.end)?;
        let uow = self.uow.begin();
        check_availability(uow.as_ref(), input.room_id, &period, None).await?;

        let booking = Booking::new(
            input.tenant_name,
            input.tenant_passport_number,
            input.tenant_phone_number,
            period,
            input.room_id,
        );
        uow.bookings().add(booking.clone()).await?;
        uow.save_changes().await?;

        metrics::counter!("bookings_created_total").increment(1);
        info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            start = %period.start(),
            end = %period.end(),
            "Booking created"
        );
        Ok(booking)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<BookingDetails> {
        let uow = self.uow.begin();
        let booking = uow
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))?;
        let room = uow
            .rooms()
            .find_by_id(booking.room_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", booking.room_id))?;

        Ok(BookingDetails { booking, room })
    }

    pub async fn list(&self) -> DomainResult<Vec<Booking>> {
        self.uow.begin().bookings().find_all().await
    }

    /// Bookings of one room. Empty for an unknown room.
    pub async fn list_for_room(&self, room_id: Uuid) -> DomainResult<Vec<Booking>> {
        self.uow.begin().bookings().find_by_room(room_id).await
    }

    /// Overwrite a booking after re-checking its (possibly new) room and
    /// stay. The booking itself is left out of the overlap comparison, so
    /// extending or shortening a stay in place never conflicts with the
    /// stay it replaces.
    pub async fn update(&self, id: Uuid, changes: BookingChanges) -> DomainResult<()> {
        if changes.id != id {
            return Err(DomainError::Validation(format!(
                "Booking id {} does not match body id {}",
                id, changes.id
            )));
        }

        let uow = self.uow.begin();
        let mut booking = uow
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))?;

        let period = StayPeriod::new(changes.start, changes.end)?;
        check_availability(uow.as_ref(), changes.room_id, &period, Some(id)).await?;

        changes.apply_to(&mut booking, period);
        uow.bookings().update(booking).await?;
        uow.save_changes().await?;

        info!(booking_id = %id, "Booking updated");
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let uow = self.uow.begin();
        uow.bookings().delete(id).await?;
        uow.save_changes().await?;

        info!(booking_id = %id, "Booking deleted");
        Ok(())
    }
}

/// A missing target room is the caller's mistake, not a missing resource.
async fn check_availability(
    uow: &dyn UnitOfWork,
    room_id: Uuid,
    period: &StayPeriod,
    except: Option<Uuid>,
) -> DomainResult<()> {
    ensure_room_is_available(uow, room_id, period, except)
        .await
        .map_err(|e| match e {
            DomainError::NotFound { .. } => {
                DomainError::Validation(format!("Room {} does not exist", room_id))
            }
            other => other,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{HotelService, NewHotel, NewRoom, RoomService};
    use crate::domain::{RoomCapacity, RoomType};
    use crate::infrastructure::InMemoryUnitOfWorkFactory;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap() + Duration::days(n - 1)
    }

    struct Fixture {
        factory: InMemoryUnitOfWorkFactory,
        hotels: HotelService,
        bookings: BookingService,
        room_id: Uuid,
        hotel_id: Uuid,
    }

    /// Hotel H with room 101
    async fn fixture() -> Fixture {
        let factory = InMemoryUnitOfWorkFactory::new();
        let shared: Arc<dyn UnitOfWorkFactory> = Arc::new(factory.clone());
        let hotels = HotelService::new(shared.clone());
        let rooms = RoomService::new(shared.clone());

        let hotel = hotels
            .add(NewHotel {
                name: "H".into(),
                address: "1 Main St".into(),
            })
            .await
            .unwrap();
        let room = rooms
            .add(NewRoom {
                number: 101,
                room_type: RoomType::Standard,
                capacity: RoomCapacity::Double,
                hotel_id: hotel.id,
            })
            .await
            .unwrap();

        Fixture {
            factory,
            hotels,
            bookings: BookingService::new(shared),
            room_id: room.id,
            hotel_id: hotel.id,
        }
    }

    fn stay(room_id: Uuid, start: i64, end: i64) -> NewBooking {
        NewBooking {
            tenant_name: "John Doe".into(),
            tenant_passport_number: "AB123456".into(),
            tenant_phone_number: "555-1234".into(),
            start: day(start),
            end: day(end),
            room_id,
        }
    }

    fn changes_for(booking: &Booking, start: i64, end: i64) -> BookingChanges {
        BookingChanges {
            id: booking.id,
            tenant_name: booking.tenant_name.clone(),
            tenant_passport_number: booking.tenant_passport_number.clone(),
            tenant_phone_number: booking.tenant_phone_number.clone(),
            start: day(start),
            end: day(end),
            room_id: booking.room_id,
        }
    }

    #[tokio::test]
    async fn double_booking_scenario() {
        let f = fixture().await;

        f.bookings.add(stay(f.room_id, 1, 3)).await.unwrap();

        let err = f.bookings.add(stay(f.room_id, 2, 4)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        f.bookings.add(stay(f.room_id, 4, 5)).await.unwrap();
        assert_eq!(f.bookings.list_for_room(f.room_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn touching_boundary_conflicts() {
        let f = fixture().await;
        f.bookings.add(stay(f.room_id, 1, 3)).await.unwrap();

        let err = f.bookings.add(stay(f.room_id, 3, 5)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(f.factory.store().booking_count(), 1);
    }

    #[tokio::test]
    async fn inverted_stay_is_invalid() {
        let f = fixture().await;
        let err = f.bookings.add(stay(f.room_id, 5, 1)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn booking_unknown_room_is_invalid() {
        let f = fixture().await;
        let err = f.bookings.add(stay(Uuid::new_v4(), 1, 2)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(f.factory.store().booking_count(), 0);
    }

    #[tokio::test]
    async fn get_includes_room() {
        let f = fixture().await;
        let booking = f.bookings.add(stay(f.room_id, 1, 3)).await.unwrap();

        let details = f.bookings.get(booking.id).await.unwrap();
        assert_eq!(details.booking, booking);
        assert_eq!(details.room.number, 101);
        assert_eq!(f.bookings.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_may_extend_own_stay() {
        let f = fixture().await;
        let booking = f.bookings.add(stay(f.room_id, 1, 3)).await.unwrap();

        f.bookings
            .update(booking.id, changes_for(&booking, 1, 4))
            .await
            .unwrap();

        let stored = f.bookings.get(booking.id).await.unwrap().booking;
        assert_eq!(stored.period.end(), day(4));
    }

    #[tokio::test]
    async fn update_into_other_booking_conflicts() {
        let f = fixture().await;
        f.bookings.add(stay(f.room_id, 1, 3)).await.unwrap();
        let later = f.bookings.add(stay(f.room_id, 6, 8)).await.unwrap();

        let err = f
            .bookings
            .update(later.id, changes_for(&later, 2, 7))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = f.bookings.get(later.id).await.unwrap().booking;
        assert_eq!(stored.period.start(), day(6));
    }

    #[tokio::test]
    async fn update_with_mismatched_id_changes_nothing() {
        let f = fixture().await;
        let booking = f.bookings.add(stay(f.room_id, 1, 3)).await.unwrap();

        let mut changes = changes_for(&booking, 10, 12);
        changes.id = Uuid::new_v4();
        let err = f.bookings.update(booking.id, changes).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        let stored = f.bookings.get(booking.id).await.unwrap().booking;
        assert_eq!(stored.period.start(), day(1));
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let f = fixture().await;
        let ghost = Booking::new(
            "Ghost",
            "X",
            "0",
            StayPeriod::new(day(1), day(2)).unwrap(),
            f.room_id,
        );
        let err = f
            .bookings
            .update(ghost.id, changes_for(&ghost, 1, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Booking", .. }));
    }

    #[tokio::test]
    async fn delete_missing_leaves_store_unchanged() {
        let f = fixture().await;
        f.bookings.add(stay(f.room_id, 1, 3)).await.unwrap();

        let err = f.bookings.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(f.factory.store().booking_count(), 1);
    }

    #[tokio::test]
    async fn deleting_hotel_removes_its_bookings() {
        let f = fixture().await;
        let booking = f.bookings.add(stay(f.room_id, 1, 3)).await.unwrap();

        f.hotels.delete(f.hotel_id).await.unwrap();

        let err = f.bookings.get(booking.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(f.factory.store().room_count(), 0);
    }
}
