//! SeaORM implementation of UnitOfWork
//!
//! The three repositories share one [`ChangeSet`]. `save_changes` drains it
//! and replays every change inside a single database transaction, so either
//! all staged writes land or none do. Cascading deletes are left to the
//! foreign keys declared in the migrations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, TransactionTrait};
use tracing::debug;

use super::booking_repository::{self, SeaOrmBookingRepository};
use super::hotel_repository::{self, SeaOrmHotelRepository};
use super::room_repository::{self, SeaOrmRoomRepository};
use crate::domain::{
    BookingRepository, DomainResult, HotelRepository, RoomRepository, UnitOfWork,
    UnitOfWorkFactory,
};
use crate::infrastructure::change_set::{ChangeSet, PendingChange};
use crate::infrastructure::database::entities::{booking, hotel, room};

pub struct SeaOrmUnitOfWork {
    db: DatabaseConnection,
    changes: ChangeSet,
    hotels: SeaOrmHotelRepository,
    rooms: SeaOrmRoomRepository,
    bookings: SeaOrmBookingRepository,
}

impl SeaOrmUnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        let changes = ChangeSet::new();
        Self {
            hotels: SeaOrmHotelRepository::new(db.clone(), changes.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone(), changes.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone(), changes.clone()),
            db,
            changes,
        }
    }
}

async fn apply<C: ConnectionTrait>(conn: &C, change: PendingChange) -> Result<u64, DbErr> {
    let affected = match change {
        PendingChange::AddHotel(h) => {
            hotel_repository::domain_to_active(&h).insert(conn).await?;
            1
        }
        PendingChange::UpdateHotel(h) => {
            hotel_repository::domain_to_active(&h).update(conn).await?;
            1
        }
        PendingChange::DeleteHotel(id) => {
            hotel::Entity::delete_by_id(id).exec(conn).await?.rows_affected
        }
        PendingChange::AddRoom(r) => {
            room_repository::domain_to_active(&r).insert(conn).await?;
            1
        }
        PendingChange::UpdateRoom(r) => {
            room_repository::domain_to_active(&r).update(conn).await?;
            1
        }
        PendingChange::DeleteRoom(id) => {
            room::Entity::delete_by_id(id).exec(conn).await?.rows_affected
        }
        PendingChange::AddBooking(b) => {
            booking_repository::domain_to_active(&b).insert(conn).await?;
            1
        }
        PendingChange::UpdateBooking(b) => {
            booking_repository::domain_to_active(&b).update(conn).await?;
            1
        }
        PendingChange::DeleteBooking(id) => {
            booking::Entity::delete_by_id(id)
                .exec(conn)
                .await?
                .rows_affected
        }
    };
    Ok(affected)
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    fn hotels(&self) -> &dyn HotelRepository {
        &self.hotels
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    async fn save_changes(&self) -> DomainResult<u64> {
        let pending = self.changes.take().await;
        if pending.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;
        let mut affected = 0;
        for change in pending {
            debug!(change = %change.describe(), "Applying staged change");
            // An early return drops `txn`, which rolls it back.
            affected += apply(&txn, change).await?;
        }
        txn.commit().await?;

        Ok(affected)
    }
}

/// Opens a [`SeaOrmUnitOfWork`] over a shared connection pool
#[derive(Clone)]
pub struct SeaOrmUnitOfWorkFactory {
    db: DatabaseConnection,
}

impl SeaOrmUnitOfWorkFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl UnitOfWorkFactory for SeaOrmUnitOfWorkFactory {
    fn begin(&self) -> Box<dyn UnitOfWork> {
        Box::new(SeaOrmUnitOfWork::new(self.db.clone()))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::domain::{Booking, DomainError, Hotel, Room, RoomCapacity, RoomType, StayPeriod};
    use crate::infrastructure::database::test_database;

    fn day(n: i64) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 14, 0, 0).unwrap() + Duration::days(n - 1)
    }

    async fn seed(factory: &SeaOrmUnitOfWorkFactory) -> (Hotel, Room, Booking) {
        let hotel = Hotel::new("Grand", "1 Main St");
        let room = Room::new(101, RoomType::Deluxe, RoomCapacity::Double, hotel.id);
        let booking = Booking::new(
            "John Doe",
            "AB123456",
            "555-1234",
            StayPeriod::new(day(1), day(3)).unwrap(),
            room.id,
        );

        let uow = factory.begin();
        uow.hotels().add(hotel.clone()).await.unwrap();
        uow.rooms().add(room.clone()).await.unwrap();
        uow.bookings().add(booking.clone()).await.unwrap();
        assert_eq!(uow.save_changes().await.unwrap(), 3);

        (hotel, room, booking)
    }

    #[tokio::test]
    async fn staged_writes_are_invisible_until_saved() {
        let factory = SeaOrmUnitOfWorkFactory::new(test_database().await);
        let uow = factory.begin();
        let hotel = Hotel::new("Grand", "1 Main St");

        uow.hotels().add(hotel.clone()).await.unwrap();
        assert!(uow.hotels().find_by_id(hotel.id).await.unwrap().is_none());

        uow.save_changes().await.unwrap();
        let stored = uow.hotels().find_by_id(hotel.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Grand");
    }

    #[tokio::test]
    async fn save_without_changes_writes_nothing() {
        let factory = SeaOrmUnitOfWorkFactory::new(test_database().await);
        assert_eq!(factory.begin().save_changes().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn loads_aggregates_with_children() {
        let factory = SeaOrmUnitOfWorkFactory::new(test_database().await);
        let (hotel, room, booking) = seed(&factory).await;
        let uow = factory.begin();

        let stored_hotel = uow.hotels().find_by_id(hotel.id).await.unwrap().unwrap();
        assert_eq!(stored_hotel.rooms.len(), 1);
        assert_eq!(stored_hotel.rooms[0].room_type, RoomType::Deluxe);

        let stored_room = uow.rooms().find_with_bookings(room.id).await.unwrap().unwrap();
        assert_eq!(stored_room.bookings, vec![booking.clone()]);

        let by_room = uow.bookings().find_by_room(room.id).await.unwrap();
        assert_eq!(by_room.len(), 1);
        assert!(uow.bookings().find_by_room(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_overwrites_scalar_fields() {
        let factory = SeaOrmUnitOfWorkFactory::new(test_database().await);
        let (_, room, _) = seed(&factory).await;
        let uow = factory.begin();

        let mut changed = uow.rooms().find_by_id(room.id).await.unwrap().unwrap();
        changed.number = 202;
        changed.capacity = RoomCapacity::Quad;
        uow.rooms().update(changed).await.unwrap();
        uow.save_changes().await.unwrap();

        let stored = uow.rooms().find_by_id(room.id).await.unwrap().unwrap();
        assert_eq!(stored.number, 202);
        assert_eq!(stored.capacity, RoomCapacity::Quad);
    }

    #[tokio::test]
    async fn delete_missing_record_is_not_found() {
        let factory = SeaOrmUnitOfWorkFactory::new(test_database().await);
        let uow = factory.begin();

        let err = uow.bookings().delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Booking", .. }));
        let err = uow.rooms().delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Room", .. }));
        let err = uow.hotels().delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Hotel", .. }));

        assert_eq!(uow.save_changes().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn deleting_hotel_cascades_to_rooms_and_bookings() {
        let factory = SeaOrmUnitOfWorkFactory::new(test_database().await);
        let (hotel, room, booking) = seed(&factory).await;
        let uow = factory.begin();

        uow.hotels().delete(hotel.id).await.unwrap();
        uow.save_changes().await.unwrap();

        assert!(uow.hotels().find_by_id(hotel.id).await.unwrap().is_none());
        assert!(uow.rooms().find_by_id(room.id).await.unwrap().is_none());
        assert!(uow.bookings().find_by_id(booking.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_save_rolls_back_every_change() {
        let factory = SeaOrmUnitOfWorkFactory::new(test_database().await);
        let uow = factory.begin();

        let hotel = Hotel::new("Grand", "1 Main St");
        // Room of a hotel that does not exist violates the foreign key.
        let orphan = Room::new(1, RoomType::Standard, RoomCapacity::Single, Uuid::new_v4());
        uow.hotels().add(hotel.clone()).await.unwrap();
        uow.rooms().add(orphan).await.unwrap();

        let err = uow.save_changes().await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
        assert!(uow.hotels().find_by_id(hotel.id).await.unwrap().is_none());
    }
}
