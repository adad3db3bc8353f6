//! Room management service

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, Hotel, Room, RoomCapacity, RoomType, UnitOfWorkFactory,
};

#[derive(Debug, Clone)]
pub struct NewRoom {
    pub number: i32,
    pub room_type: RoomType,
    pub capacity: RoomCapacity,
    pub hotel_id: Uuid,
}

/// Replacement scalar fields for an existing room. The owning hotel never
/// changes.
#[derive(Debug, Clone)]
pub struct RoomChanges {
    pub id: Uuid,
    pub number: i32,
    pub room_type: RoomType,
    pub capacity: RoomCapacity,
}

impl RoomChanges {
    fn apply_to(self, room: &mut Room) {
        room.number = self.number;
        room.room_type = self.room_type;
        room.capacity = self.capacity;
    }
}

/// A room with its bookings and the hotel that owns it
#[derive(Debug, Clone)]
pub struct RoomDetails {
    pub room: Room,
    pub hotel: Hotel,
}

pub struct RoomService {
    uow: Arc<dyn UnitOfWorkFactory>,
}

impl RoomService {
    pub fn new(uow: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow }
    }

    /// Create a room. The owning hotel must exist.
    pub async fn add(&self, input: NewRoom) -> DomainResult<Room> {
        let uow = self.uow.begin();
        if uow.hotels().find_by_id(input.hotel_id).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "Hotel {} does not exist",
                input.hotel_id
            )));
        }

        let room = Room::new(input.number, input.room_type, input.capacity, input.hotel_id);
        uow.rooms().add(room.clone()).await?;
        uow.save_changes().await?;

        info!(
            room_id = %room.id,
            hotel_id = %room.hotel_id,
            number = room.number,
            "Room created"
        );
        Ok(room)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<RoomDetails> {
        let uow = self.uow.begin();
        let room = uow
            .rooms()
            .find_with_bookings(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", id))?;
        let mut hotel = uow
            .hotels()
            .find_by_id(room.hotel_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotel", room.hotel_id))?;
        hotel.rooms.clear();

        Ok(RoomDetails { room, hotel })
    }

    /// Rooms of one hotel, ordered by number. Empty for an unknown hotel.
    pub async fn list_for_hotel(&self, hotel_id: Uuid) -> DomainResult<Vec<Room>> {
        self.uow.begin().rooms().find_by_hotel(hotel_id).await
    }

    pub async fn update(&self, id: Uuid, changes: RoomChanges) -> DomainResult<()> {
        if changes.id != id {
            return Err(DomainError::Validation(format!(
                "Room id {} does not match body id {}",
                id, changes.id
            )));
        }

        let uow = self.uow.begin();
        let mut room = uow
            .rooms()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", id))?;

        changes.apply_to(&mut room);
        uow.rooms().update(room).await?;
        uow.save_changes().await?;

        info!(room_id = %id, "Room updated");
        Ok(())
    }

    /// Remove a room together with its bookings
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let uow = self.uow.begin();
        uow.rooms().delete(id).await?;
        uow.save_changes().await?;

        info!(room_id = %id, "Room deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{HotelService, NewHotel};
    use crate::infrastructure::InMemoryUnitOfWorkFactory;

    struct Fixture {
        factory: InMemoryUnitOfWorkFactory,
        hotels: HotelService,
        rooms: RoomService,
    }

    fn fixture() -> Fixture {
        let factory = InMemoryUnitOfWorkFactory::new();
        let shared: Arc<dyn UnitOfWorkFactory> = Arc::new(factory.clone());
        Fixture {
            hotels: HotelService::new(shared.clone()),
            rooms: RoomService::new(shared),
            factory,
        }
    }

    async fn hotel(f: &Fixture) -> Hotel {
        f.hotels
            .add(NewHotel {
                name: "Grand".into(),
                address: "1 Main St".into(),
            })
            .await
            .unwrap()
    }

    fn new_room(number: i32, hotel_id: Uuid) -> NewRoom {
        NewRoom {
            number,
            room_type: RoomType::Deluxe,
            capacity: RoomCapacity::Double,
            hotel_id,
        }
    }

    #[tokio::test]
    async fn add_requires_existing_hotel() {
        let f = fixture();
        let err = f.rooms.add(new_room(101, Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(f.factory.store().room_count(), 0);
    }

    #[tokio::test]
    async fn get_returns_room_with_hotel() {
        let f = fixture();
        let hotel = hotel(&f).await;
        let room = f.rooms.add(new_room(101, hotel.id)).await.unwrap();

        let details = f.rooms.get(room.id).await.unwrap();
        assert_eq!(details.room.number, 101);
        assert_eq!(details.hotel.id, hotel.id);
        assert!(details.room.bookings.is_empty());
    }

    #[tokio::test]
    async fn list_is_scoped_by_hotel() {
        let f = fixture();
        let a = hotel(&f).await;
        let b = hotel(&f).await;
        f.rooms.add(new_room(102, a.id)).await.unwrap();
        f.rooms.add(new_room(101, a.id)).await.unwrap();
        f.rooms.add(new_room(201, b.id)).await.unwrap();

        let numbers: Vec<i32> = f
            .rooms
            .list_for_hotel(a.id)
            .await
            .unwrap()
            .iter()
            .map(|r| r.number)
            .collect();
        assert_eq!(numbers, vec![101, 102]);
        assert!(f.rooms.list_for_hotel(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_owning_hotel() {
        let f = fixture();
        let hotel = hotel(&f).await;
        let room = f.rooms.add(new_room(101, hotel.id)).await.unwrap();

        f.rooms
            .update(
                room.id,
                RoomChanges {
                    id: room.id,
                    number: 501,
                    room_type: RoomType::Penthouse,
                    capacity: RoomCapacity::Quad,
                },
            )
            .await
            .unwrap();

        let stored = f.rooms.get(room.id).await.unwrap().room;
        assert_eq!(stored.number, 501);
        assert_eq!(stored.room_type, RoomType::Penthouse);
        assert_eq!(stored.hotel_id, hotel.id);
    }

    #[tokio::test]
    async fn update_with_mismatched_id_changes_nothing() {
        let f = fixture();
        let hotel = hotel(&f).await;
        let room = f.rooms.add(new_room(101, hotel.id)).await.unwrap();

        let err = f
            .rooms
            .update(
                room.id,
                RoomChanges {
                    id: Uuid::new_v4(),
                    number: 999,
                    room_type: RoomType::Suite,
                    capacity: RoomCapacity::Single,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(f.rooms.get(room.id).await.unwrap().room.number, 101);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let f = fixture();
        let hotel = hotel(&f).await;
        f.rooms.add(new_room(101, hotel.id)).await.unwrap();

        let err = f.rooms.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Room", .. }));
        assert_eq!(f.factory.store().room_count(), 1);
    }
}
