//! Room repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Room;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Stage a new room
    async fn add(&self, room: Room) -> DomainResult<()>;

    /// Find room by ID (bookings not loaded)
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Room>>;

    /// Find room by ID together with all of its bookings
    async fn find_with_bookings(&self, id: Uuid) -> DomainResult<Option<Room>>;

    /// Find all rooms of a hotel, ordered by room number
    async fn find_by_hotel(&self, hotel_id: Uuid) -> DomainResult<Vec<Room>>;

    /// Stage scalar field changes of an existing room
    async fn update(&self, room: Room) -> DomainResult<()>;

    /// Stage removal of a room. Fails with `NotFound` when absent.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
