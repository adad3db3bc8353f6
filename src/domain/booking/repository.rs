//! Booking repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Booking;
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Stage a new booking
    async fn add(&self, booking: Booking) -> DomainResult<()>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>>;

    /// All bookings, ordered by start
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Bookings of one room, ordered by start
    async fn find_by_room(&self, room_id: Uuid) -> DomainResult<Vec<Booking>>;

    /// Stage scalar field changes of an existing booking
    async fn update(&self, booking: Booking) -> DomainResult<()>;

    /// Stage removal of a booking. Fails with `NotFound` when absent.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
