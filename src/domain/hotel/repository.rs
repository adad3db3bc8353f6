//! Hotel repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Hotel;
use crate::domain::DomainResult;

#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Stage a new hotel
    async fn add(&self, hotel: Hotel) -> DomainResult<()>;

    /// Find hotel by ID, rooms included
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Hotel>>;

    /// Find all hotels (rooms not loaded)
    async fn find_all(&self) -> DomainResult<Vec<Hotel>>;

    /// Stage scalar field changes of an existing hotel
    async fn update(&self, hotel: Hotel) -> DomainResult<()>;

    /// Stage removal of a hotel. Fails with `NotFound` when absent.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
