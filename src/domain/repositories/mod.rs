//! Unit of work for the domain layer
//!
//! - `UnitOfWork`: per-entity repositories plus a single "save all pending
//!   changes" operation
//! - `UnitOfWorkFactory`: opens a fresh unit of work per operation
//! - `DomainResult`: standard result type for domain operations

use async_trait::async_trait;

use super::booking::BookingRepository;
use super::hotel::HotelRepository;
use super::room::RoomRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Aggregates the repositories that share one change set.
///
/// Repository writes (`add`, `update`, `delete`) are only staged; nothing
/// reaches the store until [`UnitOfWork::save_changes`] succeeds. Reads
/// always observe persisted state.
///
/// ```ignore
/// let uow = factory.begin();
/// uow.hotels().add(Hotel::new("Grand", "1 Main St")).await?;
/// uow.save_changes().await?;
/// ```
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn hotels(&self) -> &dyn HotelRepository;
    fn rooms(&self) -> &dyn RoomRepository;
    fn bookings(&self) -> &dyn BookingRepository;

    /// Apply all staged changes atomically. Returns the number of
    /// records written.
    async fn save_changes(&self) -> DomainResult<u64>;
}

pub trait UnitOfWorkFactory: Send + Sync {
    fn begin(&self) -> Box<dyn UnitOfWork>;
}
