//! Database repository implementations
//!
//! Per-entity SeaORM repositories + the unit of work that owns them.

pub mod booking_repository;
pub mod hotel_repository;
pub mod room_repository;
pub mod unit_of_work;

pub use unit_of_work::{SeaOrmUnitOfWork, SeaOrmUnitOfWorkFactory};
