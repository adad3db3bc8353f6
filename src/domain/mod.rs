//! Domain layer: entities, value objects and persistence contracts

pub mod booking;
pub mod hotel;
pub mod repositories;
pub mod room;

pub use booking::{Booking, BookingRepository, StayPeriod};
pub use hotel::{Hotel, HotelRepository};
pub use repositories::{DomainResult, UnitOfWork, UnitOfWorkFactory};
pub use room::{Room, RoomCapacity, RoomRepository, RoomType};

pub use crate::shared::errors::DomainError;
