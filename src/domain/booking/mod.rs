//! Booking aggregate

pub mod model;
pub mod repository;

pub use model::{Booking, StayPeriod};
pub use repository::BookingRepository;
