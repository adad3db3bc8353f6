//! Room aggregate
//!
//! Contains the Room entity, its enumerations, and repository interface.

pub mod model;
pub mod repository;

pub use model::{Room, RoomCapacity, RoomType};
pub use repository::RoomRepository;
