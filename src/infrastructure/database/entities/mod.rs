//! Database entities module

pub mod booking;
pub mod hotel;
pub mod room;

pub use booking::Entity as Booking;
pub use hotel::Entity as Hotel;
pub use room::Entity as Room;
