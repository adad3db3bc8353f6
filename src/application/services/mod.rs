//! Application services
//!
//! Each operation opens its own unit of work from the shared factory.

pub mod availability;
pub mod bookings;
pub mod hotels;
pub mod rooms;

pub use availability::ensure_room_is_available;
pub use bookings::{BookingChanges, BookingDetails, BookingService, NewBooking};
pub use hotels::{HotelChanges, HotelService, NewHotel};
pub use rooms::{NewRoom, RoomChanges, RoomDetails, RoomService};
