pub mod services;

pub use services::{BookingService, HotelService, RoomService};
