pub mod bookings;
pub mod health;
pub mod hotels;
pub mod metrics;
pub mod rooms;
