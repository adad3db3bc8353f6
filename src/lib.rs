//! # Hotel Booking API
//!
//! Manages hotels, their rooms and room bookings. A room can never hold
//! two bookings whose stays overlap.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: entities, the stay-period overlap rule, repository and
//!   unit-of-work traits
//! - **application**: hotel, room and booking services, availability check
//! - **infrastructure**: SeaORM (SQLite) and in-memory units of work
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: error taxonomy and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig};
pub use interfaces::http::create_api_router;
