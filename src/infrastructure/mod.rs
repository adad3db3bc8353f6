//! Infrastructure layer - external concerns

pub mod change_set;
pub mod database;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SeaOrmUnitOfWorkFactory};
pub use storage::InMemoryUnitOfWorkFactory;
