//! Hotel domain entity

use uuid::Uuid;

use crate::domain::room::Room;

/// A hotel and the rooms it owns.
///
/// `rooms` is only populated by lookups that load the aggregate
/// (`HotelRepository::find_by_id`); list queries leave it empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub rooms: Vec<Room>,
}

impl Hotel {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address: address.into(),
            rooms: Vec::new(),
        }
    }
}
