//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::booking_repository;
use crate::domain::{DomainError, DomainResult, Room, RoomRepository};
use crate::infrastructure::change_set::{ChangeSet, PendingChange};
use crate::infrastructure::database::entities::{booking, room};

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
    changes: ChangeSet,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection, changes: ChangeSet) -> Self {
        Self { db, changes }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn model_to_domain(m: room::Model) -> DomainResult<Room> {
    Ok(Room {
        id: m.id,
        number: m.number,
        room_type: m.room_type.parse()?,
        capacity: m.capacity.parse()?,
        hotel_id: m.hotel_id,
        bookings: Vec::new(),
    })
}

pub(super) fn domain_to_active(r: &Room) -> room::ActiveModel {
    room::ActiveModel {
        id: Set(r.id),
        number: Set(r.number),
        room_type: Set(r.room_type.as_str().to_string()),
        capacity: Set(r.capacity.as_str().to_string()),
        hotel_id: Set(r.hotel_id),
    }
}

// ── RoomRepository impl ─────────────────────────────────────────

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn add(&self, room: Room) -> DomainResult<()> {
        debug!("Staging new room {} in hotel {}", room.number, room.hotel_id);
        self.changes.stage(PendingChange::AddRoom(room)).await;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Room>> {
        room::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_with_bookings(&self, id: Uuid) -> DomainResult<Option<Room>> {
        let Some(mut room) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        room.bookings = booking::Entity::find()
            .filter(booking::Column::RoomId.eq(id))
            .order_by_asc(booking::Column::StartDate)
            .all(&self.db)
            .await?
            .into_iter()
            .map(booking_repository::model_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Some(room))
    }

    async fn find_by_hotel(&self, hotel_id: Uuid) -> DomainResult<Vec<Room>> {
        room::Entity::find()
            .filter(room::Column::HotelId.eq(hotel_id))
            .order_by_asc(room::Column::Number)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn update(&self, room: Room) -> DomainResult<()> {
        debug!("Staging room update: {}", room.id);
        self.changes.stage(PendingChange::UpdateRoom(room)).await;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let exists = room::Entity::find_by_id(id).one(&self.db).await?.is_some();
        if !exists {
            return Err(DomainError::not_found("Room", id));
        }

        debug!("Staging room removal: {}", id);
        self.changes.stage(PendingChange::DeleteRoom(id)).await;
        Ok(())
    }
}
