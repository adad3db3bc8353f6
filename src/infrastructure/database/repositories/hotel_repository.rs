//! SeaORM implementation of HotelRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::room_repository;
use crate::domain::{DomainError, DomainResult, Hotel, HotelRepository};
use crate::infrastructure::change_set::{ChangeSet, PendingChange};
use crate::infrastructure::database::entities::{hotel, room};

pub struct SeaOrmHotelRepository {
    db: DatabaseConnection,
    changes: ChangeSet,
}

impl SeaOrmHotelRepository {
    pub fn new(db: DatabaseConnection, changes: ChangeSet) -> Self {
        Self { db, changes }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn model_to_domain(m: hotel::Model) -> Hotel {
    Hotel {
        id: m.id,
        name: m.name,
        address: m.address,
        rooms: Vec::new(),
    }
}

pub(super) fn domain_to_active(h: &Hotel) -> hotel::ActiveModel {
    use sea_orm::Set;

    hotel::ActiveModel {
        id: Set(h.id),
        name: Set(h.name.clone()),
        address: Set(h.address.clone()),
    }
}

// ── HotelRepository impl ────────────────────────────────────────

#[async_trait]
impl HotelRepository for SeaOrmHotelRepository {
    async fn add(&self, hotel: Hotel) -> DomainResult<()> {
        debug!("Staging new hotel: {}", hotel.id);
        self.changes.stage(PendingChange::AddHotel(hotel)).await;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Hotel>> {
        let Some(model) = hotel::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let rooms = room::Entity::find()
            .filter(room::Column::HotelId.eq(id))
            .order_by_asc(room::Column::Number)
            .all(&self.db)
            .await?
            .into_iter()
            .map(room_repository::model_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;

        let mut hotel = model_to_domain(model);
        hotel.rooms = rooms;
        Ok(Some(hotel))
    }

    async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        let models = hotel::Entity::find()
            .order_by_asc(hotel::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, hotel: Hotel) -> DomainResult<()> {
        debug!("Staging hotel update: {}", hotel.id);
        self.changes.stage(PendingChange::UpdateHotel(hotel)).await;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let exists = hotel::Entity::find_by_id(id).one(&self.db).await?.is_some();
        if !exists {
            return Err(DomainError::not_found("Hotel", id));
        }

        debug!("Staging hotel removal: {}", id);
        self.changes.stage(PendingChange::DeleteHotel(id)).await;
        Ok(())
    }
}
