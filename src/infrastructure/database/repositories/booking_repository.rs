//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::domain::{Booking, BookingRepository, DomainError, DomainResult, StayPeriod};
use crate::infrastructure::change_set::{ChangeSet, PendingChange};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
    changes: ChangeSet,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection, changes: ChangeSet) -> Self {
        Self { db, changes }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    Ok(Booking {
        id: m.id,
        tenant_name: m.tenant_name,
        tenant_passport_number: m.tenant_passport_number,
        tenant_phone_number: m.tenant_phone_number,
        period: StayPeriod::new(m.start_date, m.end_date)?,
        room_id: m.room_id,
    })
}

pub(super) fn domain_to_active(b: &Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id),
        tenant_name: Set(b.tenant_name.clone()),
        tenant_passport_number: Set(b.tenant_passport_number.clone()),
        tenant_phone_number: Set(b.tenant_phone_number.clone()),
        start_date: Set(b.period.start()),
        end_date: Set(b.period.end()),
        room_id: Set(b.room_id),
    }
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn add(&self, booking: Booking) -> DomainResult<()> {
        debug!("Staging new booking {} for room {}", booking.id, booking.room_id);
        self.changes.stage(PendingChange::AddBooking(booking)).await;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        booking::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        booking::Entity::find()
            .order_by_asc(booking::Column::StartDate)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn find_by_room(&self, room_id: Uuid) -> DomainResult<Vec<Booking>> {
        booking::Entity::find()
            .filter(booking::Column::RoomId.eq(room_id))
            .order_by_asc(booking::Column::StartDate)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn update(&self, booking: Booking) -> DomainResult<()> {
        debug!("Staging booking update: {}", booking.id);
        self.changes.stage(PendingChange::UpdateBooking(booking)).await;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let exists = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Booking", id));
        }

        debug!("Staging booking removal: {}", id);
        self.changes.stage(PendingChange::DeleteBooking(id)).await;
        Ok(())
    }
}
