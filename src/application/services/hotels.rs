//! Hotel management service

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, Hotel, UnitOfWorkFactory};

/// Input for creating a hotel
#[derive(Debug, Clone)]
pub struct NewHotel {
    pub name: String,
    pub address: String,
}

/// Replacement scalar fields for an existing hotel
#[derive(Debug, Clone)]
pub struct HotelChanges {
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

impl HotelChanges {
    fn apply_to(self, hotel: &mut Hotel) {
        hotel.name = self.name;
        hotel.address = self.address;
    }
}

pub struct HotelService {
    uow: Arc<dyn UnitOfWorkFactory>,
}

impl HotelService {
    pub fn new(uow: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow }
    }

    pub async fn add(&self, input: NewHotel) -> DomainResult<Hotel> {
        let uow = self.uow.begin();
        let hotel = Hotel::new(input.name, input.address);

        uow.hotels().add(hotel.clone()).await?;
        uow.save_changes().await?;

        info!(hotel_id = %hotel.id, name = %hotel.name, "Hotel created");
        Ok(hotel)
    }

    /// Hotel with its rooms
    pub async fn get(&self, id: Uuid) -> DomainResult<Hotel> {
        self.uow
            .begin()
            .hotels()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotel", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Hotel>> {
        self.uow.begin().hotels().find_all().await
    }

    pub async fn update(&self, id: Uuid, changes: HotelChanges) -> DomainResult<()> {
        if changes.id != id {
            return Err(DomainError::Validation(format!(
                "Hotel id {} does not match body id {}",
                id, changes.id
            )));
        }

        let uow = self.uow.begin();
        let mut hotel = uow
            .hotels()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotel", id))?;

        changes.apply_to(&mut hotel);
        uow.hotels().update(hotel).await?;
        uow.save_changes().await?;

        info!(hotel_id = %id, "Hotel updated");
        Ok(())
    }

    /// Remove a hotel together with its rooms and their bookings
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let uow = self.uow.begin();
        uow.hotels().delete(id).await?;
        uow.save_changes().await?;

        info!(hotel_id = %id, "Hotel deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryUnitOfWorkFactory;

    fn service() -> (HotelService, InMemoryUnitOfWorkFactory) {
        let factory = InMemoryUnitOfWorkFactory::new();
        (HotelService::new(Arc::new(factory.clone())), factory)
    }

    fn grand() -> NewHotel {
        NewHotel {
            name: "Grand".into(),
            address: "1 Main St".into(),
        }
    }

    #[tokio::test]
    async fn add_then_get() {
        let (svc, _) = service();
        let hotel = svc.add(grand()).await.unwrap();

        let stored = svc.get(hotel.id).await.unwrap();
        assert_eq!(stored.name, "Grand");
        assert!(stored.rooms.is_empty());
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (svc, _) = service();
        let err = svc.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Hotel", .. }));
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let (svc, _) = service();
        let hotel = svc.add(grand()).await.unwrap();

        svc.update(
            hotel.id,
            HotelChanges {
                id: hotel.id,
                name: "Grand Plaza".into(),
                address: "2 Main St".into(),
            },
        )
        .await
        .unwrap();

        let stored = svc.get(hotel.id).await.unwrap();
        assert_eq!(stored.name, "Grand Plaza");
        assert_eq!(stored.address, "2 Main St");
    }

    #[tokio::test]
    async fn update_with_mismatched_id_changes_nothing() {
        let (svc, _) = service();
        let hotel = svc.add(grand()).await.unwrap();

        let err = svc
            .update(
                hotel.id,
                HotelChanges {
                    id: Uuid::new_v4(),
                    name: "Other".into(),
                    address: "Elsewhere".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(svc.get(hotel.id).await.unwrap().name, "Grand");
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let (svc, _) = service();
        let id = Uuid::new_v4();
        let err = svc
            .update(
                id,
                HotelChanges {
                    id,
                    name: "Ghost".into(),
                    address: "Nowhere".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_missing_leaves_store_unchanged() {
        let (svc, factory) = service();
        svc.add(grand()).await.unwrap();

        let err = svc.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(factory.store().hotel_count(), 1);
    }
}
