//! In-memory unit of work for development and testing
//!
//! Mirrors the SeaORM implementation: repository writes are staged in a
//! [`ChangeSet`] and applied by `save_changes`. Foreign keys and cascading
//! deletes are enforced by hand, and a failed save is rolled back from an
//! undo log so the store never keeps half a change set.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{
    Booking, BookingRepository, DomainError, DomainResult, Hotel, HotelRepository, Room,
    RoomRepository, UnitOfWork, UnitOfWorkFactory,
};
use crate::infrastructure::change_set::{ChangeSet, PendingChange};

/// Shared tables. Rows are stored without their child collections.
#[derive(Default)]
pub struct InMemoryStore {
    hotels: DashMap<Uuid, Hotel>,
    rooms: DashMap<Uuid, Room>,
    bookings: DashMap<Uuid, Booking>,
    commit_lock: Mutex<()>,
}

/// Previous state of one row, restored when a save fails
enum Undo {
    Hotel(Uuid, Option<Hotel>),
    Room(Uuid, Option<Room>),
    Booking(Uuid, Option<Booking>),
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hotel_count(&self) -> usize {
        self.hotels.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    fn rooms_of(&self, hotel_id: Uuid) -> Vec<Room> {
        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|r| r.hotel_id == hotel_id)
            .map(|r| r.value().clone())
            .collect();
        rooms.sort_by_key(|r| r.number);
        rooms
    }

    fn bookings_of(&self, room_id: Option<Uuid>) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| room_id.map_or(true, |id| b.room_id == id))
            .map(|b| b.value().clone())
            .collect();
        bookings.sort_by_key(|b| b.period.start());
        bookings
    }

    fn constraint(msg: impl Into<String>) -> DomainError {
        DomainError::Storage(msg.into())
    }

    fn apply(&self, change: PendingChange, undo: &mut Vec<Undo>) -> DomainResult<u64> {
        match change {
            PendingChange::AddHotel(mut h) => {
                if self.hotels.contains_key(&h.id) {
                    return Err(Self::constraint(format!("duplicate hotel id {}", h.id)));
                }
                h.rooms.clear();
                undo.push(Undo::Hotel(h.id, None));
                self.hotels.insert(h.id, h);
            }
            PendingChange::UpdateHotel(mut h) => {
                if !self.hotels.contains_key(&h.id) {
                    return Err(Self::constraint(format!("hotel {} was not updated", h.id)));
                }
                h.rooms.clear();
                undo.push(Undo::Hotel(h.id, self.hotels.insert(h.id, h)));
            }
            PendingChange::DeleteHotel(id) => {
                let room_ids: Vec<Uuid> = self.rooms_of(id).into_iter().map(|r| r.id).collect();
                for room_id in room_ids {
                    self.delete_room(room_id, undo);
                }
                if let Some((_, old)) = self.hotels.remove(&id) {
                    undo.push(Undo::Hotel(id, Some(old)));
                    return Ok(1);
                }
                return Ok(0);
            }
            PendingChange::AddRoom(mut r) => {
                if self.rooms.contains_key(&r.id) {
                    return Err(Self::constraint(format!("duplicate room id {}", r.id)));
                }
                if !self.hotels.contains_key(&r.hotel_id) {
                    return Err(Self::constraint("FOREIGN KEY constraint failed (rooms.hotel_id)"));
                }
                r.bookings.clear();
                undo.push(Undo::Room(r.id, None));
                self.rooms.insert(r.id, r);
            }
            PendingChange::UpdateRoom(mut r) => {
                if !self.rooms.contains_key(&r.id) {
                    return Err(Self::constraint(format!("room {} was not updated", r.id)));
                }
                if !self.hotels.contains_key(&r.hotel_id) {
                    return Err(Self::constraint("FOREIGN KEY constraint failed (rooms.hotel_id)"));
                }
                r.bookings.clear();
                undo.push(Undo::Room(r.id, self.rooms.insert(r.id, r)));
            }
            PendingChange::DeleteRoom(id) => {
                return Ok(self.delete_room(id, undo));
            }
            PendingChange::AddBooking(b) => {
                if self.bookings.contains_key(&b.id) {
                    return Err(Self::constraint(format!("duplicate booking id {}", b.id)));
                }
                if !self.rooms.contains_key(&b.room_id) {
                    return Err(Self::constraint("FOREIGN KEY constraint failed (bookings.room_id)"));
                }
                undo.push(Undo::Booking(b.id, None));
                self.bookings.insert(b.id, b);
            }
            PendingChange::UpdateBooking(b) => {
                if !self.bookings.contains_key(&b.id) {
                    return Err(Self::constraint(format!("booking {} was not updated", b.id)));
                }
                if !self.rooms.contains_key(&b.room_id) {
                    return Err(Self::constraint("FOREIGN KEY constraint failed (bookings.room_id)"));
                }
                undo.push(Undo::Booking(b.id, self.bookings.insert(b.id, b)));
            }
            PendingChange::DeleteBooking(id) => {
                if let Some((_, old)) = self.bookings.remove(&id) {
                    undo.push(Undo::Booking(id, Some(old)));
                    return Ok(1);
                }
                return Ok(0);
            }
        }
        Ok(1)
    }

    /// Remove a room and its bookings. Returns 1 if the room existed.
    fn delete_room(&self, id: Uuid, undo: &mut Vec<Undo>) -> u64 {
        let booking_ids: Vec<Uuid> = self.bookings_of(Some(id)).into_iter().map(|b| b.id).collect();
        for booking_id in booking_ids {
            if let Some((_, old)) = self.bookings.remove(&booking_id) {
                undo.push(Undo::Booking(booking_id, Some(old)));
            }
        }
        match self.rooms.remove(&id) {
            Some((_, old)) => {
                undo.push(Undo::Room(id, Some(old)));
                1
            }
            None => 0,
        }
    }

    fn rollback(&self, undo: Vec<Undo>) {
        for entry in undo.into_iter().rev() {
            match entry {
                Undo::Hotel(id, Some(old)) => {
                    self.hotels.insert(id, old);
                }
                Undo::Hotel(id, None) => {
                    self.hotels.remove(&id);
                }
                Undo::Room(id, Some(old)) => {
                    self.rooms.insert(id, old);
                }
                Undo::Room(id, None) => {
                    self.rooms.remove(&id);
                }
                Undo::Booking(id, Some(old)) => {
                    self.bookings.insert(id, old);
                }
                Undo::Booking(id, None) => {
                    self.bookings.remove(&id);
                }
            }
        }
    }

    async fn commit(&self, pending: Vec<PendingChange>) -> DomainResult<u64> {
        let _guard = self.commit_lock.lock().await;
        let mut undo = Vec::new();
        let mut affected = 0;

        for change in pending {
            match self.apply(change, &mut undo) {
                Ok(n) => affected += n,
                Err(e) => {
                    self.rollback(undo);
                    return Err(e);
                }
            }
        }
        Ok(affected)
    }
}

// ── Repositories ────────────────────────────────────────────────

pub struct InMemoryHotelRepository {
    store: Arc<InMemoryStore>,
    changes: ChangeSet,
}

#[async_trait]
impl HotelRepository for InMemoryHotelRepository {
    async fn add(&self, hotel: Hotel) -> DomainResult<()> {
        self.changes.stage(PendingChange::AddHotel(hotel)).await;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Hotel>> {
        let Some(mut hotel) = self.store.hotels.get(&id).map(|h| h.value().clone()) else {
            return Ok(None);
        };
        hotel.rooms = self.store.rooms_of(id);
        Ok(Some(hotel))
    }

    async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        let mut hotels: Vec<Hotel> = self.store.hotels.iter().map(|h| h.value().clone()).collect();
        hotels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hotels)
    }

    async fn update(&self, hotel: Hotel) -> DomainResult<()> {
        self.changes.stage(PendingChange::UpdateHotel(hotel)).await;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.store.hotels.contains_key(&id) {
            return Err(DomainError::not_found("Hotel", id));
        }
        self.changes.stage(PendingChange::DeleteHotel(id)).await;
        Ok(())
    }
}

pub struct InMemoryRoomRepository {
    store: Arc<InMemoryStore>,
    changes: ChangeSet,
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn add(&self, room: Room) -> DomainResult<()> {
        self.changes.stage(PendingChange::AddRoom(room)).await;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Room>> {
        Ok(self.store.rooms.get(&id).map(|r| r.value().clone()))
    }

    async fn find_with_bookings(&self, id: Uuid) -> DomainResult<Option<Room>> {
        let Some(mut room) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        room.bookings = self.store.bookings_of(Some(id));
        Ok(Some(room))
    }

    async fn find_by_hotel(&self, hotel_id: Uuid) -> DomainResult<Vec<Room>> {
        Ok(self.store.rooms_of(hotel_id))
    }

    async fn update(&self, room: Room) -> DomainResult<()> {
        self.changes.stage(PendingChange::UpdateRoom(room)).await;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.store.rooms.contains_key(&id) {
            return Err(DomainError::not_found("Room", id));
        }
        self.changes.stage(PendingChange::DeleteRoom(id)).await;
        Ok(())
    }
}

pub struct InMemoryBookingRepository {
    store: Arc<InMemoryStore>,
    changes: ChangeSet,
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn add(&self, booking: Booking) -> DomainResult<()> {
        self.changes.stage(PendingChange::AddBooking(booking)).await;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        Ok(self.store.bookings.get(&id).map(|b| b.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        Ok(self.store.bookings_of(None))
    }

    async fn find_by_room(&self, room_id: Uuid) -> DomainResult<Vec<Booking>> {
        Ok(self.store.bookings_of(Some(room_id)))
    }

    async fn update(&self, booking: Booking) -> DomainResult<()> {
        self.changes.stage(PendingChange::UpdateBooking(booking)).await;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.store.bookings.contains_key(&id) {
            return Err(DomainError::not_found("Booking", id));
        }
        self.changes.stage(PendingChange::DeleteBooking(id)).await;
        Ok(())
    }
}

// ── Unit of work ────────────────────────────────────────────────

pub struct InMemoryUnitOfWork {
    store: Arc<InMemoryStore>,
    changes: ChangeSet,
    hotels: InMemoryHotelRepository,
    rooms: InMemoryRoomRepository,
    bookings: InMemoryBookingRepository,
}

impl InMemoryUnitOfWork {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        let changes = ChangeSet::new();
        Self {
            hotels: InMemoryHotelRepository {
                store: store.clone(),
                changes: changes.clone(),
            },
            rooms: InMemoryRoomRepository {
                store: store.clone(),
                changes: changes.clone(),
            },
            bookings: InMemoryBookingRepository {
                store: store.clone(),
                changes: changes.clone(),
            },
            store,
            changes,
        }
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn hotels(&self) -> &dyn HotelRepository {
        &self.hotels
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    async fn save_changes(&self) -> DomainResult<u64> {
        let pending = self.changes.take().await;
        self.store.commit(pending).await
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUnitOfWorkFactory {
    store: Arc<InMemoryStore>,
}

impl InMemoryUnitOfWorkFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tables every unit of work opened by this factory writes to
    pub fn store(&self) -> Arc<InMemoryStore> {
        self.store.clone()
    }
}

impl UnitOfWorkFactory for InMemoryUnitOfWorkFactory {
    fn begin(&self) -> Box<dyn UnitOfWork> {
        Box::new(InMemoryUnitOfWork::new(self.store.clone()))
    }
}

// ── Tests ──────────────────────────────────────────────────────
