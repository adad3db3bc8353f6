//! Room DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::services::{NewRoom, RoomChanges, RoomDetails};
use crate::domain::{Room, RoomCapacity, RoomType};
use crate::interfaces::http::modules::bookings::dto::BriefBookingDto;
use crate::interfaces::http::modules::hotels::dto::BriefHotelDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BriefRoomDto {
    pub id: Uuid,
    pub number: i32,
    pub room_type: RoomType,
    pub capacity: RoomCapacity,
    pub hotel_id: Uuid,
}

/// Room with its hotel and bookings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FullRoomDto {
    pub id: Uuid,
    pub number: i32,
    pub room_type: RoomType,
    pub capacity: RoomCapacity,
    pub hotel: BriefHotelDto,
    pub bookings: Vec<BriefBookingDto>,
}

impl From<Room> for BriefRoomDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            number: r.number,
            room_type: r.room_type,
            capacity: r.capacity,
            hotel_id: r.hotel_id,
        }
    }
}

impl From<RoomDetails> for FullRoomDto {
    fn from(d: RoomDetails) -> Self {
        let RoomDetails { room, hotel } = d;
        Self {
            id: room.id,
            number: room.number,
            room_type: room.room_type,
            capacity: room.capacity,
            hotel: hotel.into(),
            bookings: room.bookings.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    pub number: i32,
    pub room_type: RoomType,
    pub capacity: RoomCapacity,
    pub hotel_id: Uuid,
}

impl From<CreateRoomRequest> for NewRoom {
    fn from(r: CreateRoomRequest) -> Self {
        Self {
            number: r.number,
            room_type: r.room_type,
            capacity: r.capacity,
            hotel_id: r.hotel_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomRequest {
    pub id: Uuid,
    pub number: i32,
    pub room_type: RoomType,
    pub capacity: RoomCapacity,
}

impl From<UpdateRoomRequest> for RoomChanges {
    fn from(r: UpdateRoomRequest) -> Self {
        Self {
            id: r.id,
            number: r.number,
            room_type: r.room_type,
            capacity: r.capacity,
        }
    }
}
