//! Hotel DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::services::{HotelChanges, NewHotel};
use crate::domain::Hotel;
use crate::interfaces::http::modules::rooms::dto::BriefRoomDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BriefHotelDto {
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

/// Hotel with its rooms
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FullHotelDto {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub rooms: Vec<BriefRoomDto>,
}

impl From<Hotel> for BriefHotelDto {
    fn from(h: Hotel) -> Self {
        Self {
            id: h.id,
            name: h.name,
            address: h.address,
        }
    }
}

impl From<Hotel> for FullHotelDto {
    fn from(h: Hotel) -> Self {
        Self {
            id: h.id,
            name: h.name,
            address: h.address,
            rooms: h.rooms.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHotelRequest {
    #[validate(length(min = 1, max = 100, message = "hotel name is required (max 100 characters)"))]
    pub name: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
}

impl From<CreateHotelRequest> for NewHotel {
    fn from(r: CreateHotelRequest) -> Self {
        Self {
            name: r.name,
            address: r.address,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateHotelRequest {
    pub id: Uuid,
    #[validate(length(min = 1, max = 100, message = "hotel name is required (max 100 characters)"))]
    pub name: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
}

impl From<UpdateHotelRequest> for HotelChanges {
    fn from(r: UpdateHotelRequest) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
        }
    }
}
