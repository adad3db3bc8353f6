//! Booking DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::services::{BookingChanges, BookingDetails, NewBooking};
use crate::domain::Booking;
use crate::interfaces::http::modules::rooms::dto::BriefRoomDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BriefBookingDto {
    pub id: Uuid,
    pub tenant_name: String,
    pub tenant_passport_number: String,
    pub tenant_phone_number: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub room_id: Uuid,
}

/// Booking with the room it occupies
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FullBookingDto {
    pub id: Uuid,
    pub tenant_name: String,
    pub tenant_passport_number: String,
    pub tenant_phone_number: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub room: BriefRoomDto,
}

impl From<Booking> for BriefBookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            start: b.period.start(),
            end: b.period.end(),
            tenant_name: b.tenant_name,
            tenant_passport_number: b.tenant_passport_number,
            tenant_phone_number: b.tenant_phone_number,
            room_id: b.room_id,
        }
    }
}

impl From<BookingDetails> for FullBookingDto {
    fn from(d: BookingDetails) -> Self {
        let BookingDetails { booking, room } = d;
        Self {
            id: booking.id,
            start: booking.period.start(),
            end: booking.period.end(),
            tenant_name: booking.tenant_name,
            tenant_passport_number: booking.tenant_passport_number,
            tenant_phone_number: booking.tenant_phone_number,
            room: room.into(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, max = 100, message = "tenant name is required (max 100 characters)"))]
    pub tenant_name: String,
    #[validate(length(min = 1, max = 20, message = "passport number is required (max 20 characters)"))]
    pub tenant_passport_number: String,
    #[validate(length(min = 1, max = 20, message = "phone number is required (max 20 characters)"))]
    pub tenant_phone_number: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub room_id: Uuid,
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(r: CreateBookingRequest) -> Self {
        Self {
            tenant_name: r.tenant_name,
            tenant_passport_number: r.tenant_passport_number,
            tenant_phone_number: r.tenant_phone_number,
            start: r.start,
            end: r.end,
            room_id: r.room_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingRequest {
    pub id: Uuid,
    #[validate(length(min = 1, max = 100, message = "tenant name is required (max 100 characters)"))]
    pub tenant_name: String,
    #[validate(length(min = 1, max = 20, message = "passport number is required (max 20 characters)"))]
    pub tenant_passport_number: String,
    #[validate(length(min = 1, max = 20, message = "phone number is required (max 20 characters)"))]
    pub tenant_phone_number: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub room_id: Uuid,
}

impl From<UpdateBookingRequest> for BookingChanges {
    fn from(r: UpdateBookingRequest) -> Self {
        Self {
            id: r.id,
            tenant_name: r.tenant_name,
            tenant_passport_number: r.tenant_passport_number,
            tenant_phone_number: r.tenant_phone_number,
            start: r.start,
            end: r.end,
            room_id: r.room_id,
        }
    }
}
