//! Booking REST API handlers
//!
//! Writes go through `/api/rooms/{room_id}/book`; `/api/bookings` is the
//! read-only view across all rooms.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{BriefBookingDto, CreateBookingRequest, FullBookingDto, UpdateBookingRequest};
use crate::application::BookingService;
use crate::interfaces::http::common::{
    bad_request, domain_error, ApiError, ApiResponse, ValidatedJson,
};

#[derive(Clone)]
pub struct BookingState {
    pub bookings: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "All bookings", body = ApiResponse<Vec<BriefBookingDto>>)
    )
)]
pub async fn list_bookings(
    State(state): State<BookingState>,
) -> Result<Json<ApiResponse<Vec<BriefBookingDto>>>, ApiError> {
    let bookings = state.bookings.list().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/bookings/{booking_id}",
    tag = "Bookings",
    params(("booking_id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking with its room", body = ApiResponse<FullBookingDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<FullBookingDto>>, ApiError> {
    let details = state.bookings.get(booking_id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    get,
    path = "/api/rooms/{room_id}/book",
    tag = "Bookings",
    params(("room_id" = Uuid, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Bookings of the room", body = ApiResponse<Vec<BriefBookingDto>>)
    )
)]
pub async fn list_room_bookings(
    State(state): State<BookingState>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<BriefBookingDto>>>, ApiError> {
    let bookings = state
        .bookings
        .list_for_room(room_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/rooms/{room_id}/book",
    tag = "Bookings",
    params(("room_id" = Uuid, Path, description = "Room ID")),
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booked", body = ApiResponse<BriefBookingDto>),
        (status = 400, description = "Room mismatch, unknown room, or room already booked"),
        (status = 422, description = "Field validation failed")
    )
)]
pub async fn create_booking(
    State(state): State<BookingState>,
    Path(room_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> Result<Json<ApiResponse<BriefBookingDto>>, ApiError> {
    if req.room_id != room_id {
        return Err(bad_request(format!(
            "Body room_id {} does not match room {}",
            req.room_id, room_id
        )));
    }
    let booking = state.bookings.add(req.into()).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    put,
    path = "/api/rooms/{room_id}/book/{booking_id}",
    tag = "Bookings",
    params(
        ("room_id" = Uuid, Path, description = "Room ID"),
        ("booking_id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Id or room mismatch, unknown room, or room already booked"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_booking(
    State(state): State<BookingState>,
    Path((room_id, booking_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<UpdateBookingRequest>,
) -> Result<StatusCode, ApiError> {
    if req.room_id != room_id {
        return Err(bad_request(format!(
            "Body room_id {} does not match room {}",
            req.room_id, room_id
        )));
    }
    state
        .bookings
        .update(booking_id, req.into())
        .await
        .map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/rooms/{room_id}/book/{booking_id}",
    tag = "Bookings",
    params(
        ("room_id" = Uuid, Path, description = "Room ID"),
        ("booking_id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 204, description = "Cancelled"),
        (status = 400, description = "Booking belongs to another room"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_booking(
    State(state): State<BookingState>,
    Path((room_id, booking_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let details = state.bookings.get(booking_id).await.map_err(domain_error)?;
    if details.booking.room_id != room_id {
        return Err(bad_request(format!(
            "Booking {} does not belong to room {}",
            booking_id, room_id
        )));
    }
    state
        .bookings
        .delete(booking_id)
        .await
        .map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
