//! Room REST API handlers, scoped under their hotel

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{BriefRoomDto, CreateRoomRequest, FullRoomDto, UpdateRoomRequest};
use crate::application::services::RoomDetails;
use crate::application::RoomService;
use crate::interfaces::http::common::{
    bad_request, domain_error, ApiError, ApiResponse, ValidatedJson,
};

#[derive(Clone)]
pub struct RoomState {
    pub rooms: Arc<RoomService>,
}

#[utoipa::path(
    get,
    path = "/api/hotels/{hotel_id}/rooms",
    tag = "Rooms",
    params(("hotel_id" = Uuid, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Rooms of the hotel", body = ApiResponse<Vec<BriefRoomDto>>)
    )
)]
pub async fn list_rooms(
    State(state): State<RoomState>,
    Path(hotel_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<BriefRoomDto>>>, ApiError> {
    let rooms = state
        .rooms
        .list_for_hotel(hotel_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/hotels/{hotel_id}/rooms/{room_id}",
    tag = "Rooms",
    params(
        ("hotel_id" = Uuid, Path, description = "Hotel ID"),
        ("room_id" = Uuid, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room with hotel and bookings", body = ApiResponse<FullRoomDto>),
        (status = 400, description = "Room belongs to another hotel"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_room(
    State(state): State<RoomState>,
    Path((hotel_id, room_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<FullRoomDto>>, ApiError> {
    let details = state.rooms.get(room_id).await.map_err(domain_error)?;
    ensure_room_in_hotel(&details, hotel_id)?;
    Ok(Json(ApiResponse::success(details.into())))
}

fn ensure_room_in_hotel(details: &RoomDetails, hotel_id: Uuid) -> Result<(), ApiError> {
    if details.room.hotel_id != hotel_id {
        return Err(bad_request(format!(
            "Room {} does not belong to hotel {}",
            details.room.id, hotel_id
        )));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/hotels/{hotel_id}/rooms",
    tag = "Rooms",
    params(("hotel_id" = Uuid, Path, description = "Hotel ID")),
    request_body = CreateRoomRequest,
    responses(
        (status = 200, description = "Created", body = ApiResponse<BriefRoomDto>),
        (status = 400, description = "Hotel mismatch or unknown hotel")
    )
)]
pub async fn create_room(
    State(state): State<RoomState>,
    Path(hotel_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CreateRoomRequest>,
) -> Result<Json<ApiResponse<BriefRoomDto>>, ApiError> {
    if req.hotel_id != hotel_id {
        return Err(bad_request(format!(
            "Body hotel_id {} does not match hotel {}",
            req.hotel_id, hotel_id
        )));
    }
    let room = state.rooms.add(req.into()).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    put,
    path = "/api/hotels/{hotel_id}/rooms/{room_id}",
    tag = "Rooms",
    params(
        ("hotel_id" = Uuid, Path, description = "Hotel ID"),
        ("room_id" = Uuid, Path, description = "Room ID")
    ),
    request_body = UpdateRoomRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Body id does not match path, or room belongs to another hotel"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_room(
    State(state): State<RoomState>,
    Path((hotel_id, room_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<UpdateRoomRequest>,
) -> Result<StatusCode, ApiError> {
    let details = state.rooms.get(room_id).await.map_err(domain_error)?;
    ensure_room_in_hotel(&details, hotel_id)?;
    state
        .rooms
        .update(room_id, req.into())
        .await
        .map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/hotels/{hotel_id}/rooms/{room_id}",
    tag = "Rooms",
    params(
        ("hotel_id" = Uuid, Path, description = "Hotel ID"),
        ("room_id" = Uuid, Path, description = "Room ID")
    ),
    responses(
        (status = 204, description = "Deleted with its bookings"),
        (status = 400, description = "Room belongs to another hotel"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_room(
    State(state): State<RoomState>,
    Path((hotel_id, room_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let details = state.rooms.get(room_id).await.map_err(domain_error)?;
    ensure_room_in_hotel(&details, hotel_id)?;
    state.rooms.delete(room_id).await.map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
