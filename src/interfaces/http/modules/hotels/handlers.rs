//! Hotel REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{BriefHotelDto, CreateHotelRequest, FullHotelDto, UpdateHotelRequest};
use crate::application::HotelService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct HotelState {
    pub hotels: Arc<HotelService>,
}

#[utoipa::path(
    get,
    path = "/api/hotels",
    tag = "Hotels",
    responses(
        (status = 200, description = "Hotel list", body = ApiResponse<Vec<BriefHotelDto>>)
    )
)]
pub async fn list_hotels(
    State(state): State<HotelState>,
) -> Result<Json<ApiResponse<Vec<BriefHotelDto>>>, ApiError> {
    let hotels = state.hotels.list().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        hotels.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/hotels/{hotel_id}",
    tag = "Hotels",
    params(("hotel_id" = Uuid, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Hotel with its rooms", body = ApiResponse<FullHotelDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_hotel(
    State(state): State<HotelState>,
    Path(hotel_id): Path<Uuid>,
) -> Result<Json<ApiResponse<FullHotelDto>>, ApiError> {
    let hotel = state.hotels.get(hotel_id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(hotel.into())))
}

#[utoipa::path(
    post,
    path = "/api/hotels",
    tag = "Hotels",
    request_body = CreateHotelRequest,
    responses(
        (status = 200, description = "Created", body = ApiResponse<BriefHotelDto>),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Field validation failed")
    )
)]
pub async fn create_hotel(
    State(state): State<HotelState>,
    ValidatedJson(req): ValidatedJson<CreateHotelRequest>,
) -> Result<Json<ApiResponse<BriefHotelDto>>, ApiError> {
    let hotel = state.hotels.add(req.into()).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(hotel.into())))
}

#[utoipa::path(
    put,
    path = "/api/hotels/{hotel_id}",
    tag = "Hotels",
    params(("hotel_id" = Uuid, Path, description = "Hotel ID")),
    request_body = UpdateHotelRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Body id does not match path"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_hotel(
    State(state): State<HotelState>,
    Path(hotel_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateHotelRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .hotels
        .update(hotel_id, req.into())
        .await
        .map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/hotels/{hotel_id}",
    tag = "Hotels",
    params(("hotel_id" = Uuid, Path, description = "Hotel ID")),
    responses(
        (status = 204, description = "Deleted with its rooms and bookings"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_hotel(
    State(state): State<HotelState>,
    Path(hotel_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.hotels.delete(hotel_id).await.map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
