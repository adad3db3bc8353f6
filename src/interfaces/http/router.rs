//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::modules::{bookings, health, hotels, metrics, rooms};
use crate::application::{BookingService, HotelService, RoomService};
use crate::domain::UnitOfWorkFactory;

/// Everything the router needs from the running process
pub struct ApiContext {
    pub db: DatabaseConnection,
    pub uow: Arc<dyn UnitOfWorkFactory>,
    pub metrics: PrometheusHandle,
}

/// Unified state for hotel, room and booking routes.
/// Axum extracts each handler's own state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub hotels: Arc<HotelService>,
    pub rooms: Arc<RoomService>,
    pub bookings: Arc<BookingService>,
}

impl ApiState {
    pub fn new(uow: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self {
            hotels: Arc::new(HotelService::new(uow.clone())),
            rooms: Arc::new(RoomService::new(uow.clone())),
            bookings: Arc::new(BookingService::new(uow)),
        }
    }
}

impl FromRef<ApiState> for hotels::HotelState {
    fn from_ref(s: &ApiState) -> Self {
        hotels::HotelState {
            hotels: Arc::clone(&s.hotels),
        }
    }
}

impl FromRef<ApiState> for rooms::RoomState {
    fn from_ref(s: &ApiState) -> Self {
        rooms::RoomState {
            rooms: Arc::clone(&s.rooms),
        }
    }
}

impl FromRef<ApiState> for bookings::BookingState {
    fn from_ref(s: &ApiState) -> Self {
        bookings::BookingState {
            bookings: Arc::clone(&s.bookings),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Hotels
        hotels::list_hotels,
        hotels::get_hotel,
        hotels::create_hotel,
        hotels::update_hotel,
        hotels::delete_hotel,
        // Rooms
        rooms::list_rooms,
        rooms::get_room,
        rooms::create_room,
        rooms::update_room,
        rooms::delete_room,
        // Bookings
        bookings::list_bookings,
        bookings::get_booking,
        bookings::list_room_bookings,
        bookings::create_booking,
        bookings::update_booking,
        bookings::delete_booking,
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Hotels", description = "Hotel management"),
        (name = "Rooms", description = "Rooms of a hotel"),
        (name = "Bookings", description = "Room bookings with double-booking protection")
    ),
    info(
        title = "Hotel Booking API",
        description = "Hotels, rooms and bookings. A room cannot be booked twice for overlapping stays."
    )
)]
pub struct ApiDoc;

/// Build the full application router
pub fn create_api_router(ctx: ApiContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/hotels", get(hotels::list_hotels).post(hotels::create_hotel))
        .route(
            "/hotels/{hotel_id}",
            get(hotels::get_hotel)
                .put(hotels::update_hotel)
                .delete(hotels::delete_hotel),
        )
        .route(
            "/hotels/{hotel_id}/rooms",
            get(rooms::list_rooms).post(rooms::create_room),
        )
        .route(
            "/hotels/{hotel_id}/rooms/{room_id}",
            get(rooms::get_room)
                .put(rooms::update_room)
                .delete(rooms::delete_room),
        )
        .route(
            "/rooms/{room_id}/book",
            get(bookings::list_room_bookings).post(bookings::create_booking),
        )
        .route(
            "/rooms/{room_id}/book/{booking_id}",
            axum::routing::put(bookings::update_booking).delete(bookings::delete_booking),
        )
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings/{booking_id}", get(bookings::get_booking))
        .with_state(ApiState::new(ctx.uow));

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: ctx.db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: ctx.metrics,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api", api_routes)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
