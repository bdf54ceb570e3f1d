use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::entity::{Activity, Attendance, Department, Employee, LeaveRequest, Payment, Penalty};
use crate::form::Form;
use crate::handlers;
use crate::state::AppState;
use crate::view::Listing;

pub mod health;

/// API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: true,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: false,
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn success_msg(message: impl Into<String>) -> Self {
        Self {
            code: true,
            message: message.into(),
            data: None,
        }
    }
}

/// List, open, create, update and delete routes of one entity page
fn entity_routes<E: Listing + Form>() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list::<E>).post(handlers::create::<E>))
        .route(
            "/:id",
            get(handlers::get::<E>)
                .put(handlers::update::<E>)
                .delete(handlers::remove::<E>),
        )
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Employee lookups
        .route("/employees/search", get(handlers::employee::search))
        .route(
            "/employees/by-department/:department",
            get(handlers::employee::by_department),
        )
        .route(
            "/employees/:id/leave-requests",
            get(handlers::employee::leave_requests),
        )
        .route("/employees/:id/attendance", get(handlers::employee::attendance))
        .route("/employees/:id/activities", get(handlers::employee::activities))
        .route(
            "/activities/by-type/:kind",
            get(handlers::employee::activities_by_type),
        )
        .route(
            "/attendance/by-date/:date",
            get(handlers::employee::attendance_by_date),
        )
        // Leave request decisions
        .route("/leave-requests/by-status", get(handlers::leave_request::by_status))
        .route("/leave-requests/:id/approve", post(handlers::leave_request::approve))
        .route("/leave-requests/:id/reject", post(handlers::leave_request::reject))
        // Entity pages
        .nest("/employees", entity_routes::<Employee>())
        .nest("/departments", entity_routes::<Department>())
        .nest("/activities", entity_routes::<Activity>())
        .nest("/attendance", entity_routes::<Attendance>())
        .nest("/leave-requests", entity_routes::<LeaveRequest>())
        .nest("/payments", entity_routes::<Payment>())
        .nest("/penalties", entity_routes::<Penalty>());

    Router::new()
        .nest("/api", api_routes)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Fallback handler for 404
pub async fn fallback() -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error("Not Found")))
}
