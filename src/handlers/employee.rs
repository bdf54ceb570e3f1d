//! Employee lookups that go straight to the backend

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::entity::{Activity, ActivityType, Attendance, Employee, LeaveRequest};
use crate::error::{AppError, AppResult};
use crate::routes::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub q: String,
}

/// Server-side search over name, email, department and role
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<ApiResponse<Vec<Employee>>> {
    let employees = state.service::<Employee>().search(&query.q).await;
    Json(ApiResponse::success(employees))
}

pub async fn by_department(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> Json<ApiResponse<Vec<Employee>>> {
    let employees = state
        .service::<Employee>()
        .filter_by_department(&department)
        .await;
    Json(ApiResponse::success(employees))
}

pub async fn leave_requests(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<ApiResponse<Vec<LeaveRequest>>> {
    let requests = state.service::<LeaveRequest>().get_by_employee(id).await;
    Json(ApiResponse::success(requests))
}

pub async fn attendance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<ApiResponse<Vec<Attendance>>> {
    let rows = state.service::<Attendance>().get_by_employee(id).await;
    Json(ApiResponse::success(rows))
}

pub async fn activities(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<ApiResponse<Vec<Activity>>> {
    let rows = state.service::<Activity>().filter_by_employee(id).await;
    Json(ApiResponse::success(rows))
}

/// Activities of one type, e.g. `/api/activities/by-type/Meeting`
pub async fn activities_by_type(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Activity>>>> {
    let kind: ActivityType = kind.parse().map_err(AppError::BadRequest)?;
    let rows = state.service::<Activity>().filter_by_type(kind).await;
    Ok(Json(ApiResponse::success(rows)))
}

/// Attendance of one day; any parseable date is accepted
pub async fn attendance_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Json<ApiResponse<Vec<Attendance>>> {
    let rows = state.service::<Attendance>().get_by_date(&date).await;
    Json(ApiResponse::success(rows))
}
