//! Leave request decisions
//!
//! Both actions act on a fresh snapshot, so a request decided since the
//! caller last looked answers 409 instead of being overwritten.

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

use super::{ensure_loaded, ConfirmQuery};
use crate::entity::{LeaveRequest, LeaveStatus};
use crate::error::{AppError, AppResult};
use crate::routes::ApiResponse;
use crate::state::AppState;
use crate::view::optional_label;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusQuery {
    #[serde(deserialize_with = "optional_label")]
    pub status: Option<LeaveStatus>,
}

pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<LeaveRequest>>> {
    let mut view = state.view::<LeaveRequest>().await;
    ensure_loaded(&view)?;
    let approved = view.approve(id, state.approver()).await?;
    tracing::info!("Leave request {} approved by {}", id, state.approver());
    Ok(Json(ApiResponse::success(approved)))
}

pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ConfirmQuery>,
) -> AppResult<Json<ApiResponse<LeaveRequest>>> {
    let mut view = state.view::<LeaveRequest>().await;
    ensure_loaded(&view)?;
    let prompt = view.request_reject(id)?.prompt.clone();
    if !query.confirm {
        return Err(AppError::ConfirmationRequired(prompt));
    }
    let rejected = view.confirm_reject(state.approver()).await?;
    tracing::info!("Leave request {} rejected by {}", id, state.approver());
    Ok(Json(ApiResponse::success(rejected)))
}

/// Requests by status straight from the backend; no status lists all
pub async fn by_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Json<ApiResponse<Vec<LeaveRequest>>> {
    let requests = state
        .service::<LeaveRequest>()
        .get_by_status(query.status)
        .await;
    Json(ApiResponse::success(requests))
}
