//! Request handlers module
//!
//! The list and form handlers are generic over the entity; each request
//! loads a fresh list snapshot or opens a form modal and drives it.

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::entity::Employee;
use crate::error::{AppError, AppResult, OptionExt};
use crate::form::{Form, FormModal, FormMode, OpenForm};
use crate::routes::ApiResponse;
use crate::state::AppState;
use crate::view::{EmployeeDirectory, ListView, Listing, LoadState, ViewMode};

pub mod employee;
pub mod leave_request;

/// Query parameters shared by every list page
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    pub view: Option<ViewMode>,
}

/// Query parameters for opening a single record
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OpenQuery {
    pub mode: Option<FormMode>,
}

/// Query parameters of destructive actions
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfirmQuery {
    pub confirm: bool,
}

/// Fail with 503 when the snapshot could not be loaded
pub(crate) fn ensure_loaded<E: Listing>(view: &ListView<E>) -> AppResult<()> {
    match view.state() {
        LoadState::Failed(message) => Err(AppError::Unavailable(message.clone())),
        _ => Ok(()),
    }
}

fn object_body(body: Value) -> AppResult<serde_json::Map<String, Value>> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::BadRequest("Request body must be a JSON object".to_string())),
    }
}

async fn directory_for<E: Form>(state: &AppState) -> AppResult<EmployeeDirectory> {
    if !E::NEEDS_DIRECTORY {
        return Ok(EmployeeDirectory::default());
    }
    let staff = state.service::<Employee>().try_get_all().await?;
    Ok(EmployeeDirectory::new(staff))
}

/// List page: filters from the query string, rows with resolved employees and stats
pub async fn list<E: Listing>(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<E::Filter>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let mut view = state.view::<E>().await;
    ensure_loaded(&view)?;
    view.set_filter(filter);
    if let Some(mode) = page.view {
        view.set_view_mode(mode);
    }
    let page = serde_json::to_value(view.page())?;
    Ok(Json(ApiResponse::success(page)))
}

/// One record seeded into an edit form, or a read-only view form with `?mode=view`
pub async fn get<E: Form>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<OpenQuery>,
) -> AppResult<Json<ApiResponse<OpenForm<E::Draft>>>> {
    let record = state
        .service::<E>()
        .get_by_id(id)
        .await
        .ok_or_not_found(format!("{} {} not found", E::LABEL, id))?;

    let mut modal = FormModal::<E>::new();
    match query.mode {
        Some(FormMode::View) => modal.open_view(&record)?,
        _ => modal.open_edit(&record),
    }
    let form = modal
        .form()
        .cloned()
        .ok_or_else(|| AppError::Internal("form did not open".to_string()))?;
    Ok(Json(ApiResponse::success(form)))
}

pub async fn create<E: Form>(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<ApiResponse<E>>> {
    let values = object_body(body)?;
    let directory = directory_for::<E>(&state).await?;

    let mut modal = FormModal::<E>::new();
    modal.open_create();
    modal.set_fields(&values)?;
    let record = modal.submit(&state.service::<E>(), &directory).await?;
    Ok(Json(ApiResponse::success(record)))
}

/// Edit form seeded from the stored record, then the submitted fields on top
pub async fn update<E: Form>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> AppResult<Json<ApiResponse<E>>> {
    let values = object_body(body)?;
    let service = state.service::<E>();
    let record = service
        .get_by_id(id)
        .await
        .ok_or_not_found(format!("{} {} not found", E::LABEL, id))?;
    let directory = directory_for::<E>(&state).await?;

    let mut modal = FormModal::<E>::new();
    modal.open_edit(&record);
    modal.set_fields(&values)?;
    let record = modal.submit(&service, &directory).await?;
    Ok(Json(ApiResponse::success(record)))
}

/// Delete after confirmation; without `?confirm=true` answers 428 with the prompt
pub async fn remove<E: Listing>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ConfirmQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    let mut view = state.view::<E>().await;
    ensure_loaded(&view)?;
    let prompt = view.request_delete(id)?.prompt.clone();
    if !query.confirm {
        return Err(AppError::ConfirmationRequired(prompt));
    }
    view.confirm_delete().await?;
    Ok(Json(ApiResponse::success_msg(format!("{} deleted successfully", E::LABEL))))
}
