use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use bson::oid::ObjectId;
use chrono::Utc;
use serde::Deserialize;

use crate::{document::TodoDocument, error::AppError, state::State as AppState};
use todo_model::{CreateTodo, Deleted, Todo, UpdateTodo};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    device_id: Option<String>,
}

/// `GET /todos?deviceId=X`
///
/// An absent or empty device filter matches nothing: every stored record
/// carries a non-empty `deviceId`, and no caller may see another device's
/// records.
pub async fn list_todos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let device_id = match params.device_id.as_deref() {
        Some(device_id) if !device_id.is_empty() => device_id,
        _ => return Ok(Json(Vec::new())),
    };

    let records = state.todos.list_for_device(device_id).await?;

    Ok(Json(records.into_iter().map(Todo::from).collect()))
}

/// `POST /todos`
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTodo>,
) -> Result<impl IntoResponse, AppError> {
    require(&payload.title, "title")?;
    require(&payload.device_id, "deviceId")?;

    let record = TodoDocument::new(payload, Utc::now());
    let created = state.todos.insert(record).await?;

    Ok((StatusCode::CREATED, Json(Todo::from(created))))
}

/// `PUT /todos/{id}` — destructive full-field replace.
pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTodo>,
) -> Result<Json<Todo>, AppError> {
    let id = parse_id(&id)?;
    require(&payload.title, "title")?;

    let updated = state
        .todos
        .replace(id, &payload)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(Todo::from(updated)))
}

/// `DELETE /todos/{id}`
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, AppError> {
    let id = parse_id(&id)?;

    state
        .todos
        .delete(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(Deleted {
        message: "Todo deleted successfully".to_string(),
    }))
}

/// Catches `PUT`/`DELETE /todos/` so an empty id segment reads as a client
/// error instead of an unmatched route.
pub async fn missing_id() -> AppError {
    AppError::MissingId
}

fn parse_id(raw: &str) -> Result<ObjectId, AppError> {
    if raw.is_empty() {
        return Err(AppError::MissingId);
    }

    ObjectId::parse_str(raw).map_err(|_| AppError::InvalidId)
}

fn require(value: &str, name: &'static str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::MissingField(name));
    }

    Ok(())
}
