//! Pen endpoints.

use crate::error::AppError;
use crate::extractors::Payload;
use crate::handlers::parse_id;
use crate::model::PenPayload;
use crate::response;
use crate::service::PenService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let pens = PenService::list(&state.pool).await?;
    Ok(response::ok(pens))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let pen = PenService::read(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("pen {}", id)))?;
    Ok(response::ok(pen))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<PenPayload>,
) -> Result<impl IntoResponse, AppError> {
    let pen = PenService::create(&state.pool, &payload).await?;
    Ok(response::created(pen))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Payload(payload): Payload<PenPayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let pen = PenService::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("pen {}", id)))?;
    Ok(response::ok(pen))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !PenService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("pen {}", id)));
    }
    Ok(response::deleted("pen"))
}
