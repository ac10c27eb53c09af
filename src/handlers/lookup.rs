//! Handlers for the lookup entities. The concrete entity is resolved from the
//! path segment, so one set of handlers serves materials, brands, types, and
//! colors.

use crate::error::AppError;
use crate::extractors::Payload;
use crate::handlers::parse_id;
use crate::model::{LookupKind, LookupPayload};
use crate::response;
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

fn collection(segment: &str) -> Result<LookupKind, AppError> {
    LookupKind::from_collection(segment).ok_or_else(|| AppError::NotFound(segment.to_string()))
}

fn singular(segment: &str) -> Result<LookupKind, AppError> {
    LookupKind::from_singular(segment).ok_or_else(|| AppError::NotFound(segment.to_string()))
}

pub async fn list(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let kind = collection(&segment)?;
    let rows = CatalogService::list(&state.pool, kind).await?;
    Ok(response::ok(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path((segment, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let kind = singular(&segment)?;
    let id = parse_id(&id_str)?;
    let row = CatalogService::read(&state.pool, kind, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", kind.label(), id)))?;
    Ok(response::ok(row))
}

pub async fn create(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Payload(payload): Payload<LookupPayload>,
) -> Result<impl IntoResponse, AppError> {
    let kind = collection(&segment)?;
    let row = CatalogService::create(&state.pool, kind, &payload).await?;
    Ok(response::created(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path((segment, id_str)): Path<(String, String)>,
    Payload(payload): Payload<LookupPayload>,
) -> Result<impl IntoResponse, AppError> {
    let kind = singular(&segment)?;
    let id = parse_id(&id_str)?;
    let row = CatalogService::update(&state.pool, kind, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", kind.label(), id)))?;
    Ok(response::ok(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((segment, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let kind = singular(&segment)?;
    let id = parse_id(&id_str)?;
    if !CatalogService::delete(&state.pool, kind, id).await? {
        return Err(AppError::NotFound(format!("{} {}", kind.label(), id)));
    }
    Ok(response::deleted(kind.label()))
}
