//! Drive handlers: listing/search, CRUD by title, and participation.

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidJson, ValidQuery};
use crate::models::{Drive, DriveSearch, DriveUpdate, NewDrive};
use crate::response;
use crate::service::{DriveRepo, UserRepo};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

/// Only the drive's creator or an admin may change or delete it.
async fn ensure_can_manage(state: &AppState, user: &CurrentUser, drive: &Drive) -> Result<(), AppError> {
    if user.is_admin() {
        return Ok(());
    }
    let caller_id = UserRepo::id_by_username(&state.pool, user.username()).await?;
    user.ensure_owner_or_admin(drive.creator_id == Some(caller_id))
}

pub async fn list(
    _user: CurrentUser,
    State(state): State<AppState>,
    ValidQuery(search): ValidQuery<DriveSearch>,
) -> Result<impl IntoResponse, AppError> {
    let drives = DriveRepo::list(&state.pool, &search).await?;
    Ok(response::ok("drives", drives))
}

pub async fn read(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let drive = DriveRepo::get(&state.pool, &title).await?;
    Ok(response::ok("drive", drive))
}

pub async fn create(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewDrive>,
) -> Result<impl IntoResponse, AppError> {
    let creator_id = UserRepo::id_by_username(&state.pool, user.username()).await?;
    let drive = DriveRepo::create(&state.pool, &body, Some(creator_id)).await?;
    Ok(response::created("drive", drive))
}

pub async fn update(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(title): Path<String>,
    ValidJson(body): ValidJson<DriveUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let existing = DriveRepo::get(&state.pool, &title).await?;
    ensure_can_manage(&state, &user, &existing).await?;
    let drive = DriveRepo::update(&state.pool, &title, &body).await?;
    Ok(response::ok("drive", drive))
}

pub async fn delete(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let existing = DriveRepo::get(&state.pool, &title).await?;
    ensure_can_manage(&state, &user, &existing).await?;
    let deleted = DriveRepo::remove(&state.pool, &title).await?;
    Ok(response::ok("deleted", deleted))
}

pub async fn join(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    DriveRepo::join_drive(&state.pool, user.username(), &title).await?;
    Ok(response::ok("joined", title))
}

pub async fn leave(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    DriveRepo::leave_drive(&state.pool, user.username(), &title).await?;
    Ok(response::ok("left", title))
}

pub async fn participants(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let names = DriveRepo::participants(&state.pool, &title).await?;
    Ok(response::ok("participants", names))
}
