//! Post handlers. Authors (or admins) edit; only authors delete.

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidJson};
use crate::handlers::parse_id;
use crate::models::{NewPost, PostUpdate};
use crate::response;
use crate::service::{PostRepo, UserRepo};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn list(_user: CurrentUser, State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let posts = PostRepo::list(&state.pool).await?;
    Ok(response::ok("posts", posts))
}

pub async fn read(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = PostRepo::get(&state.pool, parse_id(&id_str)?).await?;
    Ok(response::ok("post", post))
}

pub async fn create(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewPost>,
) -> Result<impl IntoResponse, AppError> {
    let author_id = UserRepo::id_by_username(&state.pool, user.username()).await?;
    let post = PostRepo::create(&state.pool, author_id, &body).await?;
    Ok(response::created("post", post))
}

pub async fn update(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidJson(body): ValidJson<PostUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let existing = PostRepo::get(&state.pool, id).await?;
    if !user.is_admin() {
        let caller_id = UserRepo::id_by_username(&state.pool, user.username()).await?;
        user.ensure_owner_or_admin(existing.user_id == caller_id)?;
    }
    let post = PostRepo::update(&state.pool, id, &body).await?;
    Ok(response::ok("post", post))
}

pub async fn delete(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let author_id = UserRepo::id_by_username(&state.pool, user.username()).await?;
    let deleted = PostRepo::remove(&state.pool, id, author_id).await?;
    Ok(response::ok("deleted", deleted.id))
}
