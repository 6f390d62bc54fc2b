//! Garage handlers. Every route is scoped to the logged-in user's cars.

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidJson};
use crate::handlers::parse_id;
use crate::models::{CarUpdate, NewCar};
use crate::response;
use crate::service::CarRepo;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn list(user: CurrentUser, State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let cars = CarRepo::list(&state.pool, user.username()).await?;
    Ok(response::ok("cars", cars))
}

pub async fn read(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let car = CarRepo::get(&state.pool, user.username(), parse_id(&id_str)?).await?;
    Ok(response::ok("car", car))
}

pub async fn create(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewCar>,
) -> Result<impl IntoResponse, AppError> {
    let car = CarRepo::create(&state.pool, user.username(), &body).await?;
    Ok(response::created("car", car))
}

pub async fn update(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidJson(body): ValidJson<CarUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let car = CarRepo::update(&state.pool, user.username(), parse_id(&id_str)?, &body).await?;
    Ok(response::ok("car", car))
}

pub async fn delete(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = CarRepo::remove(&state.pool, user.username(), parse_id(&id_str)?).await?;
    Ok(response::ok("deleted", deleted.id))
}
