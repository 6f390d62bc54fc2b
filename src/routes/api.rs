//! Resource routes for cars, drives and posts.

use crate::handlers::{cars, drives, posts};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn car_routes(state: AppState) -> Router {
    Router::new()
        .route("/cars", get(cars::list).post(cars::create))
        .route("/cars/:id", get(cars::read).patch(cars::update).delete(cars::delete))
        .with_state(state)
}

pub fn drive_routes(state: AppState) -> Router {
    Router::new()
        .route("/drives", get(drives::list).post(drives::create))
        .route(
            "/drives/:title",
            get(drives::read).patch(drives::update).delete(drives::delete),
        )
        .route(
            "/drives/:title/participants",
            get(drives::participants).post(drives::join).delete(drives::leave),
        )
        .with_state(state)
}

pub fn post_routes(state: AppState) -> Router {
    Router::new()
        .route("/posts", get(posts::list).post(posts::create))
        .route("/posts/:id", get(posts::read).patch(posts::update).delete(posts::delete))
        .with_state(state)
}
