//! Garage drives: REST backend for user garages, group drives and posts on PostgreSQL.

pub mod auth;
pub mod config;
pub mod doc;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use auth::{Claims, TokenKeys};
pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use routes::{app, car_routes, common_routes, drive_routes, post_routes};
pub use service::{CarRepo, DriveRepo, PostRepo, UserRepo};
pub use sql::{sql_for_partial_update, BindValue, PartialUpdate};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
