//! HTTP handlers for cars, drives and posts.

pub mod cars;
pub mod drives;
pub mod posts;

use crate::error::AppError;

fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::bad_request(format!("invalid id: {}", id_str)))
}
