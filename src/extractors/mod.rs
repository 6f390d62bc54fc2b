//! Request extractors: caller identity and validated payloads.

pub mod auth;
pub mod valid;
pub use auth::{CurrentUser, OptionalUser, BEARER_PREFIX};
pub use valid::{ValidJson, ValidQuery};
