//! Shared application state for all routes.

use crate::auth::TokenKeys;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub keys: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(pool: PgPool, keys: TokenKeys) -> Self {
        AppState {
            pool,
            keys: Arc::new(keys),
        }
    }
}
