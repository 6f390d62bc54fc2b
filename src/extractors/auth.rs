//! Caller identity from the `Authorization: Bearer <jwt>` header.

use crate::auth::Claims;
use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

pub const BEARER_PREFIX: &str = "Bearer ";

/// Logged-in caller. Rejects with 401 when the header is missing or the token does not verify.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Claims);

impl CurrentUser {
    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin
    }

    /// Owner-or-admin guard.
    pub fn ensure_owner_or_admin(&self, is_owner: bool) -> Result<(), AppError> {
        if is_owner || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!("{} may not modify this resource", self.username())))
        }
    }
}

/// Caller identity when a token is sent. No `Authorization` header yields `None`; a header that
/// is not a well-formed bearer token, or a token that does not verify, is still a 401.
#[derive(Clone, Debug)]
pub struct OptionalUser(pub Option<Claims>);

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Some)
        .ok_or_else(|| AppError::Unauthorized("malformed authorization header".into()))
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or_else(|| AppError::Unauthorized("login required".into()))?;
        let claims = state.keys.verify(token)?;
        Ok(CurrentUser(claims))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => Ok(OptionalUser(Some(state.keys.verify(token)?))),
            None => Ok(OptionalUser(None)),
        }
    }
}
