use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::state::SharedState;

/// Fallback identity recorded when no caller can be resolved.
pub const SYSTEM_CALLER: &str = "system";

/// Caller identity for audit purposes, taken from the `x-caller` request
/// header. Resolution never fails; a missing or unreadable header yields
/// the `system` sentinel.
#[derive(Debug, Clone)]
pub struct Caller(pub String);

impl Caller {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<SharedState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let caller = parts
            .headers
            .get("x-caller")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(SYSTEM_CALLER)
            .to_string();

        Ok(Caller(caller))
    }
}
