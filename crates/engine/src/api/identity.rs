//! Caller identity.
//!
//! The sheet platform's session layer authenticates players and forwards the
//! result as `X-Player-Id` / `X-Player-Admin` headers. The engine trusts them
//! as-is.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use sheetroll_domain::{PlayerId, Requester};

use super::http::ApiError;

pub const PLAYER_ID_HEADER: &str = "x-player-id";
pub const PLAYER_ADMIN_HEADER: &str = "x-player-admin";

/// Extractor for the authenticated requester.
///
/// Rejects with 401 when the player id is missing or not an integer.
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub Requester);

impl Identity {
    /// Read the identity headers, if present and well-formed.
    pub fn from_headers(headers: &HeaderMap) -> Option<Requester> {
        let id: PlayerId = headers
            .get(PLAYER_ID_HEADER)?
            .to_str()
            .ok()?
            .trim()
            .parse()
            .ok()?;

        let admin = headers
            .get(PLAYER_ADMIN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);

        Some(Requester::new(id, admin))
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
            .map(Identity)
            .ok_or(ApiError::Unauthorized)
    }
}
