//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sheetroll_shared::{DiceRollRequest, DiceRollResponse};

use super::identity::Identity;
use crate::app::App;
use crate::use_cases::dice::RollError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/dice", post(roll_dice))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Dice
// =============================================================================

/// Roll the requested dice and return the per-die results.
///
/// Identity is checked before the body is read, so an anonymous caller gets
/// 401 even with a malformed body.
async fn roll_dice(
    Identity(requester): Identity,
    State(app): State<Arc<App>>,
    body: Result<Json<DiceRollRequest>, JsonRejection>,
) -> Result<Json<DiceRollResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let dices = request
        .dices
        .ok_or_else(|| ApiError::BadRequest("missing dices".into()))?;

    let batch = app
        .use_cases
        .dice
        .roll
        .execute(requester, dices, request.resolver_key)
        .await?;

    Ok(Json(DiceRollResponse {
        results: batch.into_results(),
    }))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            ApiError::BadRequest(msg) => {
                tracing::debug!(reason = %msg, "Rejected request");
                StatusCode::BAD_REQUEST.into_response()
            }
        }
    }
}

impl From<RollError> for ApiError {
    fn from(e: RollError) -> Self {
        match e {
            RollError::InvalidRequest(e) => ApiError::BadRequest(e.to_string()),
        }
    }
}
