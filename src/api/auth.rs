use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info, warn};

use crate::api::state::AppState;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse};

const MISSING_FIELDS: &str = "Username and password are required";

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "login failed: unreadable body");
        ApiError::Validation(MISSING_FIELDS.to_string())
    })?;

    let (username, password) = match (payload.username, payload.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            warn!("login failed: missing username or password");
            return Err(ApiError::Validation(MISSING_FIELDS.to_string()));
        }
    };

    info!(username = %username, "login attempt");

    let gate = state.gate.clone();
    let issued = tokio::task::spawn_blocking(move || gate.login(&username, &password))
        .await
        .map_err(|e| {
            ApiError::internal_with(
                "Server error during authentication",
                &e,
                state.expose_error_detail,
            )
        })??;

    Ok(Json(LoginResponse {
        message: "Authentication successful".to_string(),
        token: issued.token,
    }))
}
