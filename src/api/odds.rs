use axum::{
    extract::{Path, State},
    Extension, Json,
};
use tracing::{error, info, warn};

use crate::api::state::AppState;
use crate::auth::Claims;
use crate::error::{ApiError, SnapshotError};
use crate::models::{SportEvent, SportSummary};

const MISSING_SPORT_KEY: &str = "Invalid or missing sport key";

fn snapshot_failure(state: &AppState, message: &str, err: SnapshotError) -> ApiError {
    error!(error = %err, "{message}");
    ApiError::internal_with(message, &err, state.expose_error_detail)
}

/// `GET /api/odds`
pub async fn get_all_odds(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<SportEvent>>, ApiError> {
    info!(user = %claims.username, "fetching all odds data");
    let events = state
        .odds
        .load_snapshot()
        .await
        .map_err(|e| snapshot_failure(&state, "Error fetching odds data", e))?;

    info!(count = events.len(), "returning odds events");
    Ok(Json(events))
}

/// `GET /api/odds/sports`
pub async fn get_available_sports(
    State(state): State<AppState>,
) -> Result<Json<Vec<SportSummary>>, ApiError> {
    let sports = state
        .odds
        .list_sports()
        .await
        .map_err(|e| snapshot_failure(&state, "Error fetching available sports", e))?;

    if sports.is_empty() {
        info!("no sports available");
        return Err(ApiError::NotFound("No sports available".to_string()));
    }

    Ok(Json(sports))
}

/// `GET /api/odds/sport/:sport_key`
pub async fn get_odds_by_sport(
    State(state): State<AppState>,
    Path(sport_key): Path<String>,
) -> Result<Json<Vec<SportEvent>>, ApiError> {
    let sport_key = sport_key.trim();
    if sport_key.is_empty() {
        warn!("invalid or missing sport key");
        return Err(ApiError::Validation(MISSING_SPORT_KEY.to_string()));
    }

    let events = state
        .odds
        .list_by_sport(sport_key)
        .await
        .map_err(|e| snapshot_failure(&state, "Error fetching odds by sport", e))?;

    if events.is_empty() {
        info!(sport_key, "no odds found for sport");
        return Err(ApiError::NotFound(format!(
            "No odds found for sport: {sport_key}"
        )));
    }

    Ok(Json(events))
}

/// `GET /api/odds/sport/` with no key
pub async fn missing_sport_key() -> ApiError {
    warn!("invalid or missing sport key");
    ApiError::Validation(MISSING_SPORT_KEY.to_string())
}
