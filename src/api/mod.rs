pub mod auth;
pub mod middleware;
pub mod odds;
pub mod state;

use axum::{
    extract::OriginalUri,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::error::ApiError;
pub use state::AppState;

pub fn router(state: AppState) -> Router {
    let odds_routes = Router::new()
        .route("/", get(odds::get_all_odds))
        .route("/sports", get(odds::get_available_sports))
        .route("/sport/", get(odds::missing_sport_key))
        .route("/sport/:sport_key", get(odds::get_odds_by_sport))
        // `layer` rather than `route_layer`: unknown odds paths need a token too
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), middleware::require_bearer));

    Router::new()
        .route("/", get(root))
        .route("/api/auth/login", post(auth::login))
        .nest("/api/odds", odds_routes)
        .fallback(not_found)
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Sports Odds API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(format!("Not Found - {}", uri.path()))
}
