use crate::constants::{NEAR_PERFECT_KM, TOLERANCE_KM};
use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Liveness and planner constants
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "planner": {
            "tolerance_km": TOLERANCE_KM,
            "near_perfect_km": NEAR_PERFECT_KM,
            "landmark_locality": state.planner.catalog().locality(),
        }
    }))
}
