use axum::extract::State;
use axum::Json;

use crate::api::types::HealthResponse;
use crate::server::state::AppState;

/// GET /v1/chat/completions - health check.
pub async fn handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "concierge-relay".to_string(),
        model: state.config.agent.profile.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
