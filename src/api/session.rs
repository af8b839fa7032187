use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::api::types::SessionClearedResponse;
use crate::relay::replies;
use crate::server::state::AppState;
use crate::session::SessionStore;

#[derive(Debug, Deserialize)]
pub struct ClearQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// DELETE /v1/chat/completions?user_id=... - drop the session record so
/// the next turn starts a fresh backend conversation.
pub async fn clear_handler(
    State(state): State<AppState>,
    Query(query): Query<ClearQuery>,
) -> Response {
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| replies::DEFAULT_USER_ID.to_string());

    match state.store.delete(&user_id).await {
        Ok(()) => {
            tracing::info!(user_id = %user_id, "Session cleared on request");
            Json(SessionClearedResponse {
                status: "cleared".to_string(),
                user_id,
            })
            .into_response()
        }
        Err(e) => e.into_response(),
    }
}
