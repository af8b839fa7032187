use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::types::{VerifyRequest, VerifyResponse};
use crate::error::{RelayError, Result};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
struct VendorVerdict {
    #[serde(default)]
    success: bool,
}

/// POST /v1/verify - forward a challenge token to the verification
/// vendor before the widget is allowed to start a conversation.
pub async fn handler(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>> {
    if state.config.verify.secret.is_empty() {
        return Err(RelayError::Config(
            "verification secret is not configured".to_string(),
        ));
    }

    let response = state
        .http
        .post(&state.config.verify.url)
        .form(&[
            ("secret", state.config.verify.secret.as_str()),
            ("response", request.token.as_str()),
        ])
        .send()
        .await
        .map_err(|e| RelayError::Verify(e.to_string()))?;

    if !response.status().is_success() {
        return Err(RelayError::Verify(format!(
            "vendor returned {}",
            response.status()
        )));
    }

    let verdict: VendorVerdict = response
        .json()
        .await
        .map_err(|e| RelayError::Verify(format!("bad verdict body: {e}")))?;

    Ok(Json(VerifyResponse {
        success: verdict.success,
    }))
}
