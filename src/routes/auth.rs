use crate::error::ApiResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Credential pair submitted to the token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Response containing the issued bearer token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Issue a bearer token for a valid credential pair
///
/// `POST /get_token` with `{"username": ..., "password": ...}`. Succeeds with
/// `{"token": "<jwt>"}`; any mismatch answers 401.
pub async fn get_token(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let token = state.issue_token(&request.username, &request.password)?;
    Ok(Json(TokenResponse { token }))
}
