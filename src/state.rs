use crate::auth::{self, TokenKeys};
use crate::config::ServerConfig;
use crate::error::ApiResult;
use crate::sheets::{sample_sheets, Sheet};
use axum::http::HeaderMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared application state
///
/// Built once at startup; everything in here is read-only afterwards, so
/// request handlers share it without locking.
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Token signing/verification material derived from the shared secret
    pub keys: TokenKeys,

    /// Built-in datasets served by the data endpoints
    pub sheets: HashMap<String, Sheet>,
}

impl ServerState {
    /// Create new server state
    pub fn new(config: ServerConfig) -> Self {
        let keys = TokenKeys::new(&config.token_secret);

        Self {
            config: Arc::new(config),
            keys,
            sheets: sample_sheets(),
        }
    }

    /// Validate a credential pair and mint a bearer token.
    pub fn issue_token(&self, username: &str, password: &str) -> ApiResult<String> {
        auth::issue_token(&self.config, &self.keys, username, password)
    }

    /// Guard for protected handlers; see [`auth::require_token`].
    pub fn require_token(&self, headers: &HeaderMap, explicit: Option<&str>) -> ApiResult<()> {
        auth::require_token(&self.keys, headers, explicit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_initialization() {
        let config = ServerConfig {
            auth_username: "goodUser".to_string(),
            auth_password: "goodPass".to_string(),
            token_secret: "state-test-secret".to_string(),
            ..ServerConfig::default()
        };
        let state = ServerState::new(config);

        assert!(!state.sheets.is_empty());

        let token = state.issue_token("goodUser", "goodPass").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {token}").parse().unwrap(),
        );
        assert!(state.require_token(&headers, None).is_ok());
        assert!(state.issue_token("goodUser", "nope").is_err());
    }
}
