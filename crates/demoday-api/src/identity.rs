//! Identity provider client
//!
//! The platform delegates authentication to an external identity provider;
//! this client covers the token endpoints the frontend actually consumes:
//! password sign-in, custom-token sign-in (used by admin impersonation
//! links), token refresh, and the password-reset email request. Session
//! bookkeeping and auth-state notifications live in the application layer.

use crate::{
    error::{ApiError, ErrorBody},
    Result,
};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tokens minted by the identity provider for one session.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenBundle {
    /// Bearer token attached to collaborator requests
    pub id_token: String,
    /// Token exchanged for a fresh bundle when `id_token` expires
    pub refresh_token: String,
    /// Seconds until `id_token` expires
    pub expires_in: u64,
    /// Provider-side subject, matching the backend's user id
    pub user_id: String,
}

/// Client for the identity provider's REST surface.
#[derive(Clone)]
pub struct IdentityClient {
    base: Url,
    http: reqwest::Client,
}

impl IdentityClient {
    /// Create a client against the provider's base URL.
    pub fn new(base: Url) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { base, http })
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        let url = self
            .base
            .join(path)
            .map_err(|e| ApiError::InvalidRequest(format!("{path}: {e}")))?;
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            return Err(ApiError::Status {
                status_code: status.as_u16(),
                message,
            });
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Exchange email + password for a token bundle.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<TokenBundle> {
        self.post_json(
            "sign-in",
            json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Exchange a provider-minted custom token for a session.
    pub async fn sign_in_with_custom_token(&self, token: &str) -> Result<TokenBundle> {
        self.post_json("sign-in/custom-token", json!({ "token": token }))
            .await
    }

    /// Trade a refresh token for a fresh bundle.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenBundle> {
        self.post_json("token/refresh", json!({ "refresh_token": refresh_token }))
            .await
    }

    /// Ask the provider to email a password-reset link.
    pub async fn send_password_reset(&self, email: &str) -> Result<()> {
        let _: serde_json::Value = self
            .post_json("password-reset", json!({ "email": email }))
            .await?;
        Ok(())
    }
}
