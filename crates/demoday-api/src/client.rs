//! REST client core: request building, auth, and error normalization

use crate::{
    error::{ApiError, ErrorBody},
    resources, Result,
};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::{sync::Arc, time::Duration};
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Supplies the identity-provider token attached to every request.
///
/// Implemented by the session layer; `None` sends the request without an
/// `Authorization` header (only the public routes accept that).
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// The current bearer token, if a session is active.
    async fn bearer_token(&self) -> Option<String>;
}

/// Client for the platform's REST backend.
///
/// Cheap to clone. Resource routes hang off accessor methods:
///
/// ```rust,ignore
/// let offers = client.offers().list(&scope).await?;
/// client.sectors().rename(sector_id, "Climate").await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Create a client against `base` (e.g. `https://api.demoday.app/v1/`).
    pub fn new(base: Url, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { base, http, tokens })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| ApiError::InvalidRequest(format!("{path}: {e}")))
    }

    async fn execute(&self, mut request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        if let Some(token) = self.tokens.bearer_token().await {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Prefer the structured {message} body; fall back to the status line.
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        tracing::debug!(status = status.as_u16(), %message, "api request rejected");
        Err(ApiError::Status {
            status_code: status.as_u16(),
            message,
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(self.http.get(self.endpoint(path)?)).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self
            .http
            .request(method, self.endpoint(path)?)
            .json(body);
        let response = self.execute(request).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .execute(self.http.request(Method::DELETE, self.endpoint(path)?))
            .await?;
        // DELETE routes answer 204; tolerate bodies on 200.
        debug_assert!(
            response.status() == StatusCode::NO_CONTENT || response.status() == StatusCode::OK
        );
        Ok(())
    }

    // ─── Resource accessors ──────────────────────────────────

    /// User accounts and profiles.
    pub fn users(&self) -> resources::Users<'_> {
        resources::Users { client: self }
    }

    /// Group (university) tenants.
    pub fn groups(&self) -> resources::Groups<'_> {
        resources::Groups { client: self }
    }

    /// Course sub-scopes.
    pub fn courses(&self) -> resources::Courses<'_> {
        resources::Courses { client: self }
    }

    /// Investment offers.
    pub fn offers(&self) -> resources::Offers<'_> {
        resources::Offers { client: self }
    }

    /// Access requests against a scope.
    pub fn access_requests(&self) -> resources::AccessRequests<'_> {
        resources::AccessRequests { client: self }
    }

    /// Course-admin invites.
    pub fn admin_invites(&self) -> resources::AdminInvites<'_> {
        resources::AdminInvites { client: self }
    }

    /// System attributes (sectors and resource pages).
    pub fn system_attributes(&self) -> resources::SystemAttributes<'_> {
        resources::SystemAttributes { client: self }
    }

    /// Transactional email.
    pub fn email(&self) -> resources::Email<'_> {
        resources::Email { client: self }
    }
}
