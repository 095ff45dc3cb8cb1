//! Object storage client
//!
//! One operation: upload a file, get back its public download URL. Used for
//! avatars, group logos, offer videos and documents.

use crate::{
    client::TokenProvider,
    error::{ApiError, ErrorBody},
    Result,
};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::{sync::Arc, time::Duration};
use url::Url;

/// Uploads can carry video; allow more time than plain API calls.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct UploadResponse {
    download_url: String,
}

/// Client for the managed object store.
#[derive(Clone)]
pub struct StorageClient {
    base: Url,
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
}

impl StorageClient {
    /// Create a client against the store's upload endpoint.
    pub fn new(base: Url, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { base, http, tokens })
    }

    /// Upload one object and return its public download URL.
    ///
    /// `object_path` names the destination (e.g. `avatars/<user-id>.png`).
    pub async fn upload(
        &self,
        object_path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<Url> {
        let url = self
            .base
            .join("upload")
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        let part = Part::bytes(bytes)
            .file_name(object_path.to_string())
            .mime_str(content_type)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let form = Form::new()
            .text("path", object_path.to_string())
            .part("file", part);

        let mut request = self.http.post(url).multipart(form);
        if let Some(token) = self.tokens.bearer_token().await {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("upload failed")
                    .to_string(),
            };
            return Err(ApiError::Status {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Url::parse(&body.download_url).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
