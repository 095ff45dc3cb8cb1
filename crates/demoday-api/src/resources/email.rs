//! Transactional email route

use crate::{client::ApiClient, Result};
use reqwest::Method;
use serde::Serialize;

/// An outbound transactional email.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    /// Plain-text body; the backend wraps it in the platform template
    pub body: String,
}

/// Handle for the `email` route.
pub struct Email<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Email<'_> {
    /// Queue one email for delivery.
    pub async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let _: serde_json::Value = self
            .client
            .send_json(Method::POST, "email", email)
            .await?;
        Ok(())
    }
}
