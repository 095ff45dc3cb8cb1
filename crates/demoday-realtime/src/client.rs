//! Realtime client: HTTP reads and WebSocket subscriptions

use crate::{
    error::RealtimeError,
    models::{ClientFrame, KeyedValue, ServerFrame},
    query::{NodePath, Query},
    subscription::{reader_loop, LiveSubscription, WsStream},
    Result,
};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

/// How long to wait for the socket to open.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// How long to wait for auth/subscribe acknowledgements.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
/// Buffered change events per subscription before backpressure.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Supplies the identity-provider token attached to reads and sockets.
///
/// Returning `None` sends the request unauthenticated, which the server
/// answers with 401/403 for protected nodes.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// The current access token, if a session is active.
    async fn access_token(&self) -> Option<String>;
}

/// Client handle for the realtime document database.
///
/// Cheap to clone; reads share one HTTP connection pool, and each
/// subscription owns its socket.
#[derive(Clone)]
pub struct RealtimeClient {
    http_base: Url,
    ws_url: Url,
    http: reqwest::Client,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl RealtimeClient {
    /// Create a client against the given HTTP and WebSocket endpoints.
    pub fn new(
        http_base: Url,
        ws_url: Url,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| RealtimeError::Transport(e.to_string()))?;
        Ok(Self {
            http_base,
            ws_url,
            http,
            tokens,
        })
    }

    fn read_url(&self, path: &NodePath) -> Result<Url> {
        self.http_base
            .join(path.as_str())
            .map_err(|e| RealtimeError::InvalidPath(format!("{path}: {e}")))
    }

    async fn send_read(&self, url: Url) -> Result<reqwest::Response> {
        let mut request = self.http.get(url);
        if let Some(token) = self.tokens.access_token().await {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| RealtimeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RealtimeError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Point read of one node. `None` means the node does not exist.
    pub async fn get(&self, path: &NodePath) -> Result<Option<Value>> {
        let response = self.send_read(self.read_url(path)?).await?;
        let value: Value = response
            .json()
            .await
            .map_err(|e| RealtimeError::Protocol(e.to_string()))?;
        Ok(if value.is_null() { None } else { Some(value) })
    }

    /// Ordered, filtered read of a collection node.
    pub async fn query(&self, query: &Query) -> Result<Vec<KeyedValue>> {
        let mut url = self.read_url(&query.path)?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(child) = &query.order_by {
                pairs.append_pair("orderBy", child);
            }
            if let Some(value) = &query.equal_to {
                pairs.append_pair("equalTo", &value.to_string());
            }
            if let Some(limit) = query.limit_to_first {
                pairs.append_pair("limitToFirst", &limit.to_string());
            }
        }
        let response = self.send_read(url).await?;
        response
            .json()
            .await
            .map_err(|e| RealtimeError::Protocol(e.to_string()))
    }

    /// Open a standing value-changed registration under `path`.
    ///
    /// The returned [`LiveSubscription`] yields one [`ChangeEvent`] per
    /// server push until it is closed or dropped; both paths send the
    /// unsubscribe frame before the socket goes away.
    ///
    /// [`ChangeEvent`]: crate::ChangeEvent
    pub async fn subscribe(&self, path: &NodePath) -> Result<LiveSubscription> {
        let (mut ws, _) = tokio::time::timeout(CONNECT_TIMEOUT, connect_async(self.ws_url.as_str()))
            .await
            .map_err(|_| RealtimeError::Connect(format!("timeout after {CONNECT_TIMEOUT:?}")))?
            .map_err(|e| RealtimeError::Connect(e.to_string()))?;

        // Authenticate before subscribing; unauthenticated sockets may only
        // watch public nodes.
        if let Some(token) = self.tokens.access_token().await {
            send_frame(&mut ws, &ClientFrame::Auth { token }).await?;
            match expect_frame(&mut ws).await? {
                ServerFrame::AuthAck => {}
                ServerFrame::AuthRejected { message } => {
                    return Err(RealtimeError::Auth(message));
                }
                other => {
                    return Err(RealtimeError::Protocol(format!(
                        "expected auth ack, got {other:?}"
                    )));
                }
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        send_frame(
            &mut ws,
            &ClientFrame::Subscribe {
                id: id.clone(),
                path: path.to_string(),
            },
        )
        .await?;
        match expect_frame(&mut ws).await? {
            ServerFrame::Subscribed { id: ack } if ack == id => {}
            ServerFrame::SubscriptionError { message, .. } => {
                return Err(RealtimeError::Protocol(message));
            }
            other => {
                return Err(RealtimeError::Protocol(format!(
                    "expected subscribe ack, got {other:?}"
                )));
            }
        }
        tracing::debug!(%path, subscription = %id, "realtime subscription attached");

        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (close_tx, close_rx) = oneshot::channel();
        let reader = tokio::spawn(reader_loop(ws, id.clone(), event_tx, close_rx));

        Ok(LiveSubscription::new(id, event_rx, close_tx, reader))
    }
}

async fn send_frame(ws: &mut WsStream, frame: &ClientFrame) -> Result<()> {
    let text = serde_json::to_string(frame).map_err(|e| RealtimeError::Protocol(e.to_string()))?;
    ws.send(Message::Text(text))
        .await
        .map_err(|e| RealtimeError::Transport(e.to_string()))
}

async fn expect_frame(ws: &mut WsStream) -> Result<ServerFrame> {
    let deadline = tokio::time::timeout(HANDSHAKE_TIMEOUT, async {
        while let Some(message) = ws.next().await {
            match message.map_err(|e| RealtimeError::Transport(e.to_string()))? {
                Message::Text(text) => {
                    return serde_json::from_str(&text)
                        .map_err(|e| RealtimeError::Protocol(e.to_string()));
                }
                Message::Ping(_) | Message::Pong(_) => continue,
                Message::Close(_) => return Err(RealtimeError::Closed),
                other => {
                    return Err(RealtimeError::Protocol(format!(
                        "unexpected frame during handshake: {other:?}"
                    )));
                }
            }
        }
        Err(RealtimeError::Closed)
    })
    .await;
    deadline.map_err(|_| RealtimeError::Connect(format!("handshake timeout {HANDSHAKE_TIMEOUT:?}")))?
}
