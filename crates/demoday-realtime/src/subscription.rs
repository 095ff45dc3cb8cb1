//! Live subscription handle and its background reader
//!
//! A [`LiveSubscription`] owns one WebSocket registration. The socket is
//! read by a background task that forwards parsed [`ChangeEvent`]s through
//! an mpsc channel; the handle closes the registration on [`close`] and on
//! `Drop`, so a dropped handle can never leave a live server-push
//! registration behind.
//!
//! [`close`]: LiveSubscription::close

use crate::{
    error::RealtimeError,
    models::{ChangeEvent, ClientFrame, ServerFrame},
    Result,
};
use futures_util::{SinkExt, StreamExt};
use tokio::{
    net::TcpStream,
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A standing value-changed registration.
pub struct LiveSubscription {
    id: String,
    events: mpsc::Receiver<Result<ChangeEvent>>,
    /// Signals the reader task to unsubscribe and shut down.
    /// `None` once `close()` has run (or `Drop` consumed it).
    close_tx: Option<oneshot::Sender<()>>,
    _reader: JoinHandle<()>,
    closed: bool,
}

impl LiveSubscription {
    pub(crate) fn new(
        id: String,
        events: mpsc::Receiver<Result<ChangeEvent>>,
        close_tx: oneshot::Sender<()>,
        reader: JoinHandle<()>,
    ) -> Self {
        Self {
            id,
            events,
            close_tx: Some(close_tx),
            _reader: reader,
            closed: false,
        }
    }

    /// The registration id assigned at subscribe time.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Receive the next change event.
    ///
    /// Returns `None` once the registration is closed or the socket is
    /// gone; pending events delivered before the close are still yielded.
    pub async fn next(&mut self) -> Option<Result<ChangeEvent>> {
        if self.closed && self.events.is_empty() {
            return None;
        }
        self.events.recv().await
    }

    /// Split off the event receiver, leaving the handle as a pure
    /// close-on-drop token.
    ///
    /// Used by callers that route events through their own pump while
    /// storing the handle in a lifecycle manager.
    pub fn take_events(&mut self) -> mpsc::Receiver<Result<ChangeEvent>> {
        let (_, empty) = mpsc::channel(1);
        std::mem::replace(&mut self.events, empty)
    }

    /// Close the registration. Safe to call repeatedly; later calls no-op.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Some(tx) = self.close_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Whether [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for LiveSubscription {
    fn drop(&mut self) {
        if let Some(tx) = self.close_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Background task: pump server frames into the event channel until the
/// handle closes us or the socket ends.
pub(crate) async fn reader_loop(
    mut ws: WsStream,
    sub_id: String,
    event_tx: mpsc::Sender<Result<ChangeEvent>>,
    mut close_rx: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = &mut close_rx => {
                let frame = ClientFrame::Unsubscribe { id: sub_id.clone() };
                if let Ok(text) = serde_json::to_string(&frame) {
                    let _ = ws.send(Message::Text(text)).await;
                }
                let _ = ws.close(None).await;
                tracing::debug!(subscription = %sub_id, "realtime subscription detached");
                break;
            }
            incoming = ws.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ServerFrame>(&text) {
                            Ok(ServerFrame::Change { id, event }) if id == sub_id => {
                                if event_tx.send(Ok(event)).await.is_err() {
                                    // Receiver gone; nothing left to deliver to.
                                    break;
                                }
                            }
                            Ok(ServerFrame::SubscriptionError { id, message }) if id == sub_id => {
                                let _ = event_tx
                                    .send(Err(RealtimeError::Protocol(message)))
                                    .await;
                            }
                            Ok(_) => {}
                            Err(e) => {
                                tracing::warn!(
                                    subscription = %sub_id,
                                    error = %e,
                                    "skipping malformed realtime frame"
                                );
                            }
                        }
                    }
                    Some(Ok(Message::Ping(payload))) => {
                        let _ = ws.send(Message::Pong(payload)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::debug!(subscription = %sub_id, "realtime socket closed by server");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        let _ = event_tx
                            .send(Err(RealtimeError::Transport(e.to_string())))
                            .await;
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChangeKind;

    /// A handle with no real socket behind it, for state-flag tests.
    fn make_test_subscription() -> (LiveSubscription, mpsc::Sender<Result<ChangeEvent>>) {
        let (event_tx, event_rx) = mpsc::channel(8);
        let (close_tx, close_rx) = oneshot::channel();
        let reader = tokio::spawn(async move {
            let _ = close_rx.await;
        });
        (
            LiveSubscription::new("sub-test".to_string(), event_rx, close_tx, reader),
            event_tx,
        )
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let (mut sub, _tx) = make_test_subscription();
        assert!(!sub.is_closed());
        sub.close();
        sub.close();
        assert!(sub.is_closed());
    }

    #[tokio::test]
    async fn test_pending_events_survive_close() {
        let (mut sub, tx) = make_test_subscription();
        tx.send(Ok(ChangeEvent {
            kind: ChangeKind::Inserted,
            key: "k1".to_string(),
            value: None,
        }))
        .await
        .unwrap();
        sub.close();

        let event = sub.next().await.unwrap().unwrap();
        assert_eq!(event.key, "k1");
    }

    #[tokio::test]
    async fn test_next_ends_after_close_and_drain() {
        let (mut sub, tx) = make_test_subscription();
        sub.close();
        drop(tx);
        assert!(sub.next().await.is_none());
    }
}
