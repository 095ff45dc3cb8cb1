//! Realtime-backed collection sources
//!
//! [`RealtimeSource`] adapts one realtime-database collection node to the
//! app core's `CollectionSource`: fetch runs the child-ordered query over
//! HTTP, subscribe opens the WebSocket registration and pumps its change
//! events into typed deltas. Malformed documents are logged and skipped —
//! one bad row must not take a whole dashboard down.

use crate::errors::map_realtime_error;
use async_trait::async_trait;
use demoday_app::{
    errors::AppError,
    store::{CollectionSource, Delta, DeltaKind, Keyed, Subscription, SubscriptionHandle},
};
use demoday_realtime::{ChangeKind, LiveSubscription, Query, RealtimeClient};
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;

const DELTA_CHANNEL_CAPACITY: usize = 256;

/// One collection node read through the realtime client.
///
/// Holds `Result<Query, _>` rather than panicking on a bad path: a source
/// built from an invalid path reports the error at fetch/subscribe time,
/// where the list state can record it.
pub(crate) struct RealtimeSource<T> {
    client: RealtimeClient,
    query: Result<Query, AppError>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> RealtimeSource<T> {
    pub(crate) fn new(client: RealtimeClient, query: Result<Query, AppError>) -> Self {
        Self {
            client,
            query,
            _marker: std::marker::PhantomData,
        }
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: serde_json::Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(item) => Some(item),
        Err(error) => {
            tracing::warn!(key, %error, "skipping malformed document");
            None
        }
    }
}

#[async_trait]
impl<T> CollectionSource<T> for RealtimeSource<T>
where
    T: Keyed + DeserializeOwned + Send + Sync + 'static,
{
    fn key(&self) -> String {
        match &self.query {
            Ok(query) => query.path.to_string(),
            Err(_) => "invalid-path".to_string(),
        }
    }

    async fn fetch(&self) -> Result<Vec<T>, AppError> {
        let query = self.query.as_ref().map_err(Clone::clone)?;
        let rows = self
            .client
            .query(query)
            .await
            .map_err(map_realtime_error)?;
        Ok(rows
            .into_iter()
            .filter_map(|kv| decode(&kv.key, kv.value))
            .collect())
    }

    async fn subscribe(&self) -> Result<Subscription<T>, AppError> {
        let query = self.query.as_ref().map_err(Clone::clone)?;
        let mut live = self
            .client
            .subscribe(&query.path)
            .await
            .map_err(map_realtime_error)?;
        let mut events = live.take_events();
        let (delta_tx, delta_rx) = mpsc::channel(DELTA_CHANNEL_CAPACITY);

        // Pump change events into typed deltas until the registration
        // closes (handle close/drop ends `events`, which ends this task).
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let delta = match event {
                    Ok(change) => match change.kind {
                        ChangeKind::Removed => Some(Delta::removed(change.key)),
                        ChangeKind::Inserted | ChangeKind::Updated => {
                            let kind = if change.kind == ChangeKind::Inserted {
                                DeltaKind::Inserted
                            } else {
                                DeltaKind::Updated
                            };
                            change
                                .value
                                .and_then(|value| decode::<T>(&change.key, value))
                                .map(|item| Delta {
                                    kind,
                                    key: change.key,
                                    item: Some(item),
                                })
                        }
                    },
                    Err(error) => {
                        tracing::warn!(%error, "realtime subscription error");
                        None
                    }
                };
                if let Some(delta) = delta {
                    if delta_tx.send(delta).await.is_err() {
                        break;
                    }
                }
            }
        });

        Ok(Subscription {
            handle: Box::new(RealtimeHandle { live }),
            deltas: delta_rx,
        })
    }
}

/// Close-on-drop wrapper giving the app core its opaque handle.
struct RealtimeHandle {
    live: LiveSubscription,
}

impl SubscriptionHandle for RealtimeHandle {
    fn close(&mut self) {
        self.live.close();
    }
}
