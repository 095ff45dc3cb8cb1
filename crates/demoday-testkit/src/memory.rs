//! In-memory collection with push-delta fan-out
//!
//! The test analog of one realtime-database collection node: a fetchable
//! snapshot plus delta delivery to registered subscribers. Delivery is
//! synchronous (no background tasks), so tests stay deterministic.

use demoday_app::{
    errors::AppError,
    store::{CollectionSource, Delta, Keyed, Subscription, SubscriptionHandle},
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc};
use tokio::sync::mpsc;

const DELTA_CHANNEL_CAPACITY: usize = 64;

struct Inner<T> {
    key: String,
    items: Mutex<Vec<T>>,
    subscribers: Mutex<Vec<(u64, mpsc::Sender<Delta<T>>)>>,
    next_subscriber_id: Mutex<u64>,
    queued_fetch_failures: Mutex<VecDeque<AppError>>,
    queued_subscribe_failures: Mutex<VecDeque<AppError>>,
}

/// One server-side collection tests can script and observe.
///
/// Clones share the same collection.
pub struct MemoryCollection<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for MemoryCollection<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Keyed + Clone + Send + Sync + 'static> MemoryCollection<T> {
    /// An empty collection under `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                key: key.into(),
                items: Mutex::new(Vec::new()),
                subscribers: Mutex::new(Vec::new()),
                next_subscriber_id: Mutex::new(0),
                queued_fetch_failures: Mutex::new(VecDeque::new()),
                queued_subscribe_failures: Mutex::new(VecDeque::new()),
            }),
        }
    }

    /// Replace the snapshot without emitting deltas (seed data).
    pub fn seed(&self, items: Vec<T>) {
        *self.inner.items.lock() = items;
    }

    /// Server-side insert: snapshot grows, subscribers get the delta.
    pub fn insert(&self, item: T) {
        self.inner.items.lock().push(item.clone());
        self.emit(Delta::inserted(item));
    }

    /// Server-side update by key (upsert), delta to subscribers.
    pub fn update(&self, item: T) {
        {
            let mut items = self.inner.items.lock();
            match items.iter_mut().find(|i| i.key() == item.key()) {
                Some(existing) => *existing = item.clone(),
                None => items.push(item.clone()),
            }
        }
        self.emit(Delta::updated(item));
    }

    /// Server-side remove by key, delta to subscribers.
    pub fn remove(&self, key: &str) {
        self.inner.items.lock().retain(|i| i.key() != key);
        self.emit(Delta::removed(key));
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.items.lock().clone()
    }

    /// Queue an error for the next fetch call.
    pub fn fail_next_fetch(&self, error: AppError) {
        self.inner.queued_fetch_failures.lock().push_back(error);
    }

    /// Queue an error for the next subscribe call.
    pub fn fail_next_subscribe(&self, error: AppError) {
        self.inner.queued_subscribe_failures.lock().push_back(error);
    }

    /// How many live push registrations exist right now.
    ///
    /// The assertion hook for release semantics: after an owner detaches
    /// or drops, this returns to zero.
    pub fn active_subscriptions(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    /// A [`CollectionSource`] view of this collection.
    pub fn source(&self) -> Box<dyn CollectionSource<T>> {
        Box::new(MemorySource {
            inner: self.inner.clone(),
        })
    }

    fn emit(&self, delta: Delta<T>) {
        let subscribers = self.inner.subscribers.lock();
        for (_, sender) in subscribers.iter() {
            // A full channel drops the delta for that subscriber, the same
            // way a saturated push socket would.
            let _ = sender.try_send(delta.clone());
        }
    }
}

struct MemorySource<T> {
    inner: Arc<Inner<T>>,
}

#[async_trait]
impl<T: Keyed + Clone + Send + Sync + 'static> CollectionSource<T> for MemorySource<T> {
    fn key(&self) -> String {
        self.inner.key.clone()
    }

    async fn fetch(&self) -> Result<Vec<T>, AppError> {
        if let Some(error) = self.inner.queued_fetch_failures.lock().pop_front() {
            return Err(error);
        }
        Ok(self.inner.items.lock().clone())
    }

    async fn subscribe(&self) -> Result<Subscription<T>, AppError> {
        if let Some(error) = self.inner.queued_subscribe_failures.lock().pop_front() {
            return Err(error);
        }
        let (sender, receiver) = mpsc::channel(DELTA_CHANNEL_CAPACITY);
        let id = {
            let mut next = self.inner.next_subscriber_id.lock();
            *next += 1;
            *next
        };
        self.inner.subscribers.lock().push((id, sender));
        Ok(Subscription {
            handle: Box::new(MemoryHandle {
                inner: self.inner.clone(),
                id,
                closed: false,
            }),
            deltas: receiver,
        })
    }
}

struct MemoryHandle<T> {
    inner: Arc<Inner<T>>,
    id: u64,
    closed: bool,
}

impl<T> MemoryHandle<T> {
    fn release(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.inner
            .subscribers
            .lock()
            .retain(|(id, _)| *id != self.id);
    }
}

impl<T: Send> SubscriptionHandle for MemoryHandle<T> {
    fn close(&mut self) {
        self.release();
    }
}

impl<T> Drop for MemoryHandle<T> {
    fn drop(&mut self) {
        self.release();
    }
}
