//! # Generic list container
//!
//! [`ListContainer`] binds one collection's [`ListState`] to the fetch /
//! subscribe / release lifecycle. Every table in the client is one of
//! these plus a [`CollectionSource`] — no per-screen copies of the fetch
//! and subscription plumbing.
//!
//! The container's methods are synchronous state transitions; the awaits
//! happen in the workflow layer between them (see
//! [`workflows::collections`](crate::workflows::collections)), so the
//! shared app lock is never held across a collaborator round trip.

use super::{
    collection::{Delta, DeltaOutcome, Keyed, ListState},
    listeners::{AttachDecision, CompleteOutcome, ListenerSet, SubscriptionHandle},
    liveness::LivenessToken,
};
use crate::errors::{AppError, ErrorDetail};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// A live registration plus the channel its deltas arrive on.
pub struct Subscription<T> {
    /// Close-on-drop token for the registration
    pub handle: Box<dyn SubscriptionHandle>,
    /// Push updates, in server order
    pub deltas: mpsc::Receiver<Delta<T>>,
}

/// One collection's fetch and subscribe operations.
///
/// Implementations adapt the REST/realtime collaborators (production) or
/// an in-memory store (tests); the container neither knows nor cares.
#[async_trait]
pub trait CollectionSource<T>: Send + Sync {
    /// Stable collection key, e.g. `activities/group-…`. Identifies the
    /// registration in the owner's [`ListenerSet`].
    fn key(&self) -> String;

    /// One-shot authoritative fetch.
    async fn fetch(&self) -> Result<Vec<T>, AppError>;

    /// Open the push registration.
    async fn subscribe(&self) -> Result<Subscription<T>, AppError>;
}

/// State container + subscription lifecycle for one displayed collection.
pub struct ListContainer<T> {
    state: ListState<T>,
    listeners: ListenerSet,
    deltas: Option<mpsc::Receiver<Delta<T>>>,
    liveness: LivenessToken,
    active_key: Option<String>,
}

impl<T: Keyed> Default for ListContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> ListContainer<T> {
    /// A fresh container with nothing loaded and nothing attached.
    pub fn new() -> Self {
        Self {
            state: ListState::new(),
            listeners: ListenerSet::new(),
            deltas: None,
            liveness: LivenessToken::new(),
            active_key: None,
        }
    }

    /// The list state, for rendering and projection.
    pub fn state(&self) -> &ListState<T> {
        &self.state
    }

    // ─── Fetch lifecycle ─────────────────────────────────────

    /// Whether a mount/re-render should trigger the initial fetch.
    pub fn needs_fetch(&self) -> bool {
        !self.state.is_loaded() && !self.state.is_loading()
    }

    /// Mark the load started and hand back the liveness token the eventual
    /// completion must present.
    pub fn begin_fetch(&mut self) -> LivenessToken {
        self.state.begin_load();
        self.liveness.clone()
    }

    /// Apply a fetch completion, unless the token went stale (the
    /// container was released while the fetch was in flight).
    ///
    /// Returns `true` if the completion was applied.
    pub fn complete_fetch(
        &mut self,
        token: &LivenessToken,
        outcome: Result<Vec<T>, ErrorDetail>,
    ) -> bool {
        if !token.is_live() {
            tracing::debug!("dropping stale fetch completion");
            return false;
        }
        self.state.complete_load(outcome);
        true
    }

    // ─── Subscription lifecycle ──────────────────────────────

    /// Try to move `key` into Attaching.
    ///
    /// Enforces the ordering precondition: a registration may only be
    /// established once the initial fetch has completed successfully, so a
    /// delta can never be applied before its base snapshot. Returns `true`
    /// when the caller should run the subscribe round trip.
    pub fn try_begin_attach(&mut self, key: &str) -> bool {
        if !self.state.load_succeeded() {
            return false;
        }
        // A scope change retargets the container; drop the old registration.
        if let Some(active) = &self.active_key {
            if active != key {
                self.listeners.detach(active);
                self.deltas = None;
            }
        }
        self.active_key = Some(key.to_string());
        matches!(self.listeners.begin_attach(key), AttachDecision::Start)
    }

    /// Deliver the subscription the subscribe round trip produced.
    pub fn complete_attach(&mut self, key: &str, subscription: Subscription<T>) -> CompleteOutcome {
        let Subscription { handle, deltas } = subscription;
        let outcome = self.listeners.complete_attach(key, handle);
        if outcome == CompleteOutcome::Attached {
            self.deltas = Some(deltas);
        }
        outcome
    }

    /// The subscribe round trip failed; forget the Attaching entry.
    pub fn abort_attach(&mut self, key: &str) {
        self.listeners.abort_attach(key);
    }

    /// Whether a live registration currently feeds this container.
    pub fn is_attached(&self) -> bool {
        self.active_key
            .as_deref()
            .is_some_and(|key| self.listeners.is_attached(key))
    }

    /// Drain pending deltas into the state; returns how many applied.
    pub fn pump_deltas(&mut self) -> usize {
        let Some(receiver) = self.deltas.as_mut() else {
            return 0;
        };
        let mut applied = 0;
        loop {
            match receiver.try_recv() {
                Ok(delta) => {
                    if self.state.apply_delta(delta) == DeltaOutcome::Applied {
                        applied += 1;
                    }
                }
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    // Registration ended server-side; nothing more will come.
                    self.deltas = None;
                    break;
                }
            }
        }
        applied
    }

    // ─── Teardown ────────────────────────────────────────────

    /// Release everything: detach registrations, invalidate in-flight
    /// completions, reset the state for the next mount. The page size
    /// survives — it is a user preference, not collection state.
    pub fn release(&mut self) {
        self.listeners.detach_all();
        self.deltas = None;
        self.active_key = None;
        self.liveness.revoke();
        self.liveness = LivenessToken::new();
        let page_size = self.state.page_size();
        self.state.reset();
        self.state.set_page_size(page_size);
    }

    // ─── Pagination / search passthroughs ────────────────────

    /// Jump to a page (clamped).
    pub fn set_page(&mut self, page: usize) {
        self.state.set_page(page);
    }

    /// Change the page size (clamped to the configured options).
    pub fn set_page_size(&mut self, size: usize) {
        self.state.set_page_size(size);
    }

    /// Store the search text; filtering is derived on read.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.set_search_text(text);
    }

    /// Clear the search.
    pub fn clear_search(&mut self) {
        self.state.clear_search();
    }
}

impl<T> Drop for ListContainer<T> {
    fn drop(&mut self) {
        // ListenerSet closes its registrations in its own Drop; the token
        // still has to die so in-flight completions land nowhere.
        self.liveness.revoke();
    }
}
