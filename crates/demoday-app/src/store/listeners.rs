//! # Subscription lifecycle manager
//!
//! [`ListenerSet`] binds an owner (a container or a screen) to at most one
//! active push registration per collection key, however many times the
//! owner re-syncs.
//!
//! Per-key state machine:
//!
//! ```text
//! Detached ──begin_attach──► Attaching ──complete_attach──► Attached
//!     ▲                          │                              │
//!     │                          │ detach (queued, applied      │ detach
//!     └──────────────────────────┴── once attach resolves) ◄────┘
//! ```
//!
//! `detach` while Attaching cannot tear down a registration that does not
//! exist yet, so it queues; `complete_attach` honors the queue by closing
//! the fresh handle immediately. A registration therefore never dangles,
//! no matter how attach and detach interleave.
//!
//! Dropping the set detaches everything — release is a guarantee of the
//! owner's lifetime, not an optional cleanup call.

use std::collections::HashMap;

/// An active push registration that can be shut down.
///
/// Implementations also close themselves on `Drop`; `close` exists so the
/// manager can release eagerly instead of waiting for the drop glue.
pub trait SubscriptionHandle: Send + Sync {
    /// Shut the registration down. Must be idempotent.
    fn close(&mut self);
}

enum ListenerPhase {
    Attaching { detach_queued: bool },
    Attached(Box<dyn SubscriptionHandle>),
}

/// What `begin_attach` decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachDecision {
    /// No registration for this key yet; the caller should subscribe and
    /// report back via `complete_attach`/`abort_attach`.
    Start,
    /// Already Attaching or Attached; the call was an idempotent no-op.
    AlreadyActive,
}

/// What `complete_attach` did with the fresh handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompleteOutcome {
    /// The registration is live and owned by the set.
    Attached,
    /// A detach arrived while Attaching (or the entry vanished); the handle
    /// was closed on the spot.
    DetachedImmediately,
}

/// What `detach` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetachOutcome {
    /// An Attached registration was closed and removed.
    Detached,
    /// The key is still Attaching; the detach will apply when it resolves.
    Queued,
    /// Nothing was registered under this key (safe no-op).
    NotAttached,
}

/// Owner-scoped registry of push registrations, one per collection key.
#[derive(Default)]
pub struct ListenerSet {
    entries: HashMap<String, ListenerPhase>,
}

impl ListenerSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start attaching `key`, unless a registration is already active.
    pub fn begin_attach(&mut self, key: &str) -> AttachDecision {
        if self.entries.contains_key(key) {
            return AttachDecision::AlreadyActive;
        }
        self.entries.insert(
            key.to_string(),
            ListenerPhase::Attaching {
                detach_queued: false,
            },
        );
        AttachDecision::Start
    }

    /// Deliver the handle the subscribe call produced.
    pub fn complete_attach(
        &mut self,
        key: &str,
        mut handle: Box<dyn SubscriptionHandle>,
    ) -> CompleteOutcome {
        match self.entries.remove(key) {
            Some(ListenerPhase::Attaching {
                detach_queued: false,
            }) => {
                self.entries
                    .insert(key.to_string(), ListenerPhase::Attached(handle));
                CompleteOutcome::Attached
            }
            Some(ListenerPhase::Attaching {
                detach_queued: true,
            })
            | None => {
                // The owner detached (or released) while we were waiting on
                // the subscribe round trip.
                handle.close();
                tracing::debug!(key, "queued detach applied at attach completion");
                CompleteOutcome::DetachedImmediately
            }
            Some(existing @ ListenerPhase::Attached(_)) => {
                // A second completion for an already-attached key can only
                // come from a caller that ignored `AlreadyActive`; keep the
                // first registration and drop the newcomer.
                self.entries.insert(key.to_string(), existing);
                handle.close();
                CompleteOutcome::DetachedImmediately
            }
        }
    }

    /// The subscribe call failed; forget the Attaching entry.
    pub fn abort_attach(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Close the registration under `key`, or queue the close if the
    /// registration is still being established.
    pub fn detach(&mut self, key: &str) -> DetachOutcome {
        match self.entries.remove(key) {
            Some(ListenerPhase::Attached(mut handle)) => {
                handle.close();
                DetachOutcome::Detached
            }
            Some(ListenerPhase::Attaching { .. }) => {
                self.entries.insert(
                    key.to_string(),
                    ListenerPhase::Attaching {
                        detach_queued: true,
                    },
                );
                DetachOutcome::Queued
            }
            None => DetachOutcome::NotAttached,
        }
    }

    /// Close every registration (owner teardown).
    pub fn detach_all(&mut self) {
        for (_, phase) in self.entries.drain() {
            match phase {
                ListenerPhase::Attached(mut handle) => handle.close(),
                ListenerPhase::Attaching { .. } => {
                    // Entry removed; complete_attach will find it gone and
                    // close the handle itself.
                }
            }
        }
    }

    /// Whether `key` is Attaching or Attached.
    pub fn is_active(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether `key` holds a live registration.
    pub fn is_attached(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(ListenerPhase::Attached(_)))
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.detach_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    /// Counts closes so tests can observe the release guarantee.
    struct CountingHandle {
        closes: Arc<AtomicUsize>,
        closed: bool,
    }

    impl CountingHandle {
        fn new(closes: Arc<AtomicUsize>) -> Box<Self> {
            Box::new(Self {
                closes,
                closed: false,
            })
        }
    }

    impl SubscriptionHandle for CountingHandle {
        fn close(&mut self) {
            if !self.closed {
                self.closed = true;
                self.closes.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    impl Drop for CountingHandle {
        fn drop(&mut self) {
            self.close();
        }
    }

    #[test]
    fn test_begin_attach_is_idempotent() {
        let mut set = ListenerSet::new();
        assert_eq!(set.begin_attach("activities"), AttachDecision::Start);
        assert_eq!(set.begin_attach("activities"), AttachDecision::AlreadyActive);

        let closes = Arc::new(AtomicUsize::new(0));
        assert_eq!(
            set.complete_attach("activities", CountingHandle::new(closes.clone())),
            CompleteOutcome::Attached
        );
        // Still idempotent once attached.
        assert_eq!(set.begin_attach("activities"), AttachDecision::AlreadyActive);
        assert!(set.is_attached("activities"));
        assert_eq!(closes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_detach_without_attach_is_noop() {
        let mut set = ListenerSet::new();
        assert_eq!(set.detach("never-attached"), DetachOutcome::NotAttached);
    }

    #[test]
    fn test_detach_closes_attached_handle() {
        let mut set = ListenerSet::new();
        let closes = Arc::new(AtomicUsize::new(0));
        set.begin_attach("pledges");
        set.complete_attach("pledges", CountingHandle::new(closes.clone()));

        assert_eq!(set.detach("pledges"), DetachOutcome::Detached);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert!(!set.is_active("pledges"));
    }

    #[test]
    fn test_detach_while_attaching_is_queued() {
        let mut set = ListenerSet::new();
        let closes = Arc::new(AtomicUsize::new(0));
        set.begin_attach("notices");

        assert_eq!(set.detach("notices"), DetachOutcome::Queued);
        // The subscribe round trip resolves after the detach:
        assert_eq!(
            set.complete_attach("notices", CountingHandle::new(closes.clone())),
            CompleteOutcome::DetachedImmediately
        );
        assert_eq!(closes.load(Ordering::SeqCst), 1, "no dangling registration");
        assert!(!set.is_active("notices"));
    }

    #[test]
    fn test_drop_closes_everything() {
        let closes = Arc::new(AtomicUsize::new(0));
        {
            let mut set = ListenerSet::new();
            set.begin_attach("a");
            set.complete_attach("a", CountingHandle::new(closes.clone()));
            set.begin_attach("b");
            set.complete_attach("b", CountingHandle::new(closes.clone()));
        }
        assert_eq!(closes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_duplicate_completion_keeps_first_registration() {
        let mut set = ListenerSet::new();
        let closes = Arc::new(AtomicUsize::new(0));
        set.begin_attach("forums");
        set.complete_attach("forums", CountingHandle::new(closes.clone()));

        let second = CountingHandle::new(closes.clone());
        assert_eq!(
            set.complete_attach("forums", second),
            CompleteOutcome::DetachedImmediately
        );
        assert!(set.is_attached("forums"));
        assert_eq!(closes.load(Ordering::SeqCst), 1, "only the newcomer closed");
    }
}
