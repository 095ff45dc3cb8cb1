//! # Toast Notifications
//!
//! Transient, non-blocking notifications for operation outcomes ("could
//! not save photo", "invite sent"). Frontends tick the queue from their
//! render loop; toasts auto-dismiss after a fixed number of ticks unless
//! marked sticky.

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Milliseconds per UI tick.
pub const TOAST_TICK_RATE_MS: u64 = 250;

/// How long a toast stays up by default.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 4_000;

/// Default duration expressed in ticks.
pub const DEFAULT_TOAST_TICKS: u32 = (DEFAULT_TOAST_DURATION_MS / TOAST_TICK_RATE_MS) as u32;

/// Sticky toasts never auto-dismiss.
pub const NO_AUTO_DISMISS: u32 = 0;

/// Oldest toasts drop once this many queue up.
pub const MAX_PENDING_TOASTS: usize = 8;

/// Toast severity, also used to route errors (see
/// [`AppError::toast_level`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One transient notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    /// Ticks until auto-dismiss; [`NO_AUTO_DISMISS`] means sticky
    pub ticks_remaining: u32,
}

impl Toast {
    /// A toast with the default duration.
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            ticks_remaining: DEFAULT_TOAST_TICKS,
        }
    }

    /// A success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, message)
    }

    /// A sticky toast that stays until the user dismisses it.
    pub fn sticky(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            ticks_remaining: NO_AUTO_DISMISS,
        }
    }

    /// Routing from an error, severity chosen by its category.
    pub fn from_error(error: &AppError) -> Self {
        Self::new(error.toast_level(), error.to_string())
    }
}

/// Bounded FIFO of pending toasts.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    pending: VecDeque<Toast>,
}

impl ToastQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending toasts, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &Toast> {
        self.pending.iter()
    }

    /// Number of pending toasts.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether anything is showing.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Enqueue a toast, dropping the oldest if the queue is full.
    pub fn push(&mut self, toast: Toast) {
        if self.pending.len() == MAX_PENDING_TOASTS {
            self.pending.pop_front();
        }
        self.pending.push_back(toast);
    }

    /// Advance one tick; non-sticky toasts that reach zero drop out.
    pub fn tick(&mut self) {
        self.pending.retain_mut(|toast| {
            if toast.ticks_remaining == NO_AUTO_DISMISS {
                return true;
            }
            toast.ticks_remaining -= 1;
            toast.ticks_remaining > 0
        });
    }

    /// Drop a toast the user dismissed by index.
    pub fn dismiss(&mut self, index: usize) {
        if index < self.pending.len() {
            self.pending.remove(index);
        }
    }

    /// Drop everything (sign-out, screen reset).
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_bounded() {
        let mut queue = ToastQueue::new();
        for i in 0..MAX_PENDING_TOASTS + 3 {
            queue.push(Toast::success(format!("toast {i}")));
        }
        assert_eq!(queue.len(), MAX_PENDING_TOASTS);
        // Oldest dropped first.
        assert_eq!(queue.pending().next().map(|t| t.message.as_str()), Some("toast 3"));
    }

    #[test]
    fn test_toasts_expire_after_their_ticks() {
        let mut queue = ToastQueue::new();
        queue.push(Toast::success("short-lived"));
        for _ in 0..DEFAULT_TOAST_TICKS {
            queue.tick();
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_sticky_toasts_survive_ticking() {
        let mut queue = ToastQueue::new();
        queue.push(Toast::sticky(ToastLevel::Error, "needs attention"));
        for _ in 0..DEFAULT_TOAST_TICKS * 4 {
            queue.tick();
        }
        assert_eq!(queue.len(), 1);
        queue.dismiss(0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_error_routing_picks_severity() {
        let toast = Toast::from_error(&AppError::validation("email", "required"));
        assert_eq!(toast.level, ToastLevel::Info);
        let toast = Toast::from_error(&AppError::internal("reducer", "bad transition"));
        assert_eq!(toast.level, ToastLevel::Error);
    }
}
