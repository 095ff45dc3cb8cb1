//! # Liveness token
//!
//! Outstanding fetches are not cancelled when their container goes away;
//! instead every async completion carries a clone of the container's
//! [`LivenessToken`] and checks it before touching state. A slow response
//! that resolves after the view is gone becomes a no-op instead of a write
//! into state nobody reads.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared flag tying async completions to a container generation.
///
/// Cloning shares the flag; [`revoke`](Self::revoke) flips every clone at
/// once. A released container revokes its token and hands a fresh one to
/// its next mount, so completions from the previous generation can never
/// land in the new one.
#[derive(Debug, Clone)]
pub struct LivenessToken {
    live: Arc<AtomicBool>,
}

impl Default for LivenessToken {
    fn default() -> Self {
        Self::new()
    }
}

impl LivenessToken {
    /// A live token.
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether completions holding this token may still apply.
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Invalidate this token and every clone of it.
    pub fn revoke(&self) {
        self.live.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_is_live() {
        assert!(LivenessToken::new().is_live());
    }

    #[test]
    fn test_revoke_reaches_all_clones() {
        let token = LivenessToken::new();
        let held_by_completion = token.clone();
        token.revoke();
        assert!(!held_by_completion.is_live());
    }
}
