// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subscriber identity tokens.

use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Source of fresh tokens. Zero is never handed out.
///
/// Pointer-sized so that targets with only word-sized atomics are supported.
static NEXT_SUBSCRIBER: AtomicUsize = AtomicUsize::new(1);

/// An opaque token identifying one subscriber.
///
/// Every entry registered on an [`Event`](crate::Event) is tagged with the
/// token of the subscriber that owns it. Two entries belong to "the same
/// subscriber" exactly when their tokens are equal, and
/// [`Event::unsubscribe`](crate::Event::unsubscribe) removes all entries that
/// carry a given token.
///
/// Tokens are minted by [`SubscriberId::next`] from a process-wide counter,
/// the only global state in this crate. They are not reused until the counter
/// wraps after `usize::MAX` tokens, so in practice a stale token never matches
/// a newer subscriber.
///
/// ```rust
/// use understory_event::SubscriberId;
///
/// let a = SubscriberId::next();
/// let b = SubscriberId::next();
/// assert_ne!(a, b);
/// assert_eq!(a, a);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(usize);

impl SubscriberId {
    /// Mints a fresh token, distinct from every token minted before it.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_SUBSCRIBER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw value of this token.
    ///
    /// Only useful for diagnostics; the numbering carries no meaning.
    #[must_use]
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Debug for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SubscriberId").field(&self.0).finish()
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscriber#{}", self.0)
    }
}
