// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped single-handler subscriptions.

use alloc::rc::Weak;
use core::fmt;

use crate::event::ErasedEvent;
use crate::id::SubscriberId;

/// RAII guard for one handler registered with [`Event::connect`].
///
/// This is the standalone, single-callback form of the lifetime binder: it
/// wraps exactly one closure on exactly one event, without requiring a named
/// observer type. Dropping the guard unsubscribes the handler. If the event
/// was dropped first, dropping the guard does nothing.
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use understory_event::Event;
///
/// let ticked: Event<dyn Fn(u64)> = Event::new();
/// let seen = Rc::new(Cell::new(0));
///
/// let sink = Rc::clone(&seen);
/// let subscription = ticked.connect(Rc::new(move |tick: u64| sink.set(tick)));
/// ticked.fire(|handler| handler(1));
/// assert_eq!(seen.get(), 1);
///
/// drop(subscription);
/// ticked.fire(|handler| handler(2));
/// assert_eq!(seen.get(), 1);
/// ```
///
/// [`Event::connect`]: crate::Event::connect
#[must_use = "dropping a `Subscription` immediately disconnects its handler"]
pub struct Subscription {
    subscriber: SubscriberId,
    event: Weak<dyn ErasedEvent>,
}

impl Subscription {
    pub(crate) fn new(subscriber: SubscriberId, event: Weak<dyn ErasedEvent>) -> Self {
        Self { subscriber, event }
    }

    /// The token under which the handler is registered.
    #[must_use]
    pub fn subscriber(&self) -> SubscriberId {
        self.subscriber
    }

    /// Returns `true` while the event is alive and still holds the handler.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.event
            .upgrade()
            .is_some_and(|event| event.is_subscribed(self.subscriber))
    }

    /// Unsubscribes now. Equivalent to dropping the guard.
    pub fn disconnect(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(event) = self.event.upgrade() {
            event.unsubscribe(self.subscriber);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("subscriber", &self.subscriber)
            .field("connected", &self.is_connected())
            .finish()
    }
}
