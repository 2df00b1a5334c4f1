// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed publish/subscribe channel.
//!
//! # Design
//!
//! An [`Event<F>`] is parameterized by the *handler signature* expressed as a
//! trait object type, for example `Event<dyn Fn(&str)>` or
//! `Event<dyn Fn(&Model, &u32)>`. This gives typed, multi-argument
//! notifications (including borrowed arguments with any lifetime) without
//! variadic generics: the caller of [`Event::fire`] receives each handler as
//! `&F` and invokes it with whatever arguments the signature demands.
//!
//! Entries live behind `Rc<RefCell<..>>` so that [`EventHandler`] and
//! [`Subscription`] can hold *weak* references back to the event. A binder
//! that outlives the event it was connected to simply finds nothing to
//! unsubscribe from.
//!
//! # Re-entrancy
//!
//! `fire` snapshots the handler list before invoking anything. Handlers may
//! subscribe or unsubscribe (themselves or others) while a firing is in
//! progress; such changes take effect from the next `fire`.
//!
//! # Failure Modes
//!
//! - **Panicking handler**: the panic propagates out of `fire` and the
//!   remaining handlers for that firing are not invoked (fail-fast).
//! - **Failing handler** with [`Event::try_fire`]: the first `Err` stops
//!   delivery and is returned to the caller.
//!
//! [`EventHandler`]: crate::EventHandler

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

use smallvec::SmallVec;

use crate::id::SubscriberId;
use crate::subscription::Subscription;

/// Inline capacity for handler lists; most events have a handful of observers.
const INLINE_HANDLERS: usize = 4;

/// One registered handler together with the token of its owner.
struct Entry<F: ?Sized> {
    subscriber: SubscriberId,
    handler: Rc<F>,
}

/// Shared interior of an [`Event`].
struct Channel<F: ?Sized> {
    entries: RefCell<SmallVec<[Entry<F>; INLINE_HANDLERS]>>,
}

/// Signature-independent view of an event, used by weak back-references.
pub(crate) trait ErasedEvent {
    /// Removes every entry owned by `subscriber`, returning how many were removed.
    fn unsubscribe(&self, subscriber: SubscriberId) -> usize;

    /// Returns `true` if `subscriber` owns at least one entry.
    fn is_subscribed(&self, subscriber: SubscriberId) -> bool;
}

impl<F: ?Sized> ErasedEvent for Channel<F> {
    fn unsubscribe(&self, subscriber: SubscriberId) -> usize {
        let removed: SmallVec<[Entry<F>; INLINE_HANDLERS]> = {
            let mut entries = self.entries.borrow_mut();
            let mut removed = SmallVec::new();
            let mut index = 0;
            while index < entries.len() {
                if entries[index].subscriber == subscriber {
                    removed.push(entries.remove(index));
                } else {
                    index += 1;
                }
            }
            removed
        };
        // Handlers are dropped only after the borrow is released, so their
        // destructors may touch this event again.
        removed.len()
    }

    fn is_subscribed(&self, subscriber: SubscriberId) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|entry| entry.subscriber == subscriber)
    }
}

/// A typed publish/subscribe channel.
///
/// Handlers are invoked synchronously, in subscription order, every time the
/// event is fired. Subscribing the same handler twice creates two independent
/// entries, and both fire.
///
/// An `Event` is identity-bearing and therefore not `Clone`: it is normally a
/// field of the entity whose changes it announces.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use understory_event::{Event, SubscriberId};
///
/// let renamed: Event<dyn Fn(&str, &str)> = Event::new();
/// let log = Rc::new(RefCell::new(Vec::new()));
///
/// let observer = SubscriberId::next();
/// let sink = Rc::clone(&log);
/// renamed.subscribe(
///     observer,
///     Rc::new(move |old: &str, new: &str| sink.borrow_mut().push(format!("{old} -> {new}"))),
/// );
///
/// renamed.fire(|handler| handler("draft", "final"));
/// assert_eq!(*log.borrow(), ["draft -> final"]);
///
/// assert_eq!(renamed.unsubscribe(observer), 1);
/// renamed.fire(|handler| handler("final", "archived"));
/// assert_eq!(log.borrow().len(), 1);
/// ```
pub struct Event<F: ?Sized> {
    channel: Rc<Channel<F>>,
}

impl<F: ?Sized + 'static> Event<F> {
    /// Creates an event with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            channel: Rc::new(Channel {
                entries: RefCell::new(SmallVec::new()),
            }),
        }
    }

    /// Registers `handler` on behalf of `subscriber`.
    ///
    /// The handler is invoked on every future [`fire`](Self::fire) until
    /// `subscriber` is unsubscribed. Duplicate registrations are kept.
    pub fn subscribe(&self, subscriber: SubscriberId, handler: Rc<F>) {
        let mut entries = self.channel.entries.borrow_mut();
        entries.push(Entry {
            subscriber,
            handler,
        });
        log::trace!("{subscriber} subscribed ({} handlers)", entries.len());
    }

    /// Removes every entry registered by `subscriber`.
    ///
    /// Returns the number of entries removed; zero if `subscriber` had none.
    pub fn unsubscribe(&self, subscriber: SubscriberId) -> usize {
        let removed = self.channel.unsubscribe(subscriber);
        if removed > 0 {
            log::trace!("{subscriber} unsubscribed ({removed} handlers removed)");
        }
        removed
    }

    /// Registers `handler` under a fresh token and returns a scoped handle.
    ///
    /// Dropping the returned [`Subscription`] unsubscribes the handler.
    pub fn connect(&self, handler: Rc<F>) -> Subscription {
        let subscriber = SubscriberId::next();
        self.subscribe(subscriber, handler);
        Subscription::new(subscriber, self.erased())
    }

    /// Invokes every registered handler through `invoke`, in subscription order.
    ///
    /// The handler list is snapshotted first; changes made by handlers apply
    /// to the next firing. A panic raised by a handler propagates and skips
    /// the handlers after it.
    pub fn fire(&self, mut invoke: impl FnMut(&F)) {
        let handlers = self.snapshot();
        log::trace!("firing to {} handlers", handlers.len());
        for handler in &handlers {
            invoke(&**handler);
        }
    }

    /// Fallible variant of [`fire`](Self::fire).
    ///
    /// Delivery stops at the first handler for which `invoke` returns `Err`,
    /// and that error is returned. Handlers after it are not invoked.
    pub fn try_fire<E>(&self, mut invoke: impl FnMut(&F) -> Result<(), E>) -> Result<(), E> {
        let handlers = self.snapshot();
        log::trace!("firing (fail-fast) to {} handlers", handlers.len());
        for handler in &handlers {
            invoke(&**handler)?;
        }
        Ok(())
    }

    /// Number of registered entries (a subscriber with two handlers counts twice).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.channel.entries.borrow().len()
    }

    /// Returns `true` if at least one handler is registered.
    #[must_use]
    pub fn has_subscribers(&self) -> bool {
        !self.channel.entries.borrow().is_empty()
    }

    /// Returns `true` if `subscriber` owns at least one entry.
    #[must_use]
    pub fn is_subscribed(&self, subscriber: SubscriberId) -> bool {
        self.channel.is_subscribed(subscriber)
    }

    /// Weak, signature-erased handle used by binders.
    pub(crate) fn erased(&self) -> Weak<dyn ErasedEvent> {
        let weak: Weak<Channel<F>> = Rc::downgrade(&self.channel);
        weak
    }

    fn snapshot(&self) -> SmallVec<[Rc<F>; INLINE_HANDLERS]> {
        self.channel
            .entries
            .borrow()
            .iter()
            .map(|entry| Rc::clone(&entry.handler))
            .collect()
    }
}

impl<F: ?Sized + 'static> Default for Event<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for Event<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscriber_count", &self.channel.entries.borrow().len())
            .finish()
    }
}
