// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifetime binder tying an observer's subscriptions to its own lifetime.

use alloc::rc::{Rc, Weak};
use core::fmt;

use smallvec::SmallVec;

use crate::event::{ErasedEvent, Event};
use crate::id::SubscriberId;

/// Inline capacity for recorded connections.
const INLINE_CONNECTIONS: usize = 4;

/// Couples an observer's lifetime to all of its subscriptions.
///
/// An observer embeds an `EventHandler` and subscribes only through
/// [`connect`](Self::connect). Every handler is registered under the binder's
/// single [`SubscriberId`], and every event connected to is recorded. When the
/// binder is dropped (usually together with its observer) it unsubscribes from
/// every recorded event that is still alive, in recording order.
///
/// Events are recorded as weak references, so an event that was destroyed
/// before its observers is simply skipped.
///
/// # Method-bound handlers
///
/// A handler that forwards to a method of the observer captures the
/// observer's shared state and calls the method:
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use understory_event::{Event, EventHandler};
///
/// #[derive(Default)]
/// struct Log {
///     lines: RefCell<Vec<String>>,
/// }
///
/// impl Log {
///     fn on_message(&self, message: &str) {
///         self.lines.borrow_mut().push(message.to_owned());
///     }
/// }
///
/// struct Console {
///     log: Rc<Log>,
///     events: EventHandler,
/// }
///
/// impl Console {
///     fn attach(&mut self, event: &Event<dyn Fn(&str)>) {
///         let log = Rc::clone(&self.log);
///         self.events
///             .connect(event, Rc::new(move |message: &str| log.on_message(message)));
///     }
/// }
///
/// let message: Event<dyn Fn(&str)> = Event::new();
/// let log = Rc::new(Log::default());
/// {
///     let mut console = Console { log: Rc::clone(&log), events: EventHandler::new() };
///     console.attach(&message);
///     message.fire(|handler| handler("hello"));
/// }
/// // The console is gone; its handler went with it.
/// message.fire(|handler| handler("again"));
/// assert_eq!(*log.lines.borrow(), ["hello"]);
/// assert!(!message.has_subscribers());
/// ```
pub struct EventHandler {
    id: SubscriberId,
    connections: SmallVec<[Weak<dyn ErasedEvent>; INLINE_CONNECTIONS]>,
}

impl EventHandler {
    /// Creates a binder with a fresh identity and no connections.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SubscriberId::next(),
            connections: SmallVec::new(),
        }
    }

    /// The identity under which every handler of this binder is registered.
    #[must_use]
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Subscribes `handler` to `event` under this binder's identity and
    /// records the event for automatic disconnection.
    ///
    /// Connecting to the same event several times registers several handlers
    /// but records the event once. Records of events that no longer exist are
    /// discarded here, so an observer of many short-lived events stays small.
    pub fn connect<F: ?Sized + 'static>(&mut self, event: &Event<F>, handler: Rc<F>) {
        event.subscribe(self.id, handler);
        // Forget events that have been dropped since the last connect.
        self.connections
            .retain(|connection| connection.strong_count() > 0);
        let erased = event.erased();
        if !self
            .connections
            .iter()
            .any(|connection| Weak::ptr_eq(connection, &erased))
        {
            self.connections.push(erased);
        }
    }

    /// Removes every handler this binder registered on `event` and forgets it.
    ///
    /// Returns the number of handlers removed.
    pub fn disconnect<F: ?Sized + 'static>(&mut self, event: &Event<F>) -> usize {
        let erased = event.erased();
        self.connections
            .retain(|connection| !Weak::ptr_eq(connection, &erased));
        event.unsubscribe(self.id)
    }

    /// Unsubscribes from every recorded event that is still alive.
    pub fn disconnect_all(&mut self) {
        let mut removed = 0;
        for connection in self.connections.drain(..) {
            if let Some(event) = connection.upgrade() {
                removed += event.unsubscribe(self.id);
            }
        }
        if removed > 0 {
            log::debug!("{} disconnected ({removed} handlers removed)", self.id);
        }
    }

    /// Number of recorded events that are still alive.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections
            .iter()
            .filter(|connection| connection.strong_count() > 0)
            .count()
    }

    /// Returns `true` if this binder has a handler registered on `event`.
    #[must_use]
    pub fn is_connected_to<F: ?Sized + 'static>(&self, event: &Event<F>) -> bool {
        event.is_subscribed(self.id)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.disconnect_all();
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("id", &self.id)
            .field("connection_count", &self.connection_count())
            .finish()
    }
}
