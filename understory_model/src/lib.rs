// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_model --heading-base-level=0

//! Understory Model: observable properties and identity-keyed collections.
//!
//! Building blocks for the object model behind a user interface, where views
//! observe data and react to its changes:
//!
//! - [`Property`]: a cell holding zero or one value that notifies on every
//!   assignment and on clear.
//! - [`Collection`]: a container that owns its items, keys them by an id
//!   extracted from each item, and notifies on add, remove and clear.
//! - [`SortView`]: an ordered snapshot of collection ids.
//! - [`Identifiable`]: the conventional way for an item to expose its id.
//! - [`properties!`]: accessor generation for model structs embedding
//!   properties.
//!
//! Notifications are delivered through [`understory_event`], re-exported
//! here for convenience. Observers tie their subscriptions to their own
//! lifetime with an [`EventHandler`] or a [`Subscription`].
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_model::{Collection, EventHandler, Identifiable, Property, properties};
//!
//! #[derive(Default)]
//! struct Task {
//!     id: u32,
//!     title: Property<String>,
//!     done: Property<bool>,
//! }
//!
//! properties!(Task {
//!     pub title: String,
//!     pub done: bool,
//! });
//!
//! impl Identifiable<u32> for Task {
//!     fn id(&self) -> u32 {
//!         self.id
//!     }
//! }
//!
//! let mut tasks = Collection::<u32, Task>::identifiable();
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let mut observer = EventHandler::new();
//! let sink = Rc::clone(&log);
//! observer.connect(
//!     tasks.item_added(),
//!     Rc::new(move |_: &Collection<u32, Task>, id: &u32, _: &Task| {
//!         sink.borrow_mut().push(format!("added {id}"));
//!     }),
//! );
//! let sink = Rc::clone(&log);
//! observer.connect(
//!     tasks.item_removed(),
//!     Rc::new(move |tasks: &Collection<u32, Task>, id: &u32| {
//!         // The item is still readable while removal is being announced.
//!         let title = tasks.get(id).and_then(|task| task.title().get().cloned());
//!         sink.borrow_mut().push(format!("removed {}", title.unwrap_or_default()));
//!     }),
//! );
//!
//! let mut task = Task { id: 1, ..Task::default() };
//! task.title_mut().set_value("Write docs".to_owned());
//! assert!(tasks.add(task).is_ok());
//! assert!(tasks.remove_by_id(&1));
//!
//! drop(observer);
//! assert!(tasks.add(Task { id: 2, ..Task::default() }).is_ok());
//! assert_eq!(*log.borrow(), ["added 1", "removed Write docs"]);
//! ```
//!
//! ## Threading
//!
//! Like the events they carry, properties and collections are
//! single-threaded.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collection;
mod error;
mod identity;
mod macros;
mod property;
mod sort_view;

#[doc(hidden)]
pub use paste;

pub use collection::{Collection, CollectionCleared, ItemAdded, ItemRemoved};
pub use error::{DuplicateIdError, EmptyValueError, NotFoundError, OutOfRangeError};
pub use identity::Identifiable;
pub use property::{Property, PropertyCleared, ValueChanged};
pub use sort_view::SortView;

pub use understory_event::{Event, EventHandler, SubscriberId, Subscription};
