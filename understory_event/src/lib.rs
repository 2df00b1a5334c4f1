// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event --heading-base-level=0

//! Understory Event: typed publish/subscribe with lifetime-bound subscriptions.
//!
//! This crate is the notification layer underneath observable data models
//! such as `understory_model`. It provides:
//!
//! - [`Event`]: a typed channel holding an ordered list of handlers. Firing
//!   invokes every handler synchronously, in subscription order.
//! - [`SubscriberId`]: the opaque identity token used to match and remove
//!   the handlers belonging to one observer.
//! - [`EventHandler`]: a lifetime binder. An observer that subscribes through
//!   it is unsubscribed from every connected event when it is dropped.
//! - [`Subscription`]: the single-callback form of the binder, returned by
//!   [`Event::connect`]. Dropping it unsubscribes its handler.
//!
//! ## Handler signatures
//!
//! The type parameter of [`Event`] is the handler signature written as a trait
//! object type. Any number of arguments, borrowed or owned, can be carried:
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_event::Event;
//!
//! struct Slider {
//!     moved: Event<dyn Fn(&Slider, f32, f32)>,
//!     position: f32,
//! }
//!
//! let mut slider = Slider { moved: Event::new(), position: 0.0 };
//! let last = Rc::new(Cell::new(0.0));
//!
//! let sink = Rc::clone(&last);
//! let _subscription = slider.moved.connect(Rc::new(move |s: &Slider, _old: f32, new: f32| {
//!     assert_eq!(s.position, new);
//!     sink.set(new);
//! }));
//!
//! let old = slider.position;
//! slider.position = 0.5;
//! let slider = &slider;
//! slider.moved.fire(|handler| handler(slider, old, slider.position));
//! assert_eq!(last.get(), 0.5);
//! ```
//!
//! ## Threading
//!
//! Everything here is single-threaded: events and binders are `!Send` and
//! expect one logical owner thread, typically a UI thread.
//!
//! ## Logging
//!
//! Subscription changes and firings are reported through the [`log`] facade
//! at `trace` level; binder teardown at `debug` level. No logger is installed
//! by this crate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod event;
mod handler;
mod id;
mod subscription;

pub use event::Event;
pub use handler::EventHandler;
pub use id::SubscriberId;
pub use subscription::Subscription;
