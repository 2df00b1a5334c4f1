// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observable optional-value cell.
//!
//! # Design
//!
//! [`Property<T>`] holds zero or one `T` by value and owns two events:
//! `value_changed(property, new_value)` and `cleared(property)`. Every
//! mutation fires synchronously, before the mutating call returns. There is
//! no change detection: assigning an equal value still notifies.
//!
//! Handlers receive the property by shared reference, so they can read its
//! state but cannot mutate it while a notification is being delivered. This
//! is a compile-time restriction; wrapping the property in a `RefCell` only
//! turns a nested assignment into a runtime borrow panic.
//!
//! # Ordering
//!
//! An empty property is distinct from every value:
//!
//! | left      | right     | `==`    | `<`     | `>`     |
//! |-----------|-----------|---------|---------|---------|
//! | empty     | empty     | true    | false   | false   |
//! | empty     | value `x` | false   | true    | false   |
//! | value `x` | empty     | false   | false   | true    |
//! | value `x` | value `y` | `x == y`| `x < y` | `x > y` |
//!
//! The same rules apply when comparing a property against a bare `T`.

use alloc::rc::Rc;
use core::cmp::Ordering;
use core::fmt;

use understory_event::{Event, Subscription};

use crate::error::EmptyValueError;

/// Handler signature of [`Property::value_changed`].
pub type ValueChanged<T> = dyn Fn(&Property<T>, &T);

/// Handler signature of [`Property::cleared`].
pub type PropertyCleared<T> = dyn Fn(&Property<T>);

/// An observable cell holding zero or one value.
///
/// A property is identity-bearing: it owns its subscriber lists, so it is
/// deliberately not `Clone`. The value inside is handled by value.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use understory_model::Property;
///
/// let mut title = Property::<String>::new();
/// assert!(title.is_empty());
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let _subscription = title.on_value_changed(move |_, value| sink.borrow_mut().push(value.clone()));
///
/// title.set_value("Inbox".to_owned());
/// assert_eq!(title.value().map(String::as_str), Ok("Inbox"));
/// assert_eq!(*seen.borrow(), ["Inbox"]);
///
/// title.clear();
/// assert!(title.value().is_err());
/// ```
pub struct Property<T: 'static> {
    value: Option<T>,
    value_changed: Event<ValueChanged<T>>,
    cleared: Event<PropertyCleared<T>>,
}

impl<T: 'static> Property<T> {
    /// Creates an empty property.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: None,
            value_changed: Event::new(),
            cleared: Event::new(),
        }
    }

    /// Creates a property holding `value`. No event fires.
    #[must_use]
    pub fn with_value(value: T) -> Self {
        Self {
            value: Some(value),
            ..Self::new()
        }
    }

    /// Returns `true` if the property holds no value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Returns `true` if the property holds a value.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the held value, or [`EmptyValueError`] if the property is empty.
    pub fn value(&self) -> Result<&T, EmptyValueError> {
        self.value.as_ref().ok_or(EmptyValueError)
    }

    /// Returns the held value, if any.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Stores `value` and fires [`value_changed`](Self::value_changed).
    ///
    /// Fires even if `value` equals the previous value.
    pub fn set_value(&mut self, value: T) {
        self.replace(value);
    }

    /// Stores `value`, fires [`value_changed`](Self::value_changed) and returns
    /// the previous value.
    pub fn replace(&mut self, value: T) -> Option<T> {
        let previous = self.value.replace(value);
        self.notify_changed();
        previous
    }

    /// Mutates the held value in place, then fires
    /// [`value_changed`](Self::value_changed).
    ///
    /// An empty property is left untouched and reports [`EmptyValueError`].
    pub fn update(&mut self, f: impl FnOnce(&mut T)) -> Result<(), EmptyValueError> {
        f(self.value.as_mut().ok_or(EmptyValueError)?);
        self.notify_changed();
        Ok(())
    }

    /// Empties the property and fires [`cleared`](Self::cleared).
    ///
    /// Fires even if the property was already empty.
    pub fn clear(&mut self) {
        self.value = None;
        let this = &*self;
        this.cleared.fire(|handler| handler(this));
    }

    /// Event fired with `(property, new_value)` after every assignment.
    #[must_use]
    pub fn value_changed(&self) -> &Event<ValueChanged<T>> {
        &self.value_changed
    }

    /// Event fired with `(property)` after every [`clear`](Self::clear).
    #[must_use]
    pub fn cleared(&self) -> &Event<PropertyCleared<T>> {
        &self.cleared
    }

    /// Connects a closure to [`value_changed`](Self::value_changed).
    pub fn on_value_changed(&self, handler: impl Fn(&Self, &T) + 'static) -> Subscription {
        self.value_changed.connect(Rc::new(handler))
    }

    /// Connects a closure to [`cleared`](Self::cleared).
    pub fn on_cleared(&self, handler: impl Fn(&Self) + 'static) -> Subscription {
        self.cleared.connect(Rc::new(handler))
    }

    fn notify_changed(&self) {
        if let Some(value) = &self.value {
            self.value_changed.fire(|handler| handler(self, value));
        }
    }
}

impl<T: 'static> Default for Property<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> From<T> for Property<T> {
    fn from(value: T) -> Self {
        Self::with_value(value)
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.value)
            .field(
                "value_changed_subscribers",
                &self.value_changed.subscriber_count(),
            )
            .field("cleared_subscribers", &self.cleared.subscriber_count())
            .finish()
    }
}

impl<T: PartialEq + 'static> PartialEq for Property<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq + 'static> Eq for Property<T> {}

impl<T: PartialOrd + 'static> PartialOrd for Property<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // `Option` already orders `None` before any `Some`.
        self.value.partial_cmp(&other.value)
    }
}

impl<T: PartialEq + 'static> PartialEq<T> for Property<T> {
    fn eq(&self, other: &T) -> bool {
        self.value.as_ref() == Some(other)
    }
}

impl<T: PartialOrd + 'static> PartialOrd<T> for Property<T> {
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        match &self.value {
            Some(value) => value.partial_cmp(other),
            None => Some(Ordering::Less),
        }
    }
}
