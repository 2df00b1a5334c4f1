// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conventional identity capability for collection items.

/// An item that knows its own identity.
///
/// Implementing this trait lets a [`Collection`](crate::Collection) be built
/// with [`Collection::identifiable`](crate::Collection::identifiable) instead
/// of an explicit extraction function. It is a convenience, not a
/// requirement: any `Fn(&Item) -> Id` works as well.
///
/// ```rust
/// use understory_model::Identifiable;
///
/// struct Account {
///     number: u64,
/// }
///
/// impl Identifiable<u64> for Account {
///     fn id(&self) -> u64 {
///         self.number
///     }
/// }
///
/// assert_eq!(Account { number: 42 }.id(), 42);
/// ```
pub trait Identifiable<Id> {
    /// Returns the identity of this item.
    ///
    /// Must stay stable for as long as the item is stored in a collection.
    fn id(&self) -> Id;
}
