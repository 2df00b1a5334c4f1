// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types reported by properties, collections and sort views.

use core::fmt;

/// Returned when reading the value of an empty [`Property`](crate::Property).
///
/// Check [`Property::has_value`](crate::Property::has_value) first, or use
/// [`Property::get`](crate::Property::get) for an `Option`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EmptyValueError;

impl fmt::Display for EmptyValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("property has no value")
    }
}

impl core::error::Error for EmptyValueError {}

/// Returned by [`Collection::find_by_id`](crate::Collection::find_by_id) for an
/// id that is not present.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NotFoundError<Id> {
    /// The id that was looked up.
    pub id: Id,
}

impl<Id: fmt::Debug> fmt::Debug for NotFoundError<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NotFoundError {{ id: {:?} }}", self.id)
    }
}

impl<Id: fmt::Debug> fmt::Display for NotFoundError<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no item with id {:?} in collection", self.id)
    }
}

impl<Id: fmt::Debug> core::error::Error for NotFoundError<Id> {}

/// Returned by [`SortView::at`](crate::SortView::at) for an index past the end.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OutOfRangeError {
    /// The requested index.
    pub index: usize,
    /// The length of the view at the time of the request.
    pub len: usize,
}

impl fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} out of range for sort view of length {}",
            self.index, self.len
        )
    }
}

impl core::error::Error for OutOfRangeError {}

/// Returned by [`Collection::add`](crate::Collection::add) when an item with
/// the same id is already stored.
///
/// The collection does not adopt the rejected item; ownership goes back to the
/// caller through [`into_item`](Self::into_item). Dropping the error drops the
/// item.
pub struct DuplicateIdError<Id, Item> {
    id: Id,
    item: Item,
}

impl<Id, Item> DuplicateIdError<Id, Item> {
    pub(crate) fn new(id: Id, item: Item) -> Self {
        Self { id, item }
    }

    /// The id that collided with a stored item.
    #[must_use]
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Borrows the rejected item.
    #[must_use]
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Returns ownership of the rejected item.
    #[must_use]
    pub fn into_item(self) -> Item {
        self.item
    }
}

// Manual impls so that `Item` needs no `Debug` or `PartialEq` of its own.
impl<Id: fmt::Debug, Item> fmt::Debug for DuplicateIdError<Id, Item> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuplicateIdError")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<Id: fmt::Debug, Item> fmt::Display for DuplicateIdError<Id, Item> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an item with id {:?} is already in the collection", self.id)
    }
}

impl<Id: fmt::Debug, Item> core::error::Error for DuplicateIdError<Id, Item> {}
