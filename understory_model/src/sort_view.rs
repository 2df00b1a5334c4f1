// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-in-time ordered snapshot of collection ids.

use alloc::vec::Vec;

use crate::error::OutOfRangeError;

/// An immutable, ordered snapshot of ids produced by
/// [`Collection::sort`](crate::Collection::sort) and friends.
///
/// A view holds ids, not item references. It is not refreshed when the
/// collection changes afterwards, so a view taken before a removal may still
/// name the removed id; look ids up with
/// [`Collection::get`](crate::Collection::get) to skip such entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SortView<Id> {
    ids: Vec<Id>,
}

impl<Id> SortView<Id> {
    pub(crate) fn new(ids: Vec<Id>) -> Self {
        Self { ids }
    }

    /// Number of ids in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the view holds no ids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the id at `index`, or [`OutOfRangeError`] past the end.
    pub fn at(&self, index: usize) -> Result<&Id, OutOfRangeError> {
        self.ids.get(index).ok_or(OutOfRangeError {
            index,
            len: self.ids.len(),
        })
    }

    /// Returns the id at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Id> {
        self.ids.get(index)
    }

    /// Returns the ids in view order.
    #[must_use]
    pub fn as_slice(&self) -> &[Id] {
        &self.ids
    }

    /// Iterates over the ids in view order.
    pub fn iter(&self) -> core::slice::Iter<'_, Id> {
        self.ids.iter()
    }
}

impl<Id> Default for SortView<Id> {
    fn default() -> Self {
        Self { ids: Vec::new() }
    }
}

impl<'a, Id> IntoIterator for &'a SortView<Id> {
    type Item = &'a Id;
    type IntoIter = core::slice::Iter<'a, Id>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl<Id> IntoIterator for SortView<Id> {
    type Item = Id;
    type IntoIter = alloc::vec::IntoIter<Id>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}
