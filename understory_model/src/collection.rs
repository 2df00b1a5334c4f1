// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observable, identity-keyed, owning container.
//!
//! # Storage
//!
//! Items live in an arena of slots (`Vec<Option<..>>` plus a free list). A
//! separate `Id -> slot` map locates them, and the public id set is kept in
//! lock-step with that map. Removing an item frees its slot for reuse; ids
//! handed out earlier in a [`SortView`] never point at slots, so a stale view
//! can at worst name an id that is no longer present.
//!
//! # Notifications
//!
//! | Mutation | Event | Timing |
//! |----------|-------|--------|
//! | [`add`](Collection::add) | `item_added(collection, id, item)` | after insertion |
//! | [`remove_by_id`](Collection::remove_by_id) | `item_removed(collection, id)` | before the item is dropped |
//! | [`clear`](Collection::clear) | `cleared(collection)` | once, after all items are dropped |
//!
//! Rejected duplicates and removals of absent ids fire nothing.
//!
//! Handlers receive the collection by shared reference. During
//! `item_removed` the item is still stored, so a handler can look it up and
//! read its final state.
//!
//! # Re-entrant mutation
//!
//! A handler cannot add, remove or clear items on the collection that is
//! notifying it: the mutating call holds the only `&mut` borrow while
//! handlers run, so such code is rejected at compile time. Do not work around
//! this with `Rc<RefCell<Collection<..>>>`; the nested `borrow_mut` panics at
//! runtime instead. Record the follow-up work in the handler (for example ids
//! to remove) and apply it after the mutating call returns.
//!
//! ```rust,compile_fail
//! use understory_model::Collection;
//!
//! let mut numbers = Collection::new(|n: &u32| *n);
//! let _s = numbers.on_item_added(|sender, id, _| {
//!     sender.remove_by_id(id);
//! });
//! ```
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_model::Collection;
//!
//! let mut numbers = Collection::new(|n: &u32| *n);
//! let odd = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&odd);
//! let _s = numbers.on_item_added(move |_, id, _| {
//!     if id % 2 == 1 {
//!         sink.borrow_mut().push(*id);
//!     }
//! });
//!
//! for n in 1..=4 {
//!     numbers.add(n).ok();
//! }
//! for id in odd.borrow_mut().drain(..) {
//!     numbers.remove_by_id(&id);
//! }
//! assert_eq!(numbers.len(), 2);
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use understory_event::{Event, Subscription};

use crate::error::{DuplicateIdError, NotFoundError};
use crate::identity::Identifiable;
use crate::sort_view::SortView;

/// Handler signature of [`Collection::item_added`].
pub type ItemAdded<Id, Item> = dyn Fn(&Collection<Id, Item>, &Id, &Item);

/// Handler signature of [`Collection::item_removed`].
pub type ItemRemoved<Id, Item> = dyn Fn(&Collection<Id, Item>, &Id);

/// Handler signature of [`Collection::cleared`].
pub type CollectionCleared<Id, Item> = dyn Fn(&Collection<Id, Item>);

/// One occupied arena slot.
struct Entry<Id, Item> {
    id: Id,
    item: Item,
}

/// An observable container that exclusively owns its items, keyed by an id
/// extracted from each item.
///
/// The extraction function is fixed at construction. Ids are unique: adding
/// an item whose id is already present is rejected and the item is handed
/// back to the caller.
///
/// # Example
///
/// ```rust
/// use understory_model::Collection;
///
/// #[derive(Clone)]
/// struct Track {
///     id: u32,
///     title: &'static str,
///     seconds: u32,
/// }
///
/// let mut playlist = Collection::new(|track: &Track| track.id);
/// playlist.add(Track { id: 1, title: "Intro", seconds: 95 }).ok();
/// playlist.add(Track { id: 2, title: "Theme", seconds: 240 }).ok();
/// playlist.add(Track { id: 3, title: "Outro", seconds: 60 }).ok();
///
/// // Duplicate ids are rejected and returned.
/// let rejected = playlist.add(Track { id: 2, title: "Theme (live)", seconds: 300 });
/// assert_eq!(rejected.err().map(|error| error.into_item().title), Some("Theme (live)"));
///
/// let by_length = playlist.sort_by_key(|track| track.seconds);
/// assert_eq!(by_length.as_slice(), &[3, 1, 2]);
///
/// assert!(playlist.remove_by_id(&1));
/// assert_eq!(playlist.len(), 2);
/// ```
pub struct Collection<Id: 'static, Item: 'static> {
    extract_id: Box<dyn Fn(&Item) -> Id>,
    ids: HashSet<Id>,
    index: HashMap<Id, usize>,
    slots: Vec<Option<Entry<Id, Item>>>,
    free: Vec<usize>,
    item_added: Event<ItemAdded<Id, Item>>,
    item_removed: Event<ItemRemoved<Id, Item>>,
    cleared: Event<CollectionCleared<Id, Item>>,
}

impl<Id, Item> Collection<Id, Item>
where
    Id: Clone + Eq + Hash + 'static,
    Item: 'static,
{
    /// Creates an empty collection using `extract_id` to identify items.
    #[must_use]
    pub fn new(extract_id: impl Fn(&Item) -> Id + 'static) -> Self {
        Self {
            extract_id: Box::new(extract_id),
            ids: HashSet::new(),
            index: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            item_added: Event::new(),
            item_removed: Event::new(),
            cleared: Event::new(),
        }
    }

    /// Creates an empty collection identifying items through [`Identifiable`].
    #[must_use]
    pub fn identifiable() -> Self
    where
        Item: Identifiable<Id>,
    {
        Self::new(<Item as Identifiable<Id>>::id)
    }

    /// Returns `true` if no items are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if at least one item is stored.
    #[must_use]
    pub fn has_items(&self) -> bool {
        !self.index.is_empty()
    }

    /// Number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if an item with `id` is stored.
    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.index.contains_key(id)
    }

    /// The set of stored ids.
    ///
    /// The borrow prevents mutating the collection while the set is in use.
    #[must_use]
    pub fn ids(&self) -> &HashSet<Id> {
        &self.ids
    }

    /// Returns the item stored under `id`, if any.
    #[must_use]
    pub fn get(&self, id: &Id) -> Option<&Item> {
        let slot = *self.index.get(id)?;
        Some(&self.occupied(slot).item)
    }

    /// Mutable access to the item stored under `id`, if any.
    ///
    /// The item's id must not change through this reference.
    pub fn get_mut(&mut self, id: &Id) -> Option<&mut Item> {
        let slot = *self.index.get(id)?;
        self.slots[slot].as_mut().map(|entry| &mut entry.item)
    }

    /// Returns the item stored under `id`, or [`NotFoundError`] if absent.
    pub fn find_by_id(&self, id: &Id) -> Result<&Item, NotFoundError<Id>> {
        self.get(id).ok_or_else(|| NotFoundError { id: id.clone() })
    }

    /// Mutable variant of [`find_by_id`](Self::find_by_id).
    pub fn find_by_id_mut(&mut self, id: &Id) -> Result<&mut Item, NotFoundError<Id>> {
        self.get_mut(id).ok_or_else(|| NotFoundError { id: id.clone() })
    }

    /// Iterates over `(id, item)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&Id, &Item)> + '_ {
        self.slots
            .iter()
            .flatten()
            .map(|entry| (&entry.id, &entry.item))
    }

    /// Takes ownership of `item` and fires [`item_added`](Self::item_added).
    ///
    /// If an item with the same id is already stored, nothing changes, no
    /// event fires, and `item` is returned inside the error.
    pub fn add(&mut self, item: Item) -> Result<(), DuplicateIdError<Id, Item>> {
        self.insert(item).map(|_| ())
    }

    /// Stores a copy of `value` and returns a reference to the stored copy.
    ///
    /// The reference stays valid only while the collection holds that id.
    pub fn add_copy(&mut self, value: &Item) -> Result<&Item, DuplicateIdError<Id, Item>>
    where
        Item: Clone,
    {
        let slot = self.insert(value.clone())?;
        Ok(&self.occupied(slot).item)
    }

    /// Removes and drops the item stored under `id`.
    ///
    /// [`item_removed`](Self::item_removed) fires while the item is still
    /// stored. Returns `false`, and fires nothing, if `id` is absent.
    pub fn remove_by_id(&mut self, id: &Id) -> bool {
        self.take_by_id(id).is_some()
    }

    /// Removes and drops the stored item that has the same id as `item`.
    pub fn remove(&mut self, item: &Item) -> bool {
        let id = (self.extract_id)(item);
        self.remove_by_id(&id)
    }

    /// Removes the item stored under `id` and returns it instead of dropping it.
    ///
    /// Notifies exactly like [`remove_by_id`](Self::remove_by_id).
    pub fn take_by_id(&mut self, id: &Id) -> Option<Item> {
        let slot = *self.index.get(id)?;
        {
            let this = &*self;
            let entry = this.occupied(slot);
            this.item_removed.fire(|handler| handler(this, &entry.id));
        }
        self.index.remove(id);
        self.ids.remove(id);
        let entry = self.slots[slot].take();
        self.free.push(slot);
        debug_assert_eq!(self.ids.len(), self.index.len(), "id set out of sync");
        log::trace!("removed item from slot {slot} ({} stored)", self.len());
        entry.map(|entry| entry.item)
    }

    /// Drops every item and fires [`cleared`](Self::cleared) once.
    ///
    /// No per-item `item_removed` events fire. The event fires even if the
    /// collection was already empty.
    pub fn clear(&mut self) {
        let dropped = self.len();
        self.index.clear();
        self.ids.clear();
        self.free.clear();
        self.slots.clear();
        log::trace!("cleared collection ({dropped} items dropped)");
        let this = &*self;
        this.cleared.fire(|handler| handler(this));
    }

    /// Snapshot of all ids, ordered by the strict weak ordering `less`.
    ///
    /// Items that compare equivalent keep their relative storage order.
    pub fn sort(&self, mut less: impl FnMut(&Item, &Item) -> bool) -> SortView<Id> {
        self.sort_by(|a, b| {
            if less(a, b) {
                Ordering::Less
            } else if less(b, a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
    }

    /// Snapshot of all ids, ordered by `compare`. Stable, O(n log n).
    pub fn sort_by(&self, mut compare: impl FnMut(&Item, &Item) -> Ordering) -> SortView<Id> {
        let mut entries: Vec<&Entry<Id, Item>> = self.slots.iter().flatten().collect();
        entries.sort_by(|a, b| compare(&a.item, &b.item));
        SortView::new(entries.into_iter().map(|entry| entry.id.clone()).collect())
    }

    /// Snapshot of all ids, ordered by the key `key` extracts from each item.
    pub fn sort_by_key<K: Ord>(&self, mut key: impl FnMut(&Item) -> K) -> SortView<Id> {
        self.sort_by(|a, b| key(a).cmp(&key(b)))
    }

    /// Event fired with `(collection, id, item)` after an item is added.
    #[must_use]
    pub fn item_added(&self) -> &Event<ItemAdded<Id, Item>> {
        &self.item_added
    }

    /// Event fired with `(collection, id)` before an item is dropped.
    #[must_use]
    pub fn item_removed(&self) -> &Event<ItemRemoved<Id, Item>> {
        &self.item_removed
    }

    /// Event fired with `(collection)` after [`clear`](Self::clear).
    #[must_use]
    pub fn cleared(&self) -> &Event<CollectionCleared<Id, Item>> {
        &self.cleared
    }

    /// Connects a closure to [`item_added`](Self::item_added).
    pub fn on_item_added(&self, handler: impl Fn(&Self, &Id, &Item) + 'static) -> Subscription {
        self.item_added.connect(Rc::new(handler))
    }

    /// Connects a closure to [`item_removed`](Self::item_removed).
    pub fn on_item_removed(&self, handler: impl Fn(&Self, &Id) + 'static) -> Subscription {
        self.item_removed.connect(Rc::new(handler))
    }

    /// Connects a closure to [`cleared`](Self::cleared).
    pub fn on_cleared(&self, handler: impl Fn(&Self) + 'static) -> Subscription {
        self.cleared.connect(Rc::new(handler))
    }

    fn insert(&mut self, item: Item) -> Result<usize, DuplicateIdError<Id, Item>> {
        let id = (self.extract_id)(&item);
        if self.index.contains_key(&id) {
            log::debug!("rejected duplicate item ({} stored)", self.len());
            return Err(DuplicateIdError::new(id, item));
        }

        let entry = Entry {
            id: id.clone(),
            item,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };
        self.ids.insert(id.clone());
        self.index.insert(id, slot);
        debug_assert_eq!(self.ids.len(), self.index.len(), "id set out of sync");
        log::trace!("added item in slot {slot} ({} stored)", self.len());

        let this = &*self;
        let entry = this.occupied(slot);
        this.item_added
            .fire(|handler| handler(this, &entry.id, &entry.item));
        Ok(slot)
    }

    fn occupied(&self, slot: usize) -> &Entry<Id, Item> {
        self.slots[slot]
            .as_ref()
            .expect("indexed slot is occupied")
    }
}

impl<Id: fmt::Debug + 'static, Item: 'static> fmt::Debug for Collection<Id, Item> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("ids", &self.ids)
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .field("item_added", &self.item_added)
            .field("item_removed", &self.item_removed)
            .field("cleared", &self.cleared)
            .finish_non_exhaustive()
    }
}
