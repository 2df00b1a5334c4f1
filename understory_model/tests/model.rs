// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_model` crate.
//!
//! A small object model is built the way an application would: a struct
//! with property fields and an id, stored in a collection, observed by
//! listeners that bind their subscriptions to their own lifetime.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use understory_model::{
    Collection, EventHandler, Identifiable, NotFoundError, Property, properties,
};

#[derive(Default)]
struct MyModel {
    id: i32,
    my_string_property: Property<String>,
    my_int_property: Property<i32>,
}

properties!(MyModel {
    my_string_property: String,
    my_int_property: i32,
});

impl MyModel {
    fn with_id(id: i32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// Copies values only; the copy starts without subscribers.
impl Clone for MyModel {
    fn clone(&self) -> Self {
        let mut copy = Self::with_id(self.id);
        if let Some(value) = self.my_string_property.get() {
            copy.my_string_property = Property::with_value(value.clone());
        }
        if let Some(value) = self.my_int_property.get() {
            copy.my_int_property = Property::with_value(*value);
        }
        copy
    }
}

impl Identifiable<i32> for MyModel {
    fn id(&self) -> i32 {
        self.id
    }
}

/// Observer reacting to value changes through a bound method.
struct ValueChangeListener {
    state: Rc<ListenerState>,
    events: EventHandler,
}

#[derive(Default)]
struct ListenerState {
    last: RefCell<Option<String>>,
    count: Cell<u32>,
}

impl ListenerState {
    fn on_value_changed(&self, _sender: &Property<String>, new_value: &String) {
        *self.last.borrow_mut() = Some(new_value.clone());
        self.count.set(self.count.get() + 1);
    }
}

impl ValueChangeListener {
    fn new() -> Self {
        Self {
            state: Rc::default(),
            events: EventHandler::new(),
        }
    }

    fn observe(&mut self, property: &Property<String>) {
        let state = Rc::clone(&self.state);
        self.events.connect(
            property.value_changed(),
            Rc::new(move |sender: &Property<String>, value: &String| {
                state.on_value_changed(sender, value);
            }),
        );
    }

    fn last(&self) -> Option<String> {
        self.state.last.borrow().clone()
    }

    fn count(&self) -> u32 {
        self.state.count.get()
    }
}

#[test]
fn listener_follows_model_property() {
    let mut model = MyModel::with_id(1);
    let mut listener = ValueChangeListener::new();
    listener.observe(model.my_string_property());

    model.my_string_property_mut().set_value("hello".to_owned());
    assert_eq!(listener.last().as_deref(), Some("hello"));
    assert_eq!(listener.count(), 1);

    // Values on other properties do not reach this listener.
    model.my_int_property_mut().set_value(5);
    assert_eq!(listener.count(), 1);
}

#[test]
fn dropped_listener_is_unsubscribed() {
    let mut model = MyModel::with_id(1);
    let mut listener = ValueChangeListener::new();
    listener.observe(model.my_string_property());
    let state = Rc::clone(&listener.state);

    drop(listener);
    assert!(!model.my_string_property().value_changed().has_subscribers());

    model.my_string_property_mut().set_value("unheard".to_owned());
    assert_eq!(state.count.get(), 0);
}

#[test]
fn listener_outliving_model_is_harmless() {
    let mut listener = ValueChangeListener::new();
    {
        let mut model = MyModel::with_id(1);
        listener.observe(model.my_string_property());
        model.my_string_property_mut().set_value("once".to_owned());
    }
    assert_eq!(listener.events.connection_count(), 0);
    assert_eq!(listener.count(), 1);
}

#[test]
fn collection_initial_state() {
    let collection = Collection::<i32, MyModel>::identifiable();
    assert!(collection.is_empty());
    assert!(!collection.has_items());
    assert!(collection.ids().is_empty());
    assert_eq!(collection.len(), 0);
}

#[test]
fn collection_add_owned_item() {
    let mut collection = Collection::<i32, MyModel>::identifiable();
    let mut item = MyModel::with_id(123);
    item.my_int_property_mut().set_value(7);

    assert!(collection.add(item).is_ok());
    assert_eq!(collection.len(), 1);
    assert!(collection.contains(&123));
    assert!(collection.has_items());
    assert!(!collection.is_empty());
    assert!(collection.ids().contains(&123));

    let stored = collection.find_by_id(&123).expect("id 123 was added");
    assert_eq!(stored.id(), 123);
    assert!(*stored.my_int_property() == 7);
    assert!(matches!(
        collection.find_by_id(&124),
        Err(NotFoundError { id: 124 })
    ));
}

#[test]
fn collection_add_copy_round_trip() {
    let mut original = MyModel::with_id(42);
    original
        .my_string_property_mut()
        .set_value("source".to_owned());

    let mut collection = Collection::<i32, MyModel>::identifiable();
    let copy_title = collection
        .add_copy(&original)
        .map(|copy| copy.my_string_property().get().cloned())
        .expect("fresh id is accepted");
    assert_eq!(copy_title.as_deref(), Some("source"));

    // The stored copy is independent of the original.
    original
        .my_string_property_mut()
        .set_value("changed".to_owned());
    let stored = collection.find_by_id(&42).expect("copy is stored");
    assert!(*stored.my_string_property() == "source".to_owned());
}

#[test]
fn stored_items_stay_observable() {
    let mut collection = Collection::<i32, MyModel>::identifiable();
    collection.add(MyModel::with_id(1)).ok();

    let mut listener = ValueChangeListener::new();
    listener.observe(
        collection
            .get(&1)
            .expect("id 1 was added")
            .my_string_property(),
    );

    if let Some(item) = collection.get_mut(&1) {
        item.my_string_property_mut().set_value("edited".to_owned());
    }
    assert_eq!(listener.last().as_deref(), Some("edited"));

    // Removing the item drops its property; the listener keeps no dangling link.
    collection.remove_by_id(&1);
    assert_eq!(listener.events.connection_count(), 0);
}

#[test]
fn removal_handler_reads_final_state() {
    let mut collection = Collection::<i32, MyModel>::identifiable();
    let mut item = MyModel::with_id(7);
    item.my_string_property_mut()
        .set_value("last words".to_owned());
    collection.add(item).ok();

    let farewell = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&farewell);
    let _subscription = collection.on_item_removed(move |sender, id| {
        let text = sender
            .find_by_id(id)
            .ok()
            .and_then(|item| item.my_string_property().get().cloned());
        *sink.borrow_mut() = text;
    });

    assert!(collection.remove_by_id(&7));
    assert_eq!(farewell.borrow().as_deref(), Some("last words"));
}

#[test]
fn events_track_full_lifecycle() {
    let mut collection = Collection::<i32, MyModel>::identifiable();
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut observer = EventHandler::new();
    let sink = Rc::clone(&log);
    observer.connect(
        collection.item_added(),
        Rc::new(move |_: &Collection<i32, MyModel>, id: &i32, _: &MyModel| {
            sink.borrow_mut().push(format!("add {id}"));
        }),
    );
    let sink = Rc::clone(&log);
    observer.connect(
        collection.item_removed(),
        Rc::new(move |_: &Collection<i32, MyModel>, id: &i32| {
            sink.borrow_mut().push(format!("remove {id}"));
        }),
    );
    let sink = Rc::clone(&log);
    observer.connect(
        collection.cleared(),
        Rc::new(move |_: &Collection<i32, MyModel>| {
            sink.borrow_mut().push("clear".to_owned());
        }),
    );

    collection.add(MyModel::with_id(1)).ok();
    collection.add(MyModel::with_id(2)).ok();
    collection.add(MyModel::with_id(2)).ok();
    collection.remove_by_id(&1);
    collection.remove_by_id(&1);
    collection.clear();

    assert_eq!(*log.borrow(), ["add 1", "add 2", "remove 1", "clear"]);
    assert_eq!(observer.connection_count(), 3);
}

#[test]
fn sort_by_property_value() {
    let mut collection = Collection::<i32, MyModel>::identifiable();
    for (id, value) in [(10, 3), (20, 1), (30, 2)] {
        let mut item = MyModel::with_id(id);
        item.my_int_property_mut().set_value(value);
        collection.add(item).ok();
    }
    // An empty property sorts before any value.
    collection.add(MyModel::with_id(40)).ok();

    let view = collection.sort(|a, b| a.my_int_property() < b.my_int_property());
    assert_eq!(view.as_slice(), &[40, 20, 30, 10]);
    assert_eq!(view.at(0), Ok(&40));
    assert!(view.at(4).is_err());
}
