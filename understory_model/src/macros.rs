// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accessor generation for model types that embed properties.

/// Generates accessors for [`Property`](crate::Property) fields of a model type.
///
/// For each `name: T` entry, the owner gains `name(&self) -> &Property<T>` and
/// `name_mut(&mut self) -> &mut Property<T>`, both reading the field of the
/// same name. Observers subscribe through the shared accessor; mutation goes
/// through the `_mut` one.
///
/// ```rust
/// use understory_model::{Property, properties};
///
/// #[derive(Default)]
/// struct Contact {
///     name: Property<String>,
///     age: Property<u32>,
/// }
///
/// properties!(Contact {
///     /// Display name.
///     pub name: String,
///     pub age: u32,
/// });
///
/// let mut contact = Contact::default();
/// contact.name_mut().set_value("Ada".to_owned());
/// contact.age_mut().set_value(36);
/// assert!(contact.name().has_value());
/// assert_eq!(*contact.age(), 36);
/// ```
#[macro_export]
macro_rules! properties {
    ($owner:ty { $( $(#[$meta:meta])* $vis:vis $name:ident : $value:ty ),* $(,)? }) => {
        impl $owner {
            $(
                $(#[$meta])*
                #[allow(dead_code, reason = "generated accessor may be unused")]
                $vis fn $name(&self) -> &$crate::Property<$value> {
                    &self.$name
                }

                $crate::paste::paste! {
                    /// Mutable access to the property of the same name.
                    #[allow(dead_code, reason = "generated accessor may be unused")]
                    $vis fn [<$name _mut>](&mut self) -> &mut $crate::Property<$value> {
                        &mut self.$name
                    }
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::Property;
    use alloc::rc::Rc;
    use alloc::string::String;
    use core::cell::Cell;

    #[derive(Default)]
    struct Widget {
        title: Property<String>,
        width: Property<f64>,
    }

    properties!(Widget {
        title: String,
        width: f64,
    });

    #[test]
    fn accessors_reach_fields() {
        let mut widget = Widget::default();
        assert!(widget.title().is_empty());

        let changes = Rc::new(Cell::new(0));
        let sink = Rc::clone(&changes);
        let _s = widget
            .width()
            .on_value_changed(move |_, _| sink.set(sink.get() + 1));

        widget.width_mut().set_value(120.0);
        widget.title_mut().set_value(String::from("Settings"));
        assert_eq!(changes.get(), 1);
        assert_eq!(widget.width().get(), Some(&120.0));
        assert_eq!(widget.title.value().map(String::as_str), Ok("Settings"));
    }
}
