// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;

use super::{ConstVisitor, Visitor};
use crate::object::Object;
use crate::value::{TypeRegistry, Value, ValueType};

// Handlers return `false` when the object only shares the registered name.
type Handler<'a> = Box<dyn FnMut(&mut dyn Object) -> bool + 'a>;
type ConstHandler<'a> = Box<dyn FnMut(&dyn Object) -> bool + 'a>;
type Fallback<'a> = Box<dyn FnMut(&mut dyn Object) + 'a>;
type ConstFallback<'a> = Box<dyn FnMut(&dyn Object) + 'a>;

/// A [`Visitor`] assembled from per-type handlers keyed by registered type
/// name.
///
/// Unlike the typed methods of [`Visitor`], a table can handle any payload
/// type, including ones declared in downstream crates. Objects whose type has
/// no handler, or that carry a handled name without being a [`Value`] of that
/// type, go to the [`otherwise`](VisitorTable::otherwise) handler; without
/// one they are counted in [`unhandled`](VisitorTable::unhandled).
///
/// ```rust
/// use tessera_core::{Entity, Properties, VisitorTable};
///
/// let mut entity = Entity::new();
/// entity.set_value("count", 5);
/// entity.set_value("name", "tessera");
///
/// let mut seen = Vec::new();
/// let mut table = VisitorTable::new()
///     .on::<i32>(|count| *count *= 10)
///     .on::<String>(|name| seen.push(name.clone()));
/// entity.visit_properties(&mut table);
/// drop(table);
///
/// assert_eq!(entity.get_value::<i32>("count").unwrap(), 50);
/// assert_eq!(seen, vec!["tessera".to_string()]);
/// ```
#[derive(Default)]
pub struct VisitorTable<'a> {
    handlers: HashMap<&'static str, Handler<'a>>,
    fallback: Option<Fallback<'a>>,
    unhandled: usize,
}

impl<'a> VisitorTable<'a> {
    /// Creates a table without handlers.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            fallback: None,
            unhandled: 0,
        }
    }

    /// Handles every [`Value<T>`] with `handler`, replacing an earlier
    /// handler for the same type.
    pub fn on<T: ValueType>(mut self, mut handler: impl FnMut(&mut T) + 'a) -> Self {
        TypeRegistry::global().ensure::<T>();
        let handler: Handler<'a> = Box::new(move |object: &mut dyn Object| {
            match object.as_any_mut().downcast_mut::<Value<T>>() {
                Some(value) => {
                    handler(value.value());
                    true
                }
                None => false,
            }
        });
        self.handlers.insert(T::TYPE_NAME, handler);
        self
    }

    /// Handles every object without a type-specific handler.
    pub fn otherwise(mut self, handler: impl FnMut(&mut dyn Object) + 'a) -> Self {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// Number of objects that reached neither a handler nor the fallback.
    pub fn unhandled(&self) -> usize {
        self.unhandled
    }
}

impl Visitor for VisitorTable<'_> {
    fn apply_object(&mut self, object: &mut dyn Object) {
        let name = object.type_name();
        let handled = match self.handlers.get_mut(name) {
            Some(handler) => handler(object),
            None => false,
        };
        if handled {
            return;
        }
        if let Some(fallback) = self.fallback.as_mut() {
            fallback(object);
        } else {
            log::warn!(
                "No handler registered for '{name}' (`{}`)",
                object.rust_type_name()
            );
            self.unhandled += 1;
        }
    }
}

/// Read-only counterpart of [`VisitorTable`].
#[derive(Default)]
pub struct ConstVisitorTable<'a> {
    handlers: HashMap<&'static str, ConstHandler<'a>>,
    fallback: Option<ConstFallback<'a>>,
    unhandled: usize,
}

impl<'a> ConstVisitorTable<'a> {
    /// Creates a table without handlers.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            fallback: None,
            unhandled: 0,
        }
    }

    /// Handles every [`Value<T>`] with `handler`.
    pub fn on<T: ValueType>(mut self, mut handler: impl FnMut(&T) + 'a) -> Self {
        TypeRegistry::global().ensure::<T>();
        let handler: ConstHandler<'a> = Box::new(move |object: &dyn Object| {
            match object.as_any().downcast_ref::<Value<T>>() {
                Some(value) => {
                    handler(value.const_value());
                    true
                }
                None => false,
            }
        });
        self.handlers.insert(T::TYPE_NAME, handler);
        self
    }

    /// Handles every object without a type-specific handler.
    pub fn otherwise(mut self, handler: impl FnMut(&dyn Object) + 'a) -> Self {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// Number of objects that reached neither a handler nor the fallback.
    pub fn unhandled(&self) -> usize {
        self.unhandled
    }
}

impl ConstVisitor for ConstVisitorTable<'_> {
    fn apply_object(&mut self, object: &dyn Object) {
        let name = object.type_name();
        let handled = match self.handlers.get_mut(name) {
            Some(handler) => handler(object),
            None => false,
        };
        if handled {
            return;
        }
        if let Some(fallback) = self.fallback.as_mut() {
            fallback(object);
        } else {
            log::warn!(
                "No handler registered for '{name}' (`{}`)",
                object.rust_type_name()
            );
            self.unhandled += 1;
        }
    }
}
