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

//! The base object model: the [`Object`] capability, the plain [`Entity`],
//! shared handles and the per-object property table.

use std::any::Any;

mod auxiliary;
mod handle;
mod properties;

pub use auxiliary::{Iter as PropertyIter, PropertyTable};
pub use handle::{ObjectRef, RefPtr, WeakPtr};
pub use properties::Properties;

use crate::value::TypeRegistration;
use crate::visitor::{ConstVisitor, Visitor};

/// The common interface of everything that can be stored in, or own, a
/// [`PropertyTable`].
///
/// Implementors are [`Entity`], every [`Value<T>`](crate::Value), and any
/// user type that wants to take part in visitor dispatch.
pub trait Object: Any + Send + Sync {
    /// The registered name of the concrete type.
    fn type_name(&self) -> &'static str;

    /// The Rust name of the concrete type, for diagnostics.
    fn rust_type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Dispatches to the visitor method matching the concrete type.
    fn accept(&mut self, visitor: &mut dyn Visitor);

    /// Read-only counterpart of [`accept`](Object::accept).
    fn accept_const(&self, visitor: &mut dyn ConstVisitor);

    /// The property table, or `None` if nothing was ever attached.
    fn auxiliary(&self) -> Option<&PropertyTable>;

    /// Storage slot for the lazily created property table.
    fn auxiliary_slot(&mut self) -> &mut Option<PropertyTable>;

    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns `self` as `&mut dyn Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A plain object that carries nothing but its optional property table.
#[derive(Debug, Default)]
pub struct Entity {
    auxiliary: Option<PropertyTable>,
}

impl Entity {
    /// Registered name reported by [`Object::type_name`].
    pub const TYPE_NAME: &'static str = "tessera::Entity";

    /// Creates an entity without a property table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entity and returns the first shared handle to it.
    pub fn create() -> RefPtr<Entity> {
        RefPtr::new(Self::new())
    }
}

inventory::submit! {
    TypeRegistration::object::<Entity>(Entity::TYPE_NAME)
}

impl Object for Entity {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept(&mut self, visitor: &mut dyn Visitor) {
        visitor.apply_object(self);
    }

    fn accept_const(&self, visitor: &mut dyn ConstVisitor) {
        visitor.apply_object(self);
    }

    fn auxiliary(&self) -> Option<&PropertyTable> {
        self.auxiliary.as_ref()
    }

    fn auxiliary_slot(&mut self) -> &mut Option<PropertyTable> {
        &mut self.auxiliary
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
