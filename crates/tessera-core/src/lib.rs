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

//! # Tessera Core
//!
//! Attaches named values of arbitrary types to reference-counted objects and
//! recovers them later with full type fidelity.
//!
//! The moving parts are:
//!
//! - [`Object`]: the capability every attachable thing implements, and
//!   [`Entity`], the plain object with nothing but a property table.
//! - [`RefPtr`] / [`ObjectRef`]: shared, reference-counted handles.
//! - [`PropertyTable`]: the lazily created, key-sorted side table.
//! - [`Value<T>`]: the wrapper that turns any [`ValueType`] payload into an
//!   [`Object`].
//! - [`TypeRegistry`]: the unique name registered for every payload type.
//! - [`Visitor`] / [`ConstVisitor`] and the [`VisitorTable`] handler tables:
//!   type-directed processing of heterogeneous tables.
//!
//! ```rust
//! use tessera_core::{Entity, Properties};
//!
//! let mut entity = Entity::new();
//! entity.set_value("count", 5);
//! entity.set_value("name", "Name field contents");
//!
//! assert_eq!(entity.get_value::<i32>("count").unwrap(), 5);
//! assert!(entity.get_value::<u32>("count").is_err());
//! ```

#![warn(missing_docs)]

// Lets the derive macro emit `::tessera_core::` paths that also resolve here.
extern crate self as tessera_core;

pub mod error;
pub mod object;
pub mod snapshot;
pub mod value;
pub mod visitor;

pub use error::{PropertyError, RegistryError};
pub use object::{
    Entity, Object, ObjectRef, Properties, PropertyIter, PropertyTable, RefPtr, WeakPtr,
};
pub use value::{
    BoolValue, ByteValue, CharValue, DoubleValue, FloatValue, IntValue, IntoValue, LongValue,
    ShortValue, StringValue, TypeRegistration, TypeRegistry, UbyteValue, UintValue, UlongValue,
    UshortValue, Value, ValueType,
};
pub use visitor::{ConstVisitor, ConstVisitorTable, Visitor, VisitorTable};

/// Derives [`ValueType`] for a payload struct or enum.
///
/// The type name defaults to `module_path::Ident`; override it with
/// `#[value_type(name = "...")]`.
pub use tessera_macros::ValueType;

#[doc(hidden)]
pub use inventory;

/// Builds the process-wide [`TypeRegistry`] and validates every statically
/// declared payload type.
///
/// Calling this early in `main` surfaces a duplicate type name at startup
/// instead of at the first use of the registry.
///
/// # Panics
///
/// Panics if two distinct types were declared with the same name.
pub fn init() {
    let registry = TypeRegistry::global();
    log::debug!("Type registry ready with {} payload types", registry.len());
}
