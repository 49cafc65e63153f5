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

//! Type-erased payload wrappers.
//!
//! [`Value<T>`] owns one payload and is itself an [`Object`], so it can sit in
//! any [`PropertyTable`] next to values of other types. The payload type only
//! needs a registered name ([`ValueType`]); visitor dispatch for the common
//! scalar types is built in.

use std::any::Any;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::object::{Object, PropertyTable, RefPtr};
use crate::visitor::{ConstVisitor, Visitor};

mod registry;

pub use registry::{TypeRegistration, TypeRegistry};

/// A payload type that can be stored in a [`Value`].
///
/// `TYPE_NAME` must be unique across the program; the [`TypeRegistry`]
/// enforces that. Prefer `#[derive(ValueType)]` or
/// [`declare_value_type!`](crate::declare_value_type), which also submit the
/// registration so collisions surface at startup.
pub trait ValueType: Any + Clone + Send + Sync {
    /// Stable, unique runtime name of the type.
    const TYPE_NAME: &'static str;

    /// Resolves the visitor method for a [`Value`] of this type.
    ///
    /// The default is the base case, [`Visitor::apply_object`].
    fn dispatch(value: &mut Value<Self>, visitor: &mut dyn Visitor) {
        visitor.apply_object(value);
    }

    /// Read-only counterpart of [`dispatch`](ValueType::dispatch).
    fn dispatch_const(value: &Value<Self>, visitor: &mut dyn ConstVisitor) {
        visitor.apply_object(value);
    }
}

/// Conversion into a storable payload, used by
/// [`Properties::set_value`](crate::Properties::set_value).
///
/// Every [`ValueType`] converts to itself; string slices are stored as
/// [`String`].
pub trait IntoValue {
    /// The payload type that ends up in the table.
    type Payload: ValueType;

    /// Performs the conversion.
    fn into_payload(self) -> Self::Payload;
}

impl<T: ValueType> IntoValue for T {
    type Payload = T;

    fn into_payload(self) -> T {
        self
    }
}

impl IntoValue for &str {
    type Payload = String;

    fn into_payload(self) -> String {
        self.to_owned()
    }
}

/// An [`Object`] that owns exactly one payload of type `T`.
#[derive(Clone)]
pub struct Value<T: ValueType> {
    value: T,
    auxiliary: Option<PropertyTable>,
}

impl<T: ValueType> Value<T> {
    /// Wraps `value`, registering `T` on first use.
    ///
    /// # Panics
    ///
    /// Panics if the name of `T` is already owned by another type.
    pub fn new(value: T) -> Self {
        TypeRegistry::global().ensure::<T>();
        Self {
            value,
            auxiliary: None,
        }
    }

    /// Wraps `value` and returns the first shared handle to it.
    pub fn create(value: T) -> RefPtr<Self> {
        RefPtr::new(Self::new(value))
    }

    /// Builds the payload with `init` directly into a new shared value.
    pub fn create_with(init: impl FnOnce() -> T) -> RefPtr<Self> {
        Self::create(init())
    }

    /// Mutable access to the payload. Changes stay in the box.
    pub fn value(&mut self) -> &mut T {
        &mut self.value
    }

    /// Shared access to the payload.
    pub fn const_value(&self) -> &T {
        &self.value
    }

    /// Replaces the payload, returning the old one.
    pub fn set(&mut self, value: T) -> T {
        std::mem::replace(&mut self.value, value)
    }

    /// Unwraps the payload.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: ValueType + Default> Default for Value<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: ValueType> Object for Value<T> {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn accept(&mut self, visitor: &mut dyn Visitor) {
        T::dispatch(self, visitor);
    }

    fn accept_const(&self, visitor: &mut dyn ConstVisitor) {
        T::dispatch_const(self, visitor);
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

impl<T: ValueType + fmt::Display> fmt::Display for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T: ValueType + fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type_name", &T::TYPE_NAME)
            .field("value", &self.value)
            .finish()
    }
}

impl<T: ValueType + Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

/// Implements [`ValueType`] for a payload type and submits its registration.
///
/// The name defaults to `module_path::Type`.
///
/// ```rust
/// #[derive(Clone)]
/// struct Speed(f32);
/// tessera_core::declare_value_type!(Speed, "physics::Speed");
///
/// let speed = tessera_core::Value::create(Speed(2.0));
/// assert_eq!(speed.read().const_value().0, 2.0);
/// ```
#[macro_export]
macro_rules! declare_value_type {
    ($ty:ty, $name:expr) => {
        impl $crate::ValueType for $ty {
            const TYPE_NAME: &'static str = $name;
        }

        $crate::inventory::submit! {
            $crate::TypeRegistration::of::<$ty>()
        }
    };
    ($ty:ty) => {
        $crate::declare_value_type!($ty, concat!(module_path!(), "::", stringify!($ty)));
    };
}

macro_rules! builtin_value_types {
    ($($ty:ty => $name:literal, $alias:ident, $apply:ident;)*) => {
        $(
            impl ValueType for $ty {
                const TYPE_NAME: &'static str = $name;

                fn dispatch(value: &mut Value<Self>, visitor: &mut dyn Visitor) {
                    visitor.$apply(value);
                }

                fn dispatch_const(value: &Value<Self>, visitor: &mut dyn ConstVisitor) {
                    visitor.$apply(value);
                }
            }

            #[doc = concat!("A [`Value`] holding a `", $name, "`.")]
            pub type $alias = Value<$ty>;

            inventory::submit! {
                TypeRegistration::of::<$ty>()
            }
        )*
    };
}

builtin_value_types! {
    bool => "bool", BoolValue, apply_bool;
    i8 => "i8", ByteValue, apply_byte;
    u8 => "u8", UbyteValue, apply_ubyte;
    i16 => "i16", ShortValue, apply_short;
    u16 => "u16", UshortValue, apply_ushort;
    i32 => "i32", IntValue, apply_int;
    u32 => "u32", UintValue, apply_uint;
    i64 => "i64", LongValue, apply_long;
    u64 => "u64", UlongValue, apply_ulong;
    f32 => "f32", FloatValue, apply_float;
    f64 => "f64", DoubleValue, apply_double;
    char => "char", CharValue, apply_char;
    String => "String", StringValue, apply_string;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Property {
        speed: f32,
    }

    crate::declare_value_type!(Property, "engine::property");

    #[test]
    fn mutation_through_value_persists() {
        let property = Value::create(Property { speed: 10.0 });

        property.write().value().speed += 2.0;
        assert_eq!(property.read().const_value().speed, 12.0);

        {
            let mut guard = property.write();
            let prop = guard.value();
            prop.speed *= 2.0;
        }
        assert_eq!(property.read().const_value().speed, 24.0);
    }

    #[test]
    fn type_name_comes_from_the_payload() {
        assert_eq!(Value::new(5i32).type_name(), "i32");
        assert_eq!(Value::new(4u32).type_name(), "u32");
        assert_eq!(Value::<Property>::default().type_name(), "engine::property");
        assert!(TypeRegistry::global().is_registered::<Property>());
    }

    #[test]
    fn create_with_builds_in_place() {
        let text = Value::create_with(|| "abc".repeat(2));
        assert_eq!(text.read().const_value(), "abcabc");
    }

    #[test]
    fn set_returns_previous_payload() {
        let mut value = Value::new(1u64);
        assert_eq!(value.set(7), 1);
        assert_eq!(value.into_inner(), 7);
    }

    #[test]
    fn display_and_serialize_show_the_payload() {
        let value = Value::new(3.5f64);
        assert_eq!(value.to_string(), "3.5");
        assert_eq!(serde_json::to_string(&value).unwrap(), "3.5");
    }

    #[test]
    fn str_converts_to_string_payload() {
        let payload = "Name field contents".into_payload();
        let _: &String = &payload;
        assert_eq!(payload, "Name field contents");
    }
}
