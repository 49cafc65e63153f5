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

//! Double dispatch over heterogeneous objects.
//!
//! [`Object::accept`] hands the object to the visitor method matching its
//! concrete type. Each built-in payload has its own method; every one of them
//! defaults to [`Visitor::apply_object`], the base case, so a visitor only
//! overrides what it cares about.
//!
//! For payload types outside the built-in set, a [`VisitorTable`] maps
//! registered type names to handlers.
//!
//! ```rust
//! use tessera_core::{Entity, IntValue, Object, Properties, Visitor};
//!
//! #[derive(Default)]
//! struct SumInts(i64);
//!
//! impl Visitor for SumInts {
//!     fn apply_object(&mut self, _object: &mut dyn Object) {}
//!
//!     fn apply_int(&mut self, value: &mut IntValue) {
//!         self.0 += i64::from(*value.const_value());
//!     }
//! }
//!
//! let mut entity = Entity::new();
//! entity.set_value("a", 2);
//! entity.set_value("b", 3);
//! entity.set_value("c", "ignored");
//!
//! let mut sum = SumInts::default();
//! entity.visit_properties(&mut sum);
//! assert_eq!(sum.0, 5);
//! ```

mod table;

pub use table::{ConstVisitorTable, VisitorTable};

use crate::object::Object;
use crate::value::{
    BoolValue, ByteValue, CharValue, DoubleValue, FloatValue, IntValue, LongValue, ShortValue,
    StringValue, UbyteValue, UintValue, UlongValue, UshortValue,
};

macro_rules! visitor_traits {
    ($($apply:ident($alias:ident);)*) => {
        /// Mutable double-dispatch visitor.
        pub trait Visitor {
            /// Base case, reached by plain objects and by every concrete type
            /// without an overriding method.
            fn apply_object(&mut self, object: &mut dyn Object);

            $(
                #[doc = concat!(
                    "Handles a [`", stringify!($alias), "`]. Defaults to the base case."
                )]
                fn $apply(&mut self, value: &mut $alias) {
                    self.apply_object(value);
                }
            )*
        }

        /// Read-only double-dispatch visitor, for traversals that must not
        /// mutate shared objects (logging, serialization).
        pub trait ConstVisitor {
            /// Base case, reached by plain objects and by every concrete type
            /// without an overriding method.
            fn apply_object(&mut self, object: &dyn Object);

            $(
                #[doc = concat!(
                    "Handles a [`", stringify!($alias), "`]. Defaults to the base case."
                )]
                fn $apply(&mut self, value: &$alias) {
                    self.apply_object(value);
                }
            )*
        }
    };
}

visitor_traits! {
    apply_bool(BoolValue);
    apply_byte(ByteValue);
    apply_ubyte(UbyteValue);
    apply_short(ShortValue);
    apply_ushort(UshortValue);
    apply_int(IntValue);
    apply_uint(UintValue);
    apply_long(LongValue);
    apply_ulong(UlongValue);
    apply_float(FloatValue);
    apply_double(DoubleValue);
    apply_char(CharValue);
    apply_string(StringValue);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Entity;
    use crate::value::Value;

    /// Records which method each visited object reached.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Visitor for Recorder {
        fn apply_object(&mut self, object: &mut dyn Object) {
            self.calls.push(format!("object:{}", object.type_name()));
        }

        fn apply_int(&mut self, value: &mut IntValue) {
            self.calls.push(format!("int:{}", value.const_value()));
            *value.value() += 1;
        }

        fn apply_string(&mut self, value: &mut StringValue) {
            self.calls.push(format!("string:{}", value.const_value()));
        }
    }

    impl ConstVisitor for Recorder {
        fn apply_object(&mut self, object: &dyn Object) {
            self.calls.push(format!("object:{}", object.type_name()));
        }

        fn apply_uint(&mut self, value: &UintValue) {
            self.calls.push(format!("uint:{value}"));
        }
    }

    #[test]
    fn typed_method_is_selected_by_concrete_type() {
        let mut recorder = Recorder::default();
        let mut int = Value::new(5i32);

        int.accept(&mut recorder);
        Value::new(String::from("hi")).accept(&mut recorder);

        assert_eq!(recorder.calls, vec!["int:5", "string:hi"]);
        assert_eq!(*int.const_value(), 6, "visitor mutation stays in the box");
    }

    #[test]
    fn unhandled_types_fall_back_to_base_case() {
        let mut recorder = Recorder::default();

        Value::new(1.5f32).accept(&mut recorder);
        Entity::new().accept(&mut recorder);

        assert_eq!(recorder.calls, vec!["object:f32", "object:tessera::Entity"]);
    }

    #[test]
    fn const_visitor_mirrors_dispatch() {
        let mut recorder = Recorder::default();

        Value::new(4u32).accept_const(&mut recorder);
        Value::new(5i32).accept_const(&mut recorder);

        assert_eq!(recorder.calls, vec!["uint:4", "object:i32"]);
    }
}
