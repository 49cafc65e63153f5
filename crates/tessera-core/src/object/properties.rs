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

use super::{Object, ObjectRef, PropertyTable};
use crate::error::PropertyError;
use crate::value::{IntoValue, Value, ValueType};
use crate::visitor::{ConstVisitor, Visitor};

/// Named property access, available on every [`Object`].
///
/// Writes create the property table on first use. Reads never create it: on
/// an object that was never written to they report
/// [`PropertyError::NotFound`], and [`Object::auxiliary`] stays `None`.
pub trait Properties: Object {
    /// Boxes `value` and stores it under `key`, replacing any previous entry.
    fn set_value<V: IntoValue>(&mut self, key: impl Into<String>, value: V) {
        let boxed = Value::create(value.into_payload()).into_object();
        self.get_or_create_auxiliary().insert(key, boxed);
    }

    /// Returns a copy of the payload stored under `key`.
    fn get_value<T: ValueType>(&self, key: &str) -> Result<T, PropertyError> {
        self.with_value(key, |value: &T| value.clone())
    }

    /// Runs `f` on the payload stored under `key` without copying it out.
    fn with_value<T: ValueType, R>(
        &self,
        key: &str,
        f: impl FnOnce(&T) -> R,
    ) -> Result<R, PropertyError> {
        let entry = self
            .get_property(key)
            .ok_or_else(|| PropertyError::not_found(key))?;
        let object = entry.read();
        check_type_name::<T>(key, &*object)?;
        match object.as_any().downcast_ref::<Value<T>>() {
            Some(value) => Ok(f(value.const_value())),
            None => Err(PropertyError::mismatch::<T>(key, &*object)),
        }
    }

    /// Runs `f` on the payload stored under `key`, in place.
    ///
    /// The entry is shared, so the change is visible to every holder of it.
    fn with_value_mut<T: ValueType, R>(
        &self,
        key: &str,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, PropertyError> {
        let entry = self
            .get_property(key)
            .ok_or_else(|| PropertyError::not_found(key))?;
        let mut object = entry.write();
        check_type_name::<T>(key, &*object)?;
        if let Some(value) = object.as_any_mut().downcast_mut::<Value<T>>() {
            return Ok(f(value.value()));
        }
        // Same registered name, different Rust type.
        Err(PropertyError::mismatch::<T>(key, &*object))
    }

    /// Attaches a shared object under `key`, returning the one it replaced.
    fn set_object(&mut self, key: impl Into<String>, object: ObjectRef) -> Option<ObjectRef> {
        self.get_or_create_auxiliary().insert(key, object)
    }

    /// Returns a new handle to the object stored under `key`.
    fn get_object(&self, key: &str) -> Option<ObjectRef> {
        self.get_property(key).cloned()
    }

    /// Detaches the object stored under `key`.
    fn remove_object(&mut self, key: &str) -> Option<ObjectRef> {
        self.auxiliary_slot().as_mut()?.remove(key)
    }

    /// Borrows the handle stored under `key`.
    fn get_property(&self, key: &str) -> Option<&ObjectRef> {
        self.auxiliary()?.get(key)
    }

    /// Returns the property table, creating it if needed.
    fn get_or_create_auxiliary(&mut self) -> &mut PropertyTable {
        self.auxiliary_slot().get_or_insert_with(|| {
            log::trace!("Creating property table");
            PropertyTable::new()
        })
    }

    /// Calls `f` with every `(key, handle)` pair in table order.
    fn for_each_property(&self, mut f: impl FnMut(&str, &ObjectRef)) {
        if let Some(table) = self.auxiliary() {
            for (key, object) in table {
                f(key, object);
            }
        }
    }

    /// Dispatches every stored object to `visitor`, once each, in table order.
    ///
    /// Each entry is write-locked while it is visited; a handler must not lock
    /// the entry it is given through another handle.
    fn visit_properties(&self, visitor: &mut dyn Visitor) {
        self.for_each_property(|_, object| object.write().accept(visitor));
    }

    /// Read-only counterpart of [`visit_properties`](Properties::visit_properties).
    fn visit_properties_const(&self, visitor: &mut dyn ConstVisitor) {
        self.for_each_property(|_, object| object.read().accept_const(visitor));
    }
}

impl<O: Object + ?Sized> Properties for O {}

fn check_type_name<T: ValueType>(key: &str, found: &dyn Object) -> Result<(), PropertyError> {
    if found.type_name() == T::TYPE_NAME {
        Ok(())
    } else {
        Err(PropertyError::mismatch::<T>(key, found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Entity;
    use crate::value::IntValue;

    #[test]
    fn round_trip_by_type() {
        let mut entity = Entity::new();
        entity.set_value("name", "Name field contents");
        entity.set_value("time", 10.0);
        entity.set_value("size", 3.1f32);
        entity.set_value("count", 5);
        entity.set_value("pos", 4u32);

        assert_eq!(entity.get_value::<String>("name").unwrap(), "Name field contents");
        assert_eq!(entity.get_value::<f64>("time").unwrap(), 10.0);
        assert_eq!(entity.get_value::<f32>("size").unwrap(), 3.1);
        assert_eq!(entity.get_value::<i32>("count").unwrap(), 5);
        assert_eq!(entity.get_value::<u32>("pos").unwrap(), 4);
    }

    #[test]
    fn wrong_type_is_reported_and_entry_kept() {
        let mut entity = Entity::new();
        entity.set_value("count", 5);

        let err = entity.get_value::<u32>("count").unwrap_err();
        assert_eq!(
            err,
            PropertyError::TypeMismatch {
                key: "count".into(),
                expected: "u32",
                expected_type: "u32",
                found: "i32",
                found_type: std::any::type_name::<IntValue>(),
            }
        );
        assert_eq!(entity.get_value::<i32>("count").unwrap(), 5);
    }

    #[test]
    fn reads_never_create_the_table() {
        let entity = Entity::new();

        assert_eq!(
            entity.get_value::<i32>("missing"),
            Err(PropertyError::NotFound {
                key: "missing".into()
            })
        );
        assert!(entity.get_object("missing").is_none());
        assert!(entity.auxiliary().is_none());
    }

    #[test]
    fn absent_and_empty_tables_are_distinct() {
        let mut entity = Entity::new();
        assert!(entity.auxiliary().is_none());

        entity.set_value("k", 1u8);
        assert!(entity.remove_object("k").is_some());

        let table = entity.auxiliary().expect("table survives removal");
        assert!(table.is_empty());
        assert!(matches!(
            entity.get_value::<u8>("k"),
            Err(PropertyError::NotFound { .. })
        ));
    }

    #[test]
    fn overwrite_keeps_one_entry_and_frees_the_old_box() {
        let mut entity = Entity::new();
        entity.set_value("k", 1);
        let held = entity.get_object("k").unwrap();
        let watch = held.downgrade();

        entity.set_value("k", 2);

        assert_eq!(entity.auxiliary().unwrap().len(), 1);
        assert_eq!(entity.get_value::<i32>("k").unwrap(), 2);
        // The old box lives on while `held` does.
        assert_eq!(held.ref_count(), 1);
        let old = held.read().as_any().downcast_ref::<IntValue>().map(|v| *v.const_value());
        assert_eq!(old, Some(1));

        drop(held);
        assert!(watch.upgrade().is_none());
    }

    #[test]
    fn with_value_mut_edits_in_place() {
        let mut entity = Entity::new();
        entity.set_value("count", 5);
        let shared = entity.get_object("count").unwrap();

        entity.with_value_mut::<i32, _>("count", |c| *c += 1).unwrap();

        assert_eq!(entity.get_value::<i32>("count").unwrap(), 6);
        let seen = shared.read().as_any().downcast_ref::<IntValue>().map(|v| *v.const_value());
        assert_eq!(seen, Some(6), "other holders see the edit");
        assert!(entity.with_value_mut::<u32, _>("count", |_| ()).is_err());
    }

    #[test]
    fn shared_object_is_reachable_from_two_holders() {
        let child = Entity::create().into_object();
        let mut a = Entity::new();
        let mut b = Entity::new();

        a.set_object("child", child.clone());
        b.set_object("child", child.clone());
        assert_eq!(child.ref_count(), 3);

        child.write().set_value("depth", 1u16);
        let via_b = b.get_object("child").unwrap();
        assert_eq!(via_b.read().get_value::<u16>("depth").unwrap(), 1);

        drop(via_b);
        drop(a);
        assert_eq!(child.ref_count(), 2);
    }

    #[test]
    fn for_each_property_is_a_no_op_without_table() {
        let entity = Entity::new();
        let mut visited = 0;
        entity.for_each_property(|_, _| visited += 1);
        assert_eq!(visited, 0);
    }
}
