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

//! Read-only JSON snapshots of property tables.
//!
//! The snapshot is built by a [`ConstVisitor`], so taking one never mutates
//! the objects it walks. Keys appear in table order. Built-in payloads become
//! JSON scalars; any other object becomes `{"type": <name>}`, with a nested
//! `"properties"` object when it carries a table of its own. A built-in value
//! that carries properties becomes `{"value": .., "properties": {..}}`.
//!
//! Objects stored inside their own table (directly or through a cycle) are
//! not supported.

use serde_json::{Map, Value as JsonValue};

use crate::object::{Object, Properties};
use crate::value::{
    BoolValue, ByteValue, CharValue, DoubleValue, FloatValue, IntValue, LongValue, ShortValue,
    StringValue, UbyteValue, UintValue, UlongValue, UshortValue,
};
use crate::visitor::ConstVisitor;

/// Converts the properties of `object` to a JSON object. An object without a
/// property table yields `{}`.
pub fn properties_to_json(object: &dyn Object) -> JsonValue {
    let mut map = Map::new();
    object.for_each_property(|key, entry| {
        map.insert(key.to_owned(), object_to_json(&*entry.read()));
    });
    JsonValue::Object(map)
}

/// Converts a single object to JSON.
pub fn object_to_json(object: &dyn Object) -> JsonValue {
    let mut snapshot = JsonSnapshot::default();
    object.accept_const(&mut snapshot);
    snapshot.into_json()
}

/// The [`ConstVisitor`] behind [`object_to_json`].
#[derive(Debug, Default)]
pub struct JsonSnapshot {
    output: JsonValue,
}

impl JsonSnapshot {
    /// The JSON produced by the last visited object.
    pub fn into_json(self) -> JsonValue {
        self.output
    }

    fn emit(&mut self, object: &dyn Object, payload: JsonValue) {
        self.output = match object.auxiliary() {
            Some(_) => {
                let mut map = Map::new();
                map.insert("value".into(), payload);
                map.insert("properties".into(), properties_to_json(object));
                JsonValue::Object(map)
            }
            None => payload,
        };
    }
}

impl ConstVisitor for JsonSnapshot {
    fn apply_object(&mut self, object: &dyn Object) {
        let mut map = Map::new();
        map.insert("type".into(), object.type_name().into());
        if object.auxiliary().is_some() {
            map.insert("properties".into(), properties_to_json(object));
        }
        self.output = JsonValue::Object(map);
    }

    fn apply_bool(&mut self, value: &BoolValue) {
        self.emit(value, (*value.const_value()).into());
    }

    fn apply_byte(&mut self, value: &ByteValue) {
        self.emit(value, (*value.const_value()).into());
    }

    fn apply_ubyte(&mut self, value: &UbyteValue) {
        self.emit(value, (*value.const_value()).into());
    }

    fn apply_short(&mut self, value: &ShortValue) {
        self.emit(value, (*value.const_value()).into());
    }

    fn apply_ushort(&mut self, value: &UshortValue) {
        self.emit(value, (*value.const_value()).into());
    }

    fn apply_int(&mut self, value: &IntValue) {
        self.emit(value, (*value.const_value()).into());
    }

    fn apply_uint(&mut self, value: &UintValue) {
        self.emit(value, (*value.const_value()).into());
    }

    fn apply_long(&mut self, value: &LongValue) {
        self.emit(value, (*value.const_value()).into());
    }

    fn apply_ulong(&mut self, value: &UlongValue) {
        self.emit(value, (*value.const_value()).into());
    }

    // Non-finite floats become null.
    fn apply_float(&mut self, value: &FloatValue) {
        self.emit(value, (*value.const_value()).into());
    }

    fn apply_double(&mut self, value: &DoubleValue) {
        self.emit(value, (*value.const_value()).into());
    }

    fn apply_char(&mut self, value: &CharValue) {
        self.emit(value, JsonValue::String(value.const_value().to_string()));
    }

    fn apply_string(&mut self, value: &StringValue) {
        self.emit(value, value.const_value().as_str().into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Entity;
    use serde_json::json;

    #[derive(Clone)]
    struct Opaque;

    crate::declare_value_type!(Opaque, "test::Opaque");

    #[test]
    fn snapshot_of_mixed_table() {
        let mut entity = Entity::new();
        entity.set_value("name", "Name field contents");
        entity.set_value("time", 10.0);
        entity.set_value("size", 0.5f32);
        entity.set_value("count", 5);
        entity.set_value("pos", 4u32);
        entity.set_value("flag", true);
        entity.set_value("initial", 'x');
        entity.set_value("opaque", Opaque);

        let json = properties_to_json(&entity);

        assert_eq!(
            json,
            json!({
                "count": 5,
                "flag": true,
                "initial": "x",
                "name": "Name field contents",
                "opaque": { "type": "test::Opaque" },
                "pos": 4,
                "size": 0.5,
                "time": 10.0,
            })
        );
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["count", "flag", "initial", "name", "opaque", "pos", "size", "time"]);
    }

    #[test]
    fn nested_objects_and_value_properties() {
        let child = Entity::create();
        child.write().set_value("depth", 1u8);

        let mut annotated = crate::value::Value::new(3i64);
        annotated.set_value("unit", "m");

        let mut root = Entity::new();
        root.set_object("child", child.into_object());
        root.set_object("length", crate::object::RefPtr::new(annotated).into_object());
        root.set_value("nan", f64::NAN);

        assert_eq!(
            properties_to_json(&root),
            json!({
                "child": { "type": "tessera::Entity", "properties": { "depth": 1 } },
                "length": { "value": 3, "properties": { "unit": "m" } },
                "nan": null,
            })
        );
    }

    #[test]
    fn entity_without_table_is_empty_object() {
        assert_eq!(properties_to_json(&Entity::new()), json!({}));
        assert_eq!(object_to_json(&Entity::new()), json!({ "type": "tessera::Entity" }));
    }
}
