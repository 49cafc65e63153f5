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

// Tessera values demo
// Attaches values to an entity, walks them with a visitor and edits a custom
// payload in place.

use anyhow::Result;
use tessera_core::{
    DoubleValue, Entity, FloatValue, IntValue, Object, ObjectRef, Properties, StringValue,
    UintValue, Value, ValueType, Visitor,
};

mod engine {
    /// A custom struct for storing data, such as a uniform handed to the GPU.
    #[derive(Debug, Clone, Default, tessera_core::ValueType)]
    #[value_type(name = "engine::property")]
    pub struct Property {
        pub speed: f32,
    }
}

struct VisitValues;

impl Visitor for VisitValues {
    fn apply_object(&mut self, object: &mut dyn Object) {
        println!("Object, {}", object.type_name());
    }

    fn apply_int(&mut self, value: &mut IntValue) {
        println!("intValue,  value = {value}");
    }

    fn apply_uint(&mut self, value: &mut UintValue) {
        println!("uintValue,  value = {value}");
    }

    fn apply_float(&mut self, value: &mut FloatValue) {
        println!("floatValue, value  = {value}");
    }

    fn apply_double(&mut self, value: &mut DoubleValue) {
        println!("doubleValue, value  = {value}");
    }

    fn apply_string(&mut self, value: &mut StringValue) {
        println!("stringValue, value  = {}", value.value());
    }
}

fn print_entry(key: &str, object: &ObjectRef, visitor: &mut VisitValues) {
    print!("   key[{key}] ");
    object.write().accept(visitor);
}

fn main() -> Result<()> {
    env_logger::init();
    tessera_core::init();

    let object = Entity::create();
    {
        let mut entity = object.write();
        entity.set_value("name", "Name field contents");
        entity.set_value("time", 10.0);
        entity.set_value("size", 3.1f32);
        entity.set_value("count", 5);
        entity.set_value("pos", 4u32);
    }

    let entity = object.read();
    if let Some(table) = entity.auxiliary() {
        let mut visit_values = VisitValues;

        println!("Object has Auxiliary so check its table for our values. {object:?}");
        for (key, value) in table {
            print_entry(key, value, &mut visit_values);
        }

        println!("Use for_each_property");
        entity.for_each_property(|key, value| print_entry(key, value, &mut visit_values));

        println!("visit_properties");
        entity.visit_properties(&mut visit_values);
    }

    let count: i32 = entity.get_value("count")?;
    log::info!("count = {count}");
    if let Err(e) = entity.get_value::<u32>("count") {
        log::info!("Expected failure: {e}");
    }
    drop(entity);

    // Wrap an engine::Property in a value object.
    let my_property = Value::create(engine::Property { speed: 10.0 });
    println!(
        "\nmy_property = {my_property:?}, type_name = {}",
        engine::Property::TYPE_NAME
    );
    println!(
        "    after constructor my_property.value().speed = {}",
        my_property.read().const_value().speed
    );

    // Modify the struct through the value object...
    my_property.write().value().speed += 2.0;
    println!(
        "    after increment my_property.value().speed = {}",
        my_property.read().const_value().speed
    );

    // ...or through a reference to the payload it holds.
    {
        let mut guard = my_property.write();
        let prop = guard.value();
        prop.speed *= 2.0;
        println!("    after multiplication my_property.value().speed = {}", prop.speed);
    }

    let snapshot = tessera_core::snapshot::properties_to_json(&*object.read());
    println!("\nsnapshot = {snapshot}");

    Ok(())
}
