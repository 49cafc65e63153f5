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

use tessera_core::{
    ConstVisitorTable, Entity, Object, Properties, TypeRegistry, Value, ValueType, VisitorTable,
};

mod engine {
    /// Data that would be handed to the GPU as a uniform.
    #[derive(Debug, Clone, Default, PartialEq, tessera_core::ValueType)]
    #[value_type(name = "engine::property")]
    pub struct Property {
        pub speed: f32,
    }

    #[derive(Debug, Clone, PartialEq, tessera_core::ValueType)]
    pub enum Mode {
        Idle,
        Running { lap: u32 },
    }
}

use engine::{Mode, Property};

#[test]
fn test_derived_names() {
    assert_eq!(Property::TYPE_NAME, "engine::property");
    assert_eq!(Mode::TYPE_NAME, "derive::engine::Mode");
}

#[test]
fn test_derived_types_are_registered_at_startup() {
    tessera_core::init();
    let registry = TypeRegistry::global();

    assert!(registry.is_registered::<Property>());
    assert!(registry.is_registered::<Mode>());
    assert!(registry.names().contains(&"engine::property"));
}

#[test]
fn test_property_value_mutates_in_place() {
    let my_property = Value::create(Property { speed: 10.0 });
    assert_eq!(my_property.read().type_name(), "engine::property");

    my_property.write().value().speed += 2.0;
    assert_eq!(my_property.read().const_value().speed, 12.0);

    {
        let mut guard = my_property.write();
        let prop = guard.value();
        prop.speed *= 2.0;
    }
    assert_eq!(my_property.read().const_value().speed, 24.0);
}

#[test]
fn test_custom_payloads_through_entity_and_tables() {
    let mut entity = Entity::new();
    entity.set_value("property", Property { speed: 1.5 });
    entity.set_value("mode", Mode::Idle);

    let mut table = VisitorTable::new()
        .on::<Mode>(|mode| *mode = Mode::Running { lap: 1 })
        .on::<Property>(|p| p.speed = 3.0);
    entity.visit_properties(&mut table);
    assert_eq!(table.unhandled(), 0);

    assert_eq!(entity.get_value::<Mode>("mode").unwrap(), Mode::Running { lap: 1 });
    assert_eq!(entity.get_value::<Property>("property").unwrap().speed, 3.0);
    assert!(entity.get_value::<Mode>("property").is_err());

    let mut seen = Vec::new();
    let mut reader = ConstVisitorTable::new()
        .on::<Property>(|p| seen.push(p.speed))
        .otherwise(|object| assert_eq!(object.type_name(), Mode::TYPE_NAME));
    entity.visit_properties_const(&mut reader);
    drop(reader);
    assert_eq!(seen, vec![3.0]);
}
