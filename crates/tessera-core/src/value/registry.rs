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

//! Unique runtime names for payload types.
//!
//! Every payload type carries a [`ValueType::TYPE_NAME`]. The registry makes
//! sure that no two distinct Rust types share one, because the name check is
//! what guards every downcast out of a [`Value`](super::Value).
//!
//! Types declared through `#[derive(ValueType)]` or
//! [`declare_value_type!`](crate::declare_value_type) submit a
//! [`TypeRegistration`] that is collected at link time and validated when the
//! process-wide registry is first built. Types implementing [`ValueType`] by
//! hand are added on first use.
//!
//! Names reported by other [`Object`] types, such as
//! [`Entity::TYPE_NAME`](crate::Entity::TYPE_NAME), are reserved the same way
//! through [`TypeRegistration::object`], so no payload can impersonate them.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use super::ValueType;
use crate::error::RegistryError;
use crate::object::Object;

/// A static description of one named type, submitted through `inventory`.
#[derive(Debug, Clone, Copy)]
pub struct TypeRegistration {
    name: &'static str,
    type_id: fn() -> TypeId,
    rust_name: fn() -> &'static str,
}

impl TypeRegistration {
    /// Describes the payload type `T` under its [`ValueType::TYPE_NAME`].
    pub const fn of<T: ValueType>() -> Self {
        Self {
            name: T::TYPE_NAME,
            type_id: TypeId::of::<T>,
            rust_name: std::any::type_name::<T>,
        }
    }

    /// Reserves `name` for the object type `T`.
    ///
    /// `name` must be what `T` reports from [`Object::type_name`].
    pub const fn object<T: Object>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>,
            rust_name: std::any::type_name::<T>,
        }
    }

    /// The registered name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

inventory::collect!(TypeRegistration);

#[derive(Debug, Clone, Copy)]
struct RegisteredType {
    type_id: TypeId,
    rust_name: &'static str,
}

/// Maps registered type names to the Rust types that own them.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<&'static str, RegisteredType>>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, seeded from every submitted
    /// [`TypeRegistration`] on first access.
    ///
    /// # Panics
    ///
    /// Panics if two submitted registrations use the same name for distinct
    /// types. The name check is the only guard on downcasts, so the process
    /// cannot continue with an ambiguous name.
    pub fn global() -> &'static TypeRegistry {
        static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let registry = TypeRegistry::new();
            for registration in inventory::iter::<TypeRegistration> {
                if let Err(e) = registry.add(registration) {
                    log::error!("Payload type registration failed: {e}");
                    panic!("{e}");
                }
            }
            registry
        })
    }

    /// Registers `T` under its [`ValueType::TYPE_NAME`].
    ///
    /// Registering the same type again is a no-op.
    pub fn register<T: ValueType>(&self) -> Result<(), RegistryError> {
        self.add(&TypeRegistration::of::<T>())
    }

    /// Registers the type described by `registration`.
    pub fn add(&self, registration: &TypeRegistration) -> Result<(), RegistryError> {
        let incoming = RegisteredType {
            type_id: (registration.type_id)(),
            rust_name: (registration.rust_name)(),
        };

        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        match types.get(registration.name) {
            Some(existing) if existing.type_id == incoming.type_id => Ok(()),
            Some(existing) => Err(RegistryError::DuplicateTypeName {
                name: registration.name,
                existing: existing.rust_name,
                incoming: incoming.rust_name,
            }),
            None => {
                log::debug!(
                    "Registered payload type '{}' for `{}`",
                    registration.name,
                    incoming.rust_name
                );
                types.insert(registration.name, incoming);
                Ok(())
            }
        }
    }

    /// Makes sure `T` is registered, adding it on first use.
    ///
    /// # Panics
    ///
    /// Panics if the name of `T` already belongs to another type.
    pub fn ensure<T: ValueType>(&self) {
        if self.is_registered::<T>() {
            return;
        }
        if let Err(e) = self.register::<T>() {
            log::error!("Payload type registration failed: {e}");
            panic!("{e}");
        }
    }

    /// Returns `true` if `T` is registered under its own name.
    pub fn is_registered<T: ValueType>(&self) -> bool {
        self.type_id_of(T::TYPE_NAME) == Some(TypeId::of::<T>())
    }

    /// Returns `true` if any type is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// The [`TypeId`] registered under `name`.
    pub fn type_id_of(&self, name: &str) -> Option<TypeId> {
        self.read().get(name).map(|t| t.type_id)
    }

    /// The Rust type name registered under `name`.
    pub fn rust_name_of(&self, name: &str) -> Option<&'static str> {
        self.read().get(name).map(|t| t.rust_name)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.read().keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<&'static str, RegisteredType>> {
        self.types.read().unwrap_or_else(PoisonError::into_inner)
    }
}
