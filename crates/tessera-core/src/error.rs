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

//! Error types for property access and type registration.

use thiserror::Error;

use crate::object::Object;
use crate::value::ValueType;

/// A recoverable failure when reading a property.
///
/// Both variants are returned by value to the caller; a failed lookup never
/// panics and never falls back to a default payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// No entry is stored under the key, or the object has no property table.
    #[error("no property stored under key '{key}'")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },
    /// An entry exists but holds a payload of a different type.
    #[error(
        "property '{key}' holds a '{found}' (`{found_type}`), \
         not a '{expected}' (`{expected_type}`)"
    )]
    TypeMismatch {
        /// The key that was looked up.
        key: String,
        /// Registered name of the requested payload type.
        expected: &'static str,
        /// Rust name of the requested payload type.
        expected_type: &'static str,
        /// Registered name of the stored object.
        found: &'static str,
        /// Rust name of the stored object.
        found_type: &'static str,
    },
}

impl PropertyError {
    pub(crate) fn not_found(key: &str) -> Self {
        PropertyError::NotFound { key: key.to_owned() }
    }

    pub(crate) fn mismatch<T: ValueType>(key: &str, found: &dyn Object) -> Self {
        PropertyError::TypeMismatch {
            key: key.to_owned(),
            expected: T::TYPE_NAME,
            expected_type: std::any::type_name::<T>(),
            found: found.type_name(),
            found_type: found.rust_type_name(),
        }
    }
}

/// A failure while registering a payload type name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two distinct Rust types claim the same payload type name.
    #[error("type name '{name}' is claimed by both `{existing}` and `{incoming}`")]
    DuplicateTypeName {
        /// The contested type name.
        name: &'static str,
        /// Rust name of the type that registered first.
        existing: &'static str,
        /// Rust name of the type that was rejected.
        incoming: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn messages_name_the_key_and_types() {
        let err = PropertyError::mismatch::<u32>("count", &Value::new(5i32));
        let message = err.to_string();
        assert!(message.starts_with("property 'count' holds a 'i32' (`"));
        assert!(message.contains("Value<i32>`)"));
        assert!(message.ends_with("not a 'u32' (`u32`)"));

        let err = PropertyError::not_found("missing");
        assert_eq!(err.to_string(), "no property stored under key 'missing'");
    }
}
