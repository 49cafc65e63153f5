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

use std::collections::{btree_map, BTreeMap};

use super::ObjectRef;

/// The side table of named properties owned by one object.
///
/// Entries are kept sorted by key (byte-wise on the UTF-8 text), so iteration
/// order is the same for equal key sets on every run. Each entry owns one
/// strong handle; replacing or removing an entry releases that handle.
#[derive(Debug, Default, Clone)]
pub struct PropertyTable {
    objects: BTreeMap<String, ObjectRef>,
}

impl PropertyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `object` under `key`, returning the handle it replaced.
    pub fn insert(&mut self, key: impl Into<String>, object: ObjectRef) -> Option<ObjectRef> {
        let key = key.into();
        log::trace!("Inserting '{key}'");
        self.objects.insert(key, object)
    }

    /// Returns the handle stored under `key`.
    pub fn get(&self, key: &str) -> Option<&ObjectRef> {
        self.objects.get(key)
    }

    /// Returns the handle stored under `key`, allowing it to be swapped out.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut ObjectRef> {
        self.objects.get_mut(key)
    }

    /// Removes the entry under `key`. The table itself stays in place.
    pub fn remove(&mut self, key: &str) -> Option<ObjectRef> {
        let removed = self.objects.remove(key);
        if removed.is_some() {
            log::trace!("Removed '{key}'");
        }
        removed
    }

    /// Returns `true` if an entry is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Keys in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.objects.keys().map(String::as_str)
    }

    /// Iterates `(key, handle)` pairs in key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.objects.iter(),
        }
    }

    /// Alias of [`iter`](PropertyTable::iter).
    pub fn entries(&self) -> Iter<'_> {
        self.iter()
    }
}

/// Iterator over the entries of a [`PropertyTable`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, ObjectRef>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a ObjectRef);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a PropertyTable {
    type Item = (&'a str, &'a ObjectRef);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
