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

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use super::Object;

/// A thread-safe, reference-counted handle to an object.
///
/// Cloning a handle is cheap: it only increments the reference count. The
/// object is dropped, together with its property table, when the last handle
/// goes away. Access goes through [`read`](RefPtr::read) and
/// [`write`](RefPtr::write), so a payload can be mutated in place while other
/// holders keep their handles.
pub struct RefPtr<T: ?Sized>(Arc<RwLock<T>>);

/// A type-erased handle, as stored in a [`PropertyTable`](super::PropertyTable).
pub type ObjectRef = RefPtr<dyn Object>;

impl<T: Object> RefPtr<T> {
    /// Takes ownership of `object` and returns the first handle to it.
    pub fn new(object: T) -> Self {
        Self(Arc::new(RwLock::new(object)))
    }

    /// Erases the concrete type, keeping the same allocation and count.
    pub fn into_object(self) -> ObjectRef {
        let erased: Arc<RwLock<dyn Object>> = self.0;
        RefPtr(erased)
    }
}

impl<T: ?Sized> RefPtr<T> {
    /// Locks the object for shared access.
    ///
    /// A lock poisoned by a panicking writer is recovered; the object itself
    /// has no invariants a half-finished write could break.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the object for exclusive access.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of strong handles currently alive.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Returns `true` if both handles point to the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Creates a non-owning handle that does not keep the object alive.
    pub fn downgrade(&self) -> WeakPtr<T> {
        WeakPtr(Arc::downgrade(&self.0))
    }
}

impl<T: ?Sized> Clone for RefPtr<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Object + ?Sized> fmt::Debug for RefPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("RefPtr");
        match self.0.try_read() {
            Ok(object) => s.field("type_name", &object.type_name()),
            Err(_) => s.field("type_name", &"<locked>"),
        };
        s.field("ref_count", &self.ref_count()).finish()
    }
}

/// A non-owning counterpart of [`RefPtr`].
pub struct WeakPtr<T: ?Sized>(Weak<RwLock<T>>);

impl<T: ?Sized> WeakPtr<T> {
    /// Returns a strong handle if the object is still alive.
    pub fn upgrade(&self) -> Option<RefPtr<T>> {
        self.0.upgrade().map(RefPtr)
    }
}

impl<T: ?Sized> Clone for WeakPtr<T> {
    fn clone(&self) -> Self {
        Self(Weak::clone(&self.0))
    }
}
