//! Property system for dashview.
//!
//! Properties hold the inputs of a view and report whether a write actually
//! changed anything. Change detection uses `PartialEq`; shared inputs that
//! must be compared by *identity* (the same allocation) rather than by value
//! are wrapped in [`Identity`].
//!
//! ```
//! use dashview_core::{Identity, Property};
//!
//! let config = Identity::new(String::from("dashboard"));
//! let prop = Property::new(Some(config.clone()));
//!
//! // Same identity: no change
//! assert!(!prop.set(Some(config)));
//!
//! // Equal value, new identity: changed, and the old value is returned
//! let old = prop.replace(Some(Identity::new(String::from("dashboard"))));
//! assert!(old.is_some());
//! ```

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;

/// An input slot that knows whether a write changed it.
///
/// Reads clone the value; use [`with`](Self::with) to borrow instead. The
/// value lives behind a `parking_lot::RwLock`, so a property can be read
/// from any thread while its owner keeps `&self` APIs.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Hold `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// A clone of the held value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Borrow the held value for the duration of `f`.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Overwrite the value unconditionally.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Write `value` if it differs; `true` when something was written.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Write `value` if it differs and hand back what it replaced.
    ///
    /// `None` means the write was skipped because the values are equal.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut slot = self.value.write();
        if *slot == value {
            return None;
        }
        Some(std::mem::replace(&mut *slot, value))
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| f.debug_tuple("Property").field(value).finish())
    }
}

/// A shared, immutable value compared by identity.
///
/// Two `Identity` handles are equal only when they point at the same
/// allocation. Cloning is cheap and keeps the identity. Building a new
/// `Identity` from an equal value yields a *different* identity.
pub struct Identity<T: ?Sized>(Arc<T>);

impl<T> Identity<T> {
    /// Wrap a value in a fresh identity.
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl<T: ?Sized> Identity<T> {
    /// Whether two handles share the same identity.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }

    /// Access the underlying shared pointer.
    pub fn as_arc(&self) -> &Arc<T> {
        &self.0
    }
}

impl<T: ?Sized> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Identity<T> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Eq for Identity<T> {}

impl<T: ?Sized> Deref for Identity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> From<Arc<T>> for Identity<T> {
    fn from(value: Arc<T>) -> Self {
        Self(value)
    }
}

impl<T: Default> Default for Identity<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identity").field(&&*self.0).finish()
    }
}
