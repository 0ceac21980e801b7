//! Opaque handles to natively-allocated objects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque handle to a natively-allocated object.
///
/// The table compares and hashes addresses but never dereferences them; destruction is always delegated to the
/// delete function registered for the object's type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectAddress(usize);

impl ObjectAddress {
    /// Creates an address from a raw pointer.
    pub fn from_ptr<T: ?Sized>(ptr: *const T) -> Self {
        ObjectAddress(ptr.cast::<()>() as usize)
    }

    /// Creates an address from a reference.
    pub fn from_ref<T: ?Sized>(value: &T) -> Self {
        ObjectAddress::from_ptr(value as *const T)
    }

    /// Creates an address from a raw integer value.
    pub const fn from_usize(addr: usize) -> Self {
        ObjectAddress(addr)
    }

    /// Returns the raw integer value of the address.
    pub const fn as_usize(&self) -> usize {
        self.0
    }

    /// Casts the address back into a raw pointer.
    ///
    /// Producing the pointer is safe; dereferencing it is only sound if the address came from a live `T`.
    pub fn cast<T>(&self) -> *mut T {
        self.0 as *mut T
    }
}

impl fmt::Debug for ObjectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectAddress({:#x})", self.0)
    }
}

impl fmt::Display for ObjectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
