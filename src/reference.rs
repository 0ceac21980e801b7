//! Lookup results pairing an object address with its registered type.

use std::fmt;

use crate::{address::ObjectAddress, types::QualifiedType};

/// An object address paired with the qualified type it was registered as.
///
/// References are plain values returned from lookups; holding one does not keep the object alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Reference {
    object: ObjectAddress,
    ty: QualifiedType,
}

impl Reference {
    /// Creates a new reference.
    pub fn new(object: ObjectAddress, ty: QualifiedType) -> Self {
        Reference { object, ty }
    }

    /// The address of the referenced object.
    pub fn object(&self) -> ObjectAddress {
        self.object
    }

    /// The type the object was registered as.
    pub fn referenced_type(&self) -> QualifiedType {
        self.ty
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.ty, self.object)
    }
}
