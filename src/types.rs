//! Type identities used to tag registered instances and select their delete functions.

use std::{
    any::{self, TypeId},
    fmt,
    hash::{Hash, Hasher},
};

/// An opaque, comparable identity for a native type.
///
/// Two keys are equal when they describe the same Rust type. The type name is carried along for diagnostics only
/// and plays no part in comparisons.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the type key of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeKey {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// Returns the fully qualified name of the type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the underlying [`TypeId`].
    pub fn type_id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Const/volatile qualification of a type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CvQualifiers {
    /// The object is only reachable through a const view.
    pub is_const: bool,
    /// The object is only reachable through a volatile view.
    pub is_volatile: bool,
}

/// A type identity together with its const/volatile qualification.
///
/// Delete functions are looked up by the unqualified [`TypeKey`], so a `const Foo` and a plain `Foo` share a
/// destructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedType {
    ty: TypeKey,
    qualifiers: CvQualifiers,
}

impl QualifiedType {
    /// Creates an unqualified type from a type key.
    pub fn new(ty: TypeKey) -> Self {
        QualifiedType {
            ty,
            qualifiers: CvQualifiers::default(),
        }
    }

    /// Creates an unqualified type for `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        QualifiedType::new(TypeKey::of::<T>())
    }

    /// Creates a type with explicit qualifiers.
    pub fn with_qualifiers(ty: TypeKey, qualifiers: CvQualifiers) -> Self {
        QualifiedType { ty, qualifiers }
    }

    /// Adds the `const` qualifier.
    pub fn with_const(mut self) -> Self {
        self.qualifiers.is_const = true;
        self
    }

    /// Adds the `volatile` qualifier.
    pub fn with_volatile(mut self) -> Self {
        self.qualifiers.is_volatile = true;
        self
    }

    /// The unqualified type identity.
    pub fn type_key(&self) -> TypeKey {
        self.ty
    }

    /// The const/volatile qualifiers.
    pub fn qualifiers(&self) -> CvQualifiers {
        self.qualifiers
    }

    /// Returns `true` if the type is const qualified.
    pub fn is_const(&self) -> bool {
        self.qualifiers.is_const
    }

    /// Returns `true` if the type is volatile qualified.
    pub fn is_volatile(&self) -> bool {
        self.qualifiers.is_volatile
    }
}

impl From<TypeKey> for QualifiedType {
    fn from(ty: TypeKey) -> Self {
        QualifiedType::new(ty)
    }
}

impl fmt::Display for QualifiedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.qualifiers.is_const {
            f.write_str("const ")?;
        }
        if self.qualifiers.is_volatile {
            f.write_str("volatile ")?;
        }
        self.ty.fmt(f)
    }
}
