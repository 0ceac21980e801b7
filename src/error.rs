//! Defines error handling constructs for the instance table.
//!
//! Registry failures come in two flavours: a name that isn't registered, and an object whose type was never
//! given a delete function. Both are reported synchronously from the operation that detected them, and the
//! table never retries or swallows them.

use std::{error, fmt};

use crate::types::TypeKey;

/// An error that can occur when looking up or deleting instances by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// No instance is registered under the given name.
    UndefinedInstanceName {
        /// The name that was looked up.
        name: String,
    },
    /// The instance's type has no registered delete function.
    ///
    /// This is a configuration error: instances of the type were registered, but the type was never given a
    /// destructor. The instance stays registered when this is returned.
    UndefinedObjectType {
        /// The type missing a delete function.
        ty: TypeKey,
    },
}

impl RegistryError {
    pub(crate) fn undefined_name(name: impl Into<String>) -> Self {
        RegistryError::UndefinedInstanceName { name: name.into() }
    }

    /// Returns the offending instance name, if this is an [`UndefinedInstanceName`](RegistryError::UndefinedInstanceName) error.
    pub fn instance_name(&self) -> Option<&str> {
        match self {
            RegistryError::UndefinedInstanceName { name } => Some(name.as_str()),
            RegistryError::UndefinedObjectType { .. } => None,
        }
    }

    /// Returns the offending type, if this is an [`UndefinedObjectType`](RegistryError::UndefinedObjectType) error.
    pub fn object_type(&self) -> Option<TypeKey> {
        match self {
            RegistryError::UndefinedInstanceName { .. } => None,
            RegistryError::UndefinedObjectType { ty } => Some(*ty),
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UndefinedInstanceName { name } => {
                write!(f, "undefined instance name '{name}'")
            }
            RegistryError::UndefinedObjectType { ty } => {
                write!(f, "no delete function registered for type '{ty}'")
            }
        }
    }
}

impl error::Error for RegistryError {}

/// An error that can occur when building an instance table from a [`TableConfig`](crate::config::TableConfig).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The temporary name prefix was empty, which would make every name temporary.
    EmptyTempPrefix,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyTempPrefix => write!(f, "temporary name prefix must not be empty"),
        }
    }
}

impl error::Error for ConfigError {}
