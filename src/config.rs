//! Configuration for building an instance table.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The prefix carried by names generated with [`InstanceTable::create_temporary`](crate::InstanceTable::create_temporary).
pub const DEFAULT_TEMP_PREFIX: &str = "__temp";

/// Settings for an [`InstanceTable`](crate::InstanceTable).
///
/// Missing fields fall back to their defaults when deserializing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Reserved prefix marking a name as temporary.
    pub temp_prefix: Cow<'static, str>,
    /// Number of instances the table can hold before reallocating.
    pub capacity: usize,
}

impl TableConfig {
    /// Sets the temporary name prefix.
    pub fn temp_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.temp_prefix = prefix.into();
        self
    }

    /// Sets the initial capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Checks the config can be used to build a table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temp_prefix.is_empty() {
            return Err(ConfigError::EmptyTempPrefix);
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            temp_prefix: Cow::Borrowed(DEFAULT_TEMP_PREFIX),
            capacity: 0,
        }
    }
}
