#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![deny(unused_must_use)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod address;
pub mod config;
pub mod error;
pub mod reference;
pub mod registry;
pub mod surface;
pub mod types;

pub use address::ObjectAddress;
pub use config::{TableConfig, DEFAULT_TEMP_PREFIX};
pub use error::{ConfigError, RegistryError};
pub use reference::Reference;
pub use registry::{DeleteFn, EntrySnapshot, InstanceTable};
pub use surface::{CommandSurface, DetachedSurface};
pub use types::{CvQualifiers, QualifiedType, TypeKey};
