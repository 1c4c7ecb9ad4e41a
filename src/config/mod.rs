//! Layered configuration store.
//!
//! A [`ConfigStore`] is a tree of values addressed by dotted paths
//! (`server.http.port`). Stores are built from layers that deep merge into
//! each other, later layers winning on conflicting leaves:
//! 1. **Options** - in-memory stores
//! 2. **Files** - JSON and YAML documents
//! 3. **Arguments** - flat maps whose keys are dotted paths
//!
//! ## Environment References
//! A string value `$ENV.<name>` reads the environment variable `pulpo-<name>`
//! each time it is looked up. An unset variable reads as absent.

mod env;
mod loader;
mod merge;
mod path;
mod serialize;
mod store;
mod value;

pub use env::{ENV_PREFIX, ENV_SENTINEL};
pub use loader::{FileFormat, parse_json, parse_yaml};
pub use merge::{deep_merge, deep_merge_all};
pub use path::SEPARATOR;
pub use store::ConfigStore;
pub use value::Value;
