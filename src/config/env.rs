//! Environment-variable indirection.
//!
//! A string value of the form `$ENV.<name>` is a reference to the environment
//! variable `pulpo-<name>`. References are resolved on every read, so a
//! variable changed after the store was built is picked up by the next `get`.

use tracing::{debug, warn};

/// Marker that starts an environment reference.
pub const ENV_SENTINEL: &str = "$ENV";

/// Prefix applied to the referenced name before the variable is looked up.
pub const ENV_PREFIX: &str = "pulpo-";

/// Extract the referenced name from a `$ENV.<name>` string.
///
/// Returns `None` for strings that are not references, including the bare
/// sentinel `$ENV`. The name may be empty (`$ENV.`).
pub fn parse_reference(value: &str) -> Option<&str> {
    value
        .strip_prefix(ENV_SENTINEL)
        .and_then(|rest| rest.strip_prefix('.'))
}

/// Name of the environment variable a reference points at.
pub fn variable_name(name: &str) -> String {
    format!("{ENV_PREFIX}{name}")
}

/// Look up the variable behind a reference name.
///
/// An empty name or an unset variable resolves to `None`.
pub fn resolve(name: &str) -> Option<String> {
    if name.is_empty() {
        debug!("empty environment reference");
        return None;
    }

    let variable = variable_name(name);
    match std::env::var(&variable) {
        Ok(value) => Some(value),
        Err(std::env::VarError::NotPresent) => {
            debug!(variable = %variable, "referenced environment variable is not set");
            None
        }
        Err(std::env::VarError::NotUnicode(_)) => {
            warn!(variable = %variable, "referenced environment variable is not valid unicode");
            None
        }
    }
}
