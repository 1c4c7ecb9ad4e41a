//! Deep merge of configuration layers.
//!
//! Merges key by key, with the overlay winning on leaf conflicts. Sequences
//! are replaced entirely, not concatenated.

use super::store::ConfigStore;
use super::value::Value;
use indexmap::map::Entry;

/// Deep merge `overlay` into `base`.
///
/// - Both sides hold a store at a key: merged recursively
/// - Otherwise the overlay value (cloned) replaces the base value in place
/// - Keys only in `base` are kept; keys only in `overlay` are appended in
///   overlay order
///
/// # Example
/// ```
/// use pulpo_config::{ConfigStore, deep_merge};
///
/// let mut base = ConfigStore::new()
///     .with_key_value("server.port", 8080)
///     .with_key_value("server.host", "localhost");
/// let overlay = ConfigStore::new().with_key_value("server.port", 9000);
///
/// deep_merge(&mut base, &overlay);
/// assert_eq!(base.to_string(), "{'server': {'port': 9000, 'host': 'localhost'}}");
/// ```
pub fn deep_merge(base: &mut ConfigStore, overlay: &ConfigStore) {
    for (key, incoming) in overlay.iter() {
        match base.entries.entry(key.clone()) {
            Entry::Occupied(mut slot) => match (slot.get_mut(), incoming) {
                (Value::Store(existing), Value::Store(nested)) => deep_merge(existing, nested),
                (existing, _) => *existing = incoming.clone(),
            },
            Entry::Vacant(slot) => {
                slot.insert(incoming.clone());
            }
        }
    }
}

/// Merge layers in order, with later layers taking precedence.
///
/// Equivalent to folding `deep_merge` over the list, starting empty.
pub fn deep_merge_all<'a>(layers: impl IntoIterator<Item = &'a ConfigStore>) -> ConfigStore {
    layers.into_iter().fold(ConfigStore::new(), |mut merged, layer| {
        deep_merge(&mut merged, layer);
        merged
    })
}
