//! The configuration store.

use super::env;
use super::loader;
use super::merge::deep_merge;
use super::path;
use super::serialize::to_spaced_json;
use super::value::Value;
use crate::error::{ConfigError, ConfigResult};
use indexmap::{IndexMap, IndexSet};
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

/// A tree of configuration values addressed by dotted paths.
///
/// Keys keep their first-seen order for iteration and rendering. Every
/// nested store is owned by its parent; sources merged in are cloned, so the
/// store never shares state with what it was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    pub(super) entries: IndexMap<String, Value>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from up to three layers.
    ///
    /// Layers apply in a fixed order: `options`, then the JSON file, then the
    /// YAML file. Later layers win on conflicting leaves.
    pub fn load(
        options: Option<&ConfigStore>,
        json_file_path: Option<&Path>,
        yaml_file_path: Option<&Path>,
    ) -> ConfigResult<Self> {
        let mut store = Self::new();
        if let Some(options) = options {
            store.merge(options);
        }
        if let Some(path) = json_file_path {
            store.merge_json_file(path)?;
        }
        if let Some(path) = yaml_file_path {
            store.merge_yaml_file(path)?;
        }
        Ok(store)
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate top-level entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Look up a path without resolving environment references.
    pub fn get_raw(&self, path: &str) -> Option<&Value> {
        let (parents, last) = path::split_parent(path);
        let mut node = self;
        for segment in parents {
            node = node.entries.get(segment)?.as_store()?;
        }
        node.entries.get(last)
    }

    /// Look up a dotted path.
    ///
    /// Returns `None` when any segment is missing or a segment before the
    /// last one is not a nested store. A string value `$ENV.<name>` is
    /// replaced by the environment variable `pulpo-<name>`, or `None` if
    /// the name is empty or the variable is unset.
    pub fn get(&self, path: &str) -> Option<Cow<'_, Value>> {
        let value = self.get_raw(path)?;
        let Some(name) = value.as_str().and_then(env::parse_reference) else {
            return Some(Cow::Borrowed(value));
        };
        env::resolve(name).map(|resolved| Cow::Owned(Value::String(resolved)))
    }

    /// Check whether a path holds a value (environment references unresolved).
    pub fn contains(&self, path: &str) -> bool {
        self.get_raw(path).is_some()
    }

    /// Assign `value` at a dotted path, creating intermediate stores.
    ///
    /// An intermediate segment that holds a leaf is overwritten with a fresh
    /// empty store.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let (parents, last) = path::split_parent(path);
        let mut node = self;
        for segment in parents {
            let slot = node
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| Value::Store(ConfigStore::new()));
            if !slot.is_store() {
                debug!(path, segment, replaced = slot.type_name(), "overwriting leaf with nested store");
            }
            node = slot.make_store();
        }
        node.entries.insert(last.to_string(), value.into());
    }

    /// Remove and return the value at a path, keeping the order of the rest.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let (parents, last) = path::split_parent(path);
        let mut node = self;
        for segment in parents {
            node = node.entries.get_mut(segment)?.as_store_mut()?;
        }
        node.entries.shift_remove(last)
    }

    /// Read a path as a flag, defaulting to `false`.
    pub fn get_as_bool(&self, path: &str) -> bool {
        self.get_as_bool_or(path, false)
    }

    /// Read a path as a flag.
    ///
    /// A missing or null value falls back to `default`, which is coerced
    /// through the same table as stored values: a default of `2` is `false`.
    /// See [`Value::is_truthy`].
    pub fn get_as_bool_or(&self, path: &str, default: impl Into<Value>) -> bool {
        match self.get(path) {
            Some(value) if !value.is_null() => value.is_truthy(),
            _ => default.into().is_truthy(),
        }
    }

    /// Read a path as an integer.
    ///
    /// A missing or null value is `Ok(None)`. A present value that cannot be
    /// coerced is a [`ConfigError::Parse`]. See [`Value::to_int`] for the
    /// accepted inputs; floats are truncated.
    pub fn get_as_int(&self, path: &str) -> ConfigResult<Option<i64>> {
        let Some(value) = self.get(path) else {
            return Ok(None);
        };
        if value.is_null() {
            return Ok(None);
        }
        value
            .to_int()
            .map(Some)
            .map_err(|reason| ConfigError::parse(path, &*value, reason))
    }

    /// Every dotted path that ends at a leaf, in insertion order.
    ///
    /// Empty nested stores contribute no paths.
    pub fn keys(&self) -> IndexSet<String> {
        let mut keys = IndexSet::new();
        self.collect_keys(None, &mut keys);
        keys
    }

    fn collect_keys(&self, prefix: Option<&str>, keys: &mut IndexSet<String>) {
        for (key, value) in &self.entries {
            let full = match prefix {
                Some(prefix) => path::join(prefix, key),
                None => key.clone(),
            };
            match value {
                Value::Store(nested) => nested.collect_keys(Some(&full), keys),
                _ => {
                    keys.insert(full);
                }
            }
        }
    }

    /// Literal rendering, same as `to_string()`: `{'k': 'v', 'n': {'k2': 1}}`.
    pub fn to_literal(&self) -> String {
        self.to_string()
    }

    /// Single-line JSON in insertion order: `{"k1": "v1", "k": {"k3": "v3"}}`.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(to_spaced_json(self)?)
    }

    pub fn to_json_pretty(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deep merge `options` into this store. The source is cloned.
    pub fn merge(&mut self, options: &ConfigStore) {
        deep_merge(self, options);
    }

    /// Deep merge the top-level mapping of a JSON file.
    pub fn merge_json_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let layer = loader::load_json_file(path.as_ref())?;
        deep_merge(self, &layer);
        Ok(())
    }

    /// Deep merge the top-level mapping of a YAML file.
    pub fn merge_yaml_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let layer = loader::load_yaml_file(path.as_ref())?;
        deep_merge(self, &layer);
        Ok(())
    }

    /// Deep merge a JSON or YAML file, chosen by extension.
    pub fn merge_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let layer = loader::load_file(path.as_ref())?;
        deep_merge(self, &layer);
        Ok(())
    }

    /// Apply argument overrides.
    ///
    /// Each key is a dotted path assigned with [`set`](Self::set), so flat
    /// argument maps can target nested values. Null values are skipped: an
    /// option that was not given does not clobber a loaded value.
    pub fn process_args<I, K, V>(&mut self, args: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (key, value) in args {
            let key = key.as_ref();
            let value = value.into();
            if value.is_null() {
                debug!(key, "skipping unset argument");
                continue;
            }
            self.set(key, value);
        }
    }

    // Chaining forms of the layering operations.

    pub fn with_options(mut self, options: &ConfigStore) -> Self {
        self.merge(options);
        self
    }

    pub fn with_key_value(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_json_file(mut self, path: impl AsRef<Path>) -> ConfigResult<Self> {
        self.merge_json_file(path)?;
        Ok(self)
    }

    pub fn with_yaml_file(mut self, path: impl AsRef<Path>) -> ConfigResult<Self> {
        self.merge_yaml_file(path)?;
        Ok(self)
    }

    pub fn with_file(mut self, path: impl AsRef<Path>) -> ConfigResult<Self> {
        self.merge_file(path)?;
        Ok(self)
    }

    pub fn with_args<I, K, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.process_args(args);
        self
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ConfigStore {
    /// Collect top-level entries. Keys are taken literally, not as paths.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl TryFrom<serde_json::Value> for ConfigStore {
    type Error = ConfigError;

    fn try_from(value: serde_json::Value) -> ConfigResult<Self> {
        match Value::from(value) {
            Value::Store(store) => Ok(store),
            other => Err(ConfigError::NotAMapping {
                found: other.type_name(),
            }),
        }
    }
}

impl<'a> IntoIterator for &'a ConfigStore {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
