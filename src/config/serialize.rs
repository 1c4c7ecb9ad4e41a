//! serde support for the configuration tree.
//!
//! Deserialization goes through our own visitors so that mapping order from
//! the source document is kept, whatever map type the format uses.

use super::store::ConfigStore;
use super::value::Value;
use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::io;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => serializer.collect_seq(items),
            Value::Store(store) => store.serialize(serializer),
        }
    }
}

impl Serialize for ConfigStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a configuration value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Int(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        Ok(i64::try_from(n).map_or(Value::Float(n as f64), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, x: f64) -> Result<Value, E> {
        Ok(Value::Float(x))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Value, A::Error> {
        StoreVisitor.visit_map(map).map(Value::Store)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct StoreVisitor;

impl<'de> Visitor<'de> for StoreVisitor {
    type Value = ConfigStore;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of configuration keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ConfigStore, A::Error> {
        let mut entries = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            entries.insert(key, value);
        }
        Ok(ConfigStore { entries })
    }
}

impl<'de> Deserialize<'de> for ConfigStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StoreVisitor)
    }
}

/// JSON formatter that puts a space after `,` and `:` on a single line.
///
/// Output looks like `{"k1": "v1", "k": {"k3": "v3"}}`.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Render a store as single-line JSON with spaced separators.
pub fn to_spaced_json(store: &ConfigStore) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
    store.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaced_json() {
        let store = ConfigStore::new()
            .with_key_value("k1", "v1")
            .with_key_value("k.k3", "v3")
            .with_key_value("list", vec![1, 2]);
        assert_eq!(
            to_spaced_json(&store).unwrap(),
            r#"{"k1": "v1", "k": {"k3": "v3"}, "list": [1, 2]}"#
        );
    }

    #[test]
    fn test_empty_store_json() {
        assert_eq!(to_spaced_json(&ConfigStore::new()).unwrap(), "{}");
    }

    #[test]
    fn test_deserialize_json_keeps_document_order() {
        let store: ConfigStore =
            serde_json::from_str(r#"{"zeta": 1, "alpha": {"b": 2, "a": 3}}"#).unwrap();
        assert_eq!(store.to_string(), "{'zeta': 1, 'alpha': {'b': 2, 'a': 3}}");
    }

    #[test]
    fn test_deserialize_yaml_types() {
        let store: ConfigStore = serde_yaml::from_str(
            "name: pulpo\nport: 8080\nratio: 0.5\nenabled: true\nmissing: ~\ntags: [a, b]\n",
        )
        .unwrap();
        assert_eq!(store.get_raw("name"), Some(&Value::from("pulpo")));
        assert_eq!(store.get_raw("port"), Some(&Value::Int(8080)));
        assert_eq!(store.get_raw("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(store.get_raw("enabled"), Some(&Value::Bool(true)));
        assert_eq!(store.get_raw("missing"), Some(&Value::Null));
        assert_eq!(store.get_raw("tags"), Some(&Value::from(vec!["a", "b"])));
    }

    #[test]
    fn test_deserialize_rejects_non_mapping() {
        assert!(serde_json::from_str::<ConfigStore>("[1, 2]").is_err());
        assert!(serde_json::from_str::<ConfigStore>("\"text\"").is_err());
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let store: ConfigStore = serde_json::from_str(r#"{"big": 18446744073709551615}"#).unwrap();
        assert!(matches!(store.get_raw("big"), Some(Value::Float(_))));
    }
}
