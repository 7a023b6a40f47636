//! The UnderlyingRecord type - a caller-owned keyed record with identity.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::{Error, Value};

static NEXT_RECORD_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity token assigned to every record when it is created.
///
/// Two records with identical contents still have different ids. Caches key
/// on this, never on structural equality.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct RecordId(u64);

impl RecordId {
    fn next() -> Self {
        RecordId(NEXT_RECORD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record#{}", self.0)
    }
}

/// An ordered mapping from field names to values.
///
/// Keys keep the order they were first inserted in. Setting an existing key
/// replaces its value in place. Records are shared as `Arc<UnderlyingRecord>`
/// and never mutated once wrapped.
///
/// `UnderlyingRecord` deliberately does not implement `Clone`: a copy would
/// need a fresh identity, which is what `duplicate` gives you.
pub struct UnderlyingRecord {
    id: RecordId,
    fields: Vec<(String, Value)>,
}

impl UnderlyingRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self {
            id: RecordId::next(),
            fields: Vec::new(),
        }
    }

    /// Build a record from key/value pairs, keeping their order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut record = Self::new();
        for (key, value) in pairs {
            record.insert(key, value);
        }
        record
    }

    /// Build a record from a sorted map.
    pub fn from_map(map: BTreeMap<String, Value>) -> Self {
        Self::from_pairs(map)
    }

    /// Build a record from a JSON object, keeping the object's key order.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAnObject` for anything but a JSON object.
    pub fn from_json(json: serde_json::Value) -> Result<Self, Error> {
        match json {
            serde_json::Value::Object(map) => Ok(Self::from_pairs(
                map.into_iter().map(|(k, v)| (k, Value::from(v))),
            )),
            other => Err(Error::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Set a field, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Wrap this record for sharing.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// The identity of this record.
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy the contents into a new record with its own identity.
    pub fn duplicate(&self) -> Self {
        Self {
            id: RecordId::next(),
            fields: self.fields.clone(),
        }
    }

    /// Copy the contents into a sorted map.
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.fields.iter().cloned().collect()
    }
}

impl Default for UnderlyingRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UnderlyingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in &self.fields {
            map.entry(k, v);
        }
        map.finish()?;
        write!(f, " ({})", self.id)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
