//! Pre-validation claim candidates

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::COLUMN_MAP;

/// A loosely-typed value tree in the shape of a claim record
///
/// Produced by the row mapper (or assembled directly) and turned into a
/// [`ClaimRecord`](crate::ClaimRecord) by the validation gate. Paths are
/// dotted JSON keys such as `driverDetails.contact.email`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimCandidate(Value);

impl ClaimCandidate {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// An object holding every sub-structure and no leaves
    pub fn skeleton() -> Self {
        let mut candidate = Self(Value::Object(Map::new()));
        for mapping in COLUMN_MAP {
            for group in mapping.groups() {
                candidate.ensure_group(group);
            }
        }
        candidate
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Value at a dotted path, if every segment exists
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.0, |node, key| node.as_object()?.get(key))
    }

    /// Sets the value at a dotted path, creating missing groups
    ///
    /// A non-object found on the way is replaced by an empty object.
    pub fn set(&mut self, path: &str, value: Value) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(leaf) = segments.pop() else {
            return;
        };

        let mut node = &mut self.0;
        for key in segments {
            node = object_mut(node)
                .entry(key)
                .or_insert_with(|| Value::Object(Map::new()));
        }
        object_mut(node).insert(leaf.to_string(), value);
    }

    /// Removes the value at a dotted path
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let (parent, leaf) = match path.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, path),
        };
        let node = match parent {
            Some(parent) => parent
                .split('.')
                .try_fold(&mut self.0, |node, key| node.as_object_mut()?.get_mut(key))?,
            None => &mut self.0,
        };
        node.as_object_mut()?.remove(leaf)
    }

    fn ensure_group(&mut self, path: &str) {
        if self.get(path).map_or(true, |v| !v.is_object()) {
            self.set(path, Value::Object(Map::new()));
        }
    }
}

fn object_mut(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with an object"),
    }
}

impl From<Value> for ClaimCandidate {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
