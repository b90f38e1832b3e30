//! JSON snapshots of a runtime object graph
//!
//! Hosts without an embedded runtime (the CLI, tests) describe the values to
//! inspect as a flat table of objects keyed by id. Property values are JSON
//! primitives, or `{"$ref": "<id>"}` to point at another object.

use super::{ContextBinding, Heap, ObjectId, RuntimeContext, Value};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeSnapshot {
    /// Id of the object handed to the engine
    pub root: String,
    #[serde(default)]
    pub binding: ContextBinding,
    #[serde(default)]
    pub objects: BTreeMap<String, ObjectSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectSpec {
    #[serde(default)]
    pub prototype: Option<String>,
    #[serde(default)]
    pub callable: bool,
    #[serde(default)]
    pub properties: Vec<PropertySpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertySpec {
    pub name: String,
    #[serde(default)]
    pub value: ValueSpec,
    #[serde(default = "default_enumerable")]
    pub enumerable: bool,
}

fn default_enumerable() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ValueSpec {
    Ref {
        #[serde(rename = "$ref")]
        target: String,
    },
    Primitive(serde_json::Value),
}

impl Default for ValueSpec {
    fn default() -> Self {
        ValueSpec::Primitive(serde_json::Value::Null)
    }
}

/// A heap built from a snapshot, plus the value and binding to inspect
#[derive(Debug, Clone)]
pub struct LoadedRuntime {
    pub heap: Heap,
    pub value: Value,
    pub binding: ContextBinding,
}

impl LoadedRuntime {
    pub fn context(&self) -> RuntimeContext<'_> {
        RuntimeContext {
            heap: &self.heap,
            value: self.value.clone(),
            binding: self.binding,
        }
    }
}

impl RuntimeSnapshot {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::SnapshotError(format!("Failed to parse snapshot: {e}")))
    }

    /// Allocate every object, then wire properties and prototypes
    pub fn build(&self) -> Result<LoadedRuntime> {
        let mut heap = Heap::new();
        let mut ids: BTreeMap<&str, ObjectId> = BTreeMap::new();

        for (key, spec) in &self.objects {
            let id = if spec.callable {
                heap.alloc_function()
            } else {
                heap.alloc_object()
            };
            ids.insert(key.as_str(), id);
        }

        let lookup = |key: &str, context: &str| -> Result<ObjectId> {
            ids.get(key).copied().ok_or_else(|| {
                Error::SnapshotError(format!("Unknown object id '{key}' referenced by {context}"))
            })
        };

        for (key, spec) in &self.objects {
            let id = lookup(key, "the object table")?;

            if let Some(prototype) = &spec.prototype {
                let proto = lookup(prototype, &format!("prototype of '{key}'"))?;
                heap.set_prototype(id, Some(proto));
            }

            for property in &spec.properties {
                let value = match &property.value {
                    ValueSpec::Ref { target } => {
                        Value::Object(lookup(target, &format!("'{key}.{}'", property.name))?)
                    }
                    ValueSpec::Primitive(json) => primitive_value(json),
                };
                heap.define_property(id, property.name.clone(), value, property.enumerable);
            }
        }

        let root = lookup(&self.root, "the snapshot root")?;

        Ok(LoadedRuntime {
            heap,
            value: Value::Object(root),
            binding: self.binding,
        })
    }
}

/// Arrays and inline objects have no identity in a snapshot and load as `undefined`
fn primitive_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Undefined),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Value::Undefined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "root": "global",
        "binding": "GLOBAL",
        "objects": {
            "global": {
                "prototype": "objproto",
                "properties": [
                    { "name": "console", "value": { "$ref": "console" } },
                    { "name": "answer", "value": 42 },
                    { "name": "hidden", "value": "x", "enumerable": false }
                ]
            },
            "console": {
                "properties": [ { "name": "log", "value": { "$ref": "fn" } } ]
            },
            "fn": { "callable": true },
            "objproto": {
                "properties": [ { "name": "toString", "value": { "$ref": "fn" } } ]
            }
        }
    }"#;

    #[test]
    fn test_build_snapshot() {
        let snapshot = RuntimeSnapshot::from_json_str(SNAPSHOT).unwrap();
        assert_eq!(snapshot.binding, ContextBinding::Global);

        let runtime = snapshot.build().unwrap();
        let heap = &runtime.heap;
        assert_eq!(heap.len(), 4);

        let answer = heap.get(&runtime.value, "answer", 8);
        assert_eq!(answer, Some(&Value::Number(42.0)));

        let to_string = heap.get(&runtime.value, "toString", 8).unwrap();
        assert!(heap.is_callable(to_string));

        let global = heap.object(runtime.value.as_object().unwrap()).unwrap();
        assert!(!global.own_property("hidden").unwrap().enumerable);
    }

    #[test]
    fn test_unknown_reference_is_an_error() {
        let json = r#"{ "root": "g", "objects": { "g": { "prototype": "nope" } } }"#;
        let err = RuntimeSnapshot::from_json_str(json).unwrap().build().unwrap_err();
        assert!(matches!(err, Error::SnapshotError(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_unknown_root_is_an_error() {
        let json = r#"{ "root": "missing", "objects": {} }"#;
        let err = RuntimeSnapshot::from_json_str(json).unwrap().build().unwrap_err();
        assert!(matches!(err, Error::SnapshotError(_)));
    }

    #[test]
    fn test_receiver_binding_and_invalid_json() {
        let json = r#"{ "root": "o", "binding": "receiver", "objects": { "o": {} } }"#;
        let snapshot = RuntimeSnapshot::from_json_str(json).unwrap();
        assert_eq!(snapshot.binding, ContextBinding::Receiver);

        let err = RuntimeSnapshot::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::SnapshotError(_)));
    }
}
