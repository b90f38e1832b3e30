//! Arena-backed object graph standing in for a host's live values
//!
//! Objects live in a flat arena and refer to each other (and to their
//! prototypes) through [`ObjectId`], so cyclic graphs need no special
//! ownership handling. Every walk over the prototype relation is capped.

use std::fmt;

/// Handle to an object in a [`Heap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(ObjectId),
}

impl Value {
    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            Value::Object(id) => Some(*id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: Value,
    pub enumerable: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectData {
    properties: Vec<Property>,
    prototype: Option<ObjectId>,
    callable: bool,
}

impl ObjectData {
    /// Own properties in definition order
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn own_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn prototype(&self) -> Option<ObjectId> {
        self.prototype
    }

    pub fn is_callable(&self) -> bool {
        self.callable
    }
}

#[derive(Debug, Clone, Default)]
pub struct Heap {
    objects: Vec<ObjectData>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_object(&mut self) -> ObjectId {
        self.objects.push(ObjectData::default());
        ObjectId(self.objects.len() - 1)
    }

    pub fn alloc_function(&mut self) -> ObjectId {
        self.objects.push(ObjectData {
            callable: true,
            ..ObjectData::default()
        });
        ObjectId(self.objects.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object(&self, id: ObjectId) -> Option<&ObjectData> {
        self.objects.get(id.0)
    }

    /// Define or overwrite an enumerable own property. Returns false for an unknown id.
    pub fn set_property(&mut self, id: ObjectId, name: impl Into<String>, value: Value) -> bool {
        self.define_property(id, name, value, true)
    }

    pub fn define_property(
        &mut self,
        id: ObjectId,
        name: impl Into<String>,
        value: Value,
        enumerable: bool,
    ) -> bool {
        let Some(object) = self.objects.get_mut(id.0) else {
            return false;
        };
        let name = name.into();
        match object.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => {
                existing.value = value;
                existing.enumerable = enumerable;
            }
            None => object.properties.push(Property {
                name,
                value,
                enumerable,
            }),
        }
        true
    }

    /// Link `id` to `prototype`. Cycles are allowed; walks are depth-capped.
    pub fn set_prototype(&mut self, id: ObjectId, prototype: Option<ObjectId>) -> bool {
        match self.objects.get_mut(id.0) {
            Some(object) => {
                object.prototype = prototype;
                true
            }
            None => false,
        }
    }

    pub fn set_callable(&mut self, id: ObjectId, callable: bool) -> bool {
        match self.objects.get_mut(id.0) {
            Some(object) => {
                object.callable = callable;
                true
            }
            None => false,
        }
    }

    pub fn is_callable(&self, value: &Value) -> bool {
        value
            .as_object()
            .and_then(|id| self.object(id))
            .is_some_and(ObjectData::is_callable)
    }

    /// `id` followed by its prototype ancestors, with their depth, stopping after `max_depth` hops
    pub fn chain(&self, id: ObjectId, max_depth: usize) -> PrototypeChain<'_> {
        PrototypeChain {
            heap: self,
            next: self.object(id).map(|_| id),
            depth: 0,
            max_depth,
        }
    }

    /// Property lookup through the prototype chain
    pub fn get(&self, value: &Value, name: &str, max_depth: usize) -> Option<&Value> {
        let id = value.as_object()?;
        self.chain(id, max_depth).find_map(|(_, object)| {
            self.object(object)
                .and_then(|data| data.own_property(name))
                .map(|p| &p.value)
        })
    }

    /// Follow a member path such as `["a", "b"]` for `a.b` starting at `root`
    pub fn resolve_path(&self, root: &Value, path: &[String], max_depth: usize) -> Option<Value> {
        let mut current = root;
        for segment in path {
            current = self.get(current, segment, max_depth)?;
        }
        Some(current.clone())
    }
}

/// Iterator over an object and its ancestors, see [`Heap::chain`]
pub struct PrototypeChain<'h> {
    heap: &'h Heap,
    next: Option<ObjectId>,
    depth: usize,
    max_depth: usize,
}

impl Iterator for PrototypeChain<'_> {
    type Item = (usize, ObjectId);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let depth = self.depth;

        self.next = if depth < self.max_depth {
            self.heap
                .object(current)
                .and_then(ObjectData::prototype)
                .filter(|proto| self.heap.object(*proto).is_some())
        } else {
            None
        };
        self.depth += 1;

        Some((depth, current))
    }
}
