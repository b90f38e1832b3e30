//! Runtime values the dynamic candidate source inspects

pub mod heap;
pub mod snapshot;

pub use heap::{Heap, ObjectData, ObjectId, PrototypeChain, Property, Value};
pub use snapshot::{LoadedRuntime, RuntimeSnapshot};

use crate::impl_case_insensitive_deserialize;
use serde::Serialize;

/// How the host's value relates to the cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextBinding {
    /// The value is the global object: bare identifiers enumerate it and
    /// member paths are resolved through it
    #[default]
    Global,
    /// The value is the object in front of the member-access operator
    Receiver,
}

impl_case_insensitive_deserialize!(
    ContextBinding,
    Global => "global",
    Receiver => "receiver"
);

/// A live value handed over by the host for one request
#[derive(Debug, Clone)]
pub struct RuntimeContext<'h> {
    pub heap: &'h Heap,
    pub value: Value,
    pub binding: ContextBinding,
}

impl<'h> RuntimeContext<'h> {
    pub fn global(heap: &'h Heap, value: Value) -> Self {
        Self {
            heap,
            value,
            binding: ContextBinding::Global,
        }
    }

    pub fn receiver(heap: &'h Heap, value: Value) -> Self {
        Self {
            heap,
            value,
            binding: ContextBinding::Receiver,
        }
    }
}
