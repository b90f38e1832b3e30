//! Candidates from a live runtime value
//!
//! Own properties come first (depth 0), then each prototype ancestor. The
//! signal is `weight / (depth + 1)`, so it drops strictly with every hop.

use super::{CandidateSource, SourceInput};
use crate::{
    parser::CompletionSite,
    runtime::{ContextBinding, Heap, RuntimeContext, Value},
    types::{Candidate, CandidateKind, Origin},
    utils::is_identifier_name,
};
use tracing::{debug, trace};

pub const DEFAULT_MAX_PROTOTYPE_DEPTH: usize = 8;

pub struct DynamicSource {
    weight: f64,
    max_depth: usize,
    include_non_enumerable: bool,
}

impl Default for DynamicSource {
    fn default() -> Self {
        Self::new(10.0, DEFAULT_MAX_PROTOTYPE_DEPTH)
    }
}

impl DynamicSource {
    pub fn new(weight: f64, max_depth: usize) -> Self {
        Self {
            weight,
            max_depth,
            include_non_enumerable: false,
        }
    }

    pub fn with_non_enumerable(mut self, include: bool) -> Self {
        self.include_non_enumerable = include;
        self
    }

    pub fn signal_for_depth(&self, depth: usize) -> f64 {
        self.weight / (depth as f64 + 1.0)
    }

    /// Enumerate `value` and its prototype chain. Non-objects yield nothing.
    pub fn collect_from_value(&self, heap: &Heap, value: &Value) -> Vec<Candidate> {
        let Some(id) = value.as_object() else {
            trace!("value {:?} is not inspectable", value);
            return Vec::new();
        };

        let mut candidates = Vec::new();
        for (depth, object_id) in heap.chain(id, self.max_depth) {
            let Some(object) = heap.object(object_id) else {
                break;
            };
            let signal = self.signal_for_depth(depth);

            for property in object.properties() {
                if !property.enumerable && !self.include_non_enumerable {
                    continue;
                }
                let kind = if heap.is_callable(&property.value) {
                    CandidateKind::Function
                } else {
                    CandidateKind::Property
                };
                candidates.push(
                    Candidate::new(property.name.clone(), kind, signal, Origin::Dynamic)
                        .with_brackets(!is_identifier_name(&property.name)),
                );
            }
        }
        candidates
    }

    /// The value whose properties complete the cursor position, if any
    fn target_value(&self, site: &CompletionSite, runtime: &RuntimeContext<'_>) -> Option<Value> {
        match (site, runtime.binding) {
            (CompletionSite::Identifier { .. }, ContextBinding::Global) => {
                Some(runtime.value.clone())
            }
            (CompletionSite::Member { .. }, ContextBinding::Receiver) => {
                Some(runtime.value.clone())
            }
            (CompletionSite::Member { receiver: Some(path), .. }, ContextBinding::Global) => {
                // top-level `this` is the global object itself
                let path = match path.split_first() {
                    Some((first, rest)) if first == "this" => rest,
                    _ => path.as_slice(),
                };
                runtime
                    .heap
                    .resolve_path(&runtime.value, path, self.max_depth)
            }
            _ => None,
        }
    }
}

impl CandidateSource for DynamicSource {
    fn name(&self) -> &'static str {
        "dynamic"
    }

    fn applies(&self, input: &SourceInput<'_>) -> bool {
        input.runtime.is_some() && !input.site.is_suppressed()
    }

    fn collect(&self, input: &SourceInput<'_>) -> Vec<Candidate> {
        let Some(runtime) = input.runtime else {
            return Vec::new();
        };
        match self.target_value(input.site, runtime) {
            Some(value) => self.collect_from_value(runtime.heap, &value),
            None => {
                debug!("no runtime value resolves at {:?}", input.site);
                Vec::new()
            }
        }
    }
}
