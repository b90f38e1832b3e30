//! scopehint - ranked identifier, property and keyword completions for JavaScript
//!
//! This crate provides functionality to:
//! - Collect visible bindings around a cursor from a tree-sitter parse
//! - Enumerate properties of a live runtime value and its prototype chain
//! - Merge those with a frequency-weighted keyword vocabulary into one ranked list
pub mod config;
pub mod engine;
pub mod error;
pub mod keywords;
pub mod parser;
pub mod ranking;
pub mod runtime;
pub mod sources;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use config::Config;
pub use engine::{CompletionEngine, Flavor};
pub use keywords::KeywordVocabulary;
pub use ranking::MergeStrategy;
pub use runtime::{ContextBinding, Heap, ObjectId, RuntimeContext, RuntimeSnapshot, Value};
pub use sources::CandidateSource;
