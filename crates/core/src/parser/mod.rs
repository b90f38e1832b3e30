//! JavaScript parsing and cursor-site analysis using tree-sitter

pub mod context;
pub mod js_parser;
pub mod utils;

// Re-export commonly used items
pub use context::CompletionSite;
pub use js_parser::JsParser;
pub use utils::{node_text, strictly_contains};
