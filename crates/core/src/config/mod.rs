//! Configuration management for scopehint

mod settings;

// Re-export main types
pub use settings::{Config, ParserConfig, RankingConfig, RuntimeConfig};
