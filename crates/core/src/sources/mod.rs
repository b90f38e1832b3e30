//! Candidate sources
//!
//! Every source implements [`CandidateSource`]; the aggregator only sees the
//! trait, so adding a source never touches ranking logic.

pub mod dynamic;
pub mod keyword;
pub mod static_scope;

pub use dynamic::DynamicSource;
pub use keyword::KeywordSource;
pub use static_scope::StaticScopeSource;

use crate::{parser::CompletionSite, runtime::RuntimeContext, types::Candidate};
use tree_sitter::Tree;

/// Everything a source may look at for one request
pub struct SourceInput<'a> {
    pub source: &'a str,
    /// Byte offset, already clamped to a char boundary of `source`
    pub cursor: usize,
    pub site: &'a CompletionSite,
    /// `None` when parsing failed
    pub tree: Option<&'a Tree>,
    pub runtime: Option<&'a RuntimeContext<'a>>,
}

/// Produces completion candidates for a request
pub trait CandidateSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the source has anything to contribute at this site
    fn applies(&self, input: &SourceInput<'_>) -> bool;

    /// Candidates with unscaled, per-source scores. Never fails; an empty
    /// vector means nothing to suggest.
    fn collect(&self, input: &SourceInput<'_>) -> Vec<Candidate>;
}
