//! Entry point that coordinates parsing, site analysis and ranking

use crate::{
    config::Config,
    keywords::KeywordVocabulary,
    parser::{CompletionSite, JsParser},
    ranking::Aggregator,
    sources::{DynamicSource, KeywordSource, SourceInput, StaticScopeSource},
    types::{CompletionRequest, RankedResult, clamp_offset},
};
use tracing::debug;
use tree_sitter::Tree;

/// Which engine variant the host loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Full engine with runtime inspection
    Script,
    /// Template/markup embedding without a live runtime: static and keyword sources only
    Markup,
}

/// Completion engine; cheap to share across threads, holds no per-request state
pub struct CompletionEngine {
    config: Config,
    flavor: Flavor,
    aggregator: Aggregator,
}

impl CompletionEngine {
    pub fn new(config: Config, flavor: Flavor) -> Self {
        let mut aggregator = Aggregator::new(config.ranking.merge);
        aggregator.register(Box::new(StaticScopeSource::new(config.ranking.static_weight)));
        if flavor == Flavor::Script {
            aggregator.register(Box::new(
                DynamicSource::new(
                    config.ranking.dynamic_weight,
                    config.runtime.max_prototype_depth,
                )
                .with_non_enumerable(config.runtime.include_non_enumerable),
            ));
        }
        aggregator.register(Box::new(KeywordSource::new(KeywordVocabulary::javascript())));

        Self {
            config,
            flavor,
            aggregator,
        }
    }

    pub fn script() -> Self {
        Self::new(Config::default(), Flavor::Script)
    }

    pub fn markup() -> Self {
        Self::new(Config::default(), Flavor::Markup)
    }

    /// Pick the variant matching what the embedding environment offers
    pub fn for_host(runtime_available: bool) -> Self {
        if runtime_available {
            Self::script()
        } else {
            Self::markup()
        }
    }

    pub fn with_config(config: Config) -> Self {
        Self::new(config, Flavor::Script)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.aggregator.source_names()
    }

    /// Rank completions for `request`. Never fails; degrades to fewer or no candidates.
    pub fn rank(&self, request: &CompletionRequest<'_>) -> RankedResult {
        let source = request.source_text;
        let cursor = clamp_offset(source, request.cursor_offset);
        if cursor != request.cursor_offset {
            debug!(
                "cursor offset {} clamped to {}",
                request.cursor_offset, cursor
            );
        }

        let tree = self.parse(source);
        let site = CompletionSite::analyze(source, cursor, tree.as_ref());
        debug!("completion site at {}: {:?}", cursor, site);

        let input = SourceInput {
            source,
            cursor,
            site: &site,
            tree: tree.as_ref(),
            runtime: request.runtime_context.as_ref(),
        };
        self.aggregator.rank(&input)
    }

    /// A fresh parser per request keeps `rank` usable through `&self`
    fn parse(&self, source: &str) -> Option<Tree> {
        let mut parser = match JsParser::new() {
            Ok(parser) => parser,
            Err(e) => {
                debug!("parser unavailable: {e}");
                return None;
            }
        };
        match parser.parse_checked(source, self.config.parser.strict) {
            Ok(tree) => Some(tree),
            Err(e) => {
                debug!("no static candidates: {e}");
                None
            }
        }
    }
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::script()
    }
}
