//! Fan-out to candidate sources, merge by name, filter by prefix, sort
//!
//! Ranking order (see [`Candidate::rank_cmp`]):
//! 1. Merged score - higher is better
//! 2. Name length - shorter is better
//! 3. Lexicographic order - as tie-breaker

use super::MergeStrategy;
use crate::{
    sources::{CandidateSource, SourceInput},
    types::{Candidate, RankedResult},
};
use std::collections::HashMap;
use tracing::debug;

pub struct Aggregator {
    sources: Vec<Box<dyn CandidateSource>>,
    merge: MergeStrategy,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(MergeStrategy::Max)
    }
}

impl Aggregator {
    pub fn new(merge: MergeStrategy) -> Self {
        Self {
            sources: Vec::new(),
            merge,
        }
    }

    /// Sources are consulted in registration order
    pub fn with_source(mut self, source: Box<dyn CandidateSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn register(&mut self, source: Box<dyn CandidateSource>) {
        self.sources.push(source);
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn merge_strategy(&self) -> MergeStrategy {
        self.merge
    }

    pub fn rank(&self, input: &SourceInput<'_>) -> RankedResult {
        if input.site.is_suppressed() {
            debug!("completion suppressed at offset {}", input.cursor);
            return RankedResult::empty();
        }

        let mut collected = Vec::new();
        for source in &self.sources {
            if !source.applies(input) {
                continue;
            }
            let candidates = source.collect(input);
            debug!("source '{}' produced {} candidates", source.name(), candidates.len());
            collected.extend(candidates);
        }

        let prefix = input.site.prefix();
        let merged: Vec<Candidate> = merge_candidates(collected, self.merge)
            .into_iter()
            .filter(|candidate| candidate.name.starts_with(prefix))
            .collect();

        RankedResult::from_merged(merged)
    }
}

/// Collapse candidates sharing a name into one.
///
/// With [`MergeStrategy::Max`] the strongest candidate wins whole (kind,
/// origin and bracket flag included); on equal scores the first one stays.
/// With [`MergeStrategy::Sum`] the first candidate is kept and scores add up.
/// First-appearance order is preserved.
pub fn merge_candidates(
    candidates: impl IntoIterator<Item = Candidate>,
    strategy: MergeStrategy,
) -> Vec<Candidate> {
    let mut merged: Vec<Candidate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        match index.get(&candidate.name) {
            Some(&slot) => {
                let existing = &mut merged[slot];
                match strategy {
                    MergeStrategy::Max => {
                        if candidate.score > existing.score {
                            *existing = candidate;
                        }
                    }
                    MergeStrategy::Sum => existing.score += candidate.score,
                }
            }
            None => {
                index.insert(candidate.name.clone(), merged.len());
                merged.push(candidate);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CompletionSite;
    use crate::types::{CandidateKind, Origin};

    /// Source returning a fixed list, for exercising the aggregator alone
    struct FixedSource {
        name: &'static str,
        candidates: Vec<Candidate>,
        member_only: bool,
    }

    impl CandidateSource for FixedSource {
        fn name(&self) -> &'static str {
            self.name
        }

        fn applies(&self, input: &SourceInput<'_>) -> bool {
            input.site.is_member_access() == self.member_only
        }

        fn collect(&self, _input: &SourceInput<'_>) -> Vec<Candidate> {
            self.candidates.clone()
        }
    }

    fn fixed(name: &'static str, origin: Origin, entries: &[(&str, f64)]) -> Box<FixedSource> {
        let kind = match origin {
            Origin::Keyword => CandidateKind::Keyword,
            Origin::Dynamic => CandidateKind::Property,
            Origin::Static => CandidateKind::Variable,
        };
        Box::new(FixedSource {
            name,
            candidates: entries
                .iter()
                .map(|(n, s)| Candidate::new(*n, kind, *s, origin))
                .collect(),
            member_only: false,
        })
    }

    fn rank(aggregator: &Aggregator, site: &CompletionSite) -> RankedResult {
        aggregator.rank(&SourceInput {
            source: "",
            cursor: 0,
            site,
            tree: None,
            runtime: None,
        })
    }

    fn identifier(prefix: &str) -> CompletionSite {
        CompletionSite::Identifier {
            prefix: prefix.to_string(),
        }
    }

    #[test]
    fn test_merge_takes_max_not_sum() {
        let aggregator = Aggregator::default()
            .with_source(fixed("static", Origin::Static, &[("x", 5.0)]))
            .with_source(fixed("dynamic", Origin::Dynamic, &[("x", 3.0)]));

        let result = rank(&aggregator, &identifier(""));
        assert_eq!(result.len(), 1);
        let x = result.get("x").unwrap();
        assert_eq!(x.score, 5.0);
        assert_eq!(x.origin, Origin::Static);
    }

    #[test]
    fn test_merge_winner_carries_kind_and_origin() {
        let aggregator = Aggregator::default()
            .with_source(fixed("static", Origin::Static, &[("x", 2.0)]))
            .with_source(fixed("dynamic", Origin::Dynamic, &[("x", 7.0)]));

        let x = rank(&aggregator, &identifier("")).get("x").cloned().unwrap();
        assert_eq!(x.score, 7.0);
        assert_eq!(x.kind, CandidateKind::Property);
        assert_eq!(x.origin, Origin::Dynamic);
    }

    #[test]
    fn test_sum_strategy() {
        let aggregator = Aggregator::new(MergeStrategy::Sum)
            .with_source(fixed("static", Origin::Static, &[("x", 5.0)]))
            .with_source(fixed("dynamic", Origin::Dynamic, &[("x", 3.0)]));

        assert_eq!(rank(&aggregator, &identifier("")).get("x").unwrap().score, 8.0);
    }

    #[test]
    fn test_prefix_filter_is_case_sensitive() {
        let aggregator = Aggregator::default().with_source(fixed(
            "static",
            Origin::Static,
            &[("alpha", 1.0), ("Alpine", 1.0), ("beta", 1.0), ("al", 1.0)],
        ));

        let result = rank(&aggregator, &identifier("al"));
        assert_eq!(result.names(), vec!["al", "alpha"]);
        assert!(result.iter().all(|c| c.name.starts_with("al")));
    }

    #[test]
    fn test_names_are_unique() {
        let aggregator = Aggregator::default()
            .with_source(fixed("a", Origin::Static, &[("x", 1.0), ("y", 2.0), ("x", 4.0)]))
            .with_source(fixed("b", Origin::Keyword, &[("y", -2.0), ("if", -4.0)]));

        let result = rank(&aggregator, &identifier(""));
        let mut names = result.names();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(result.names(), vec!["x", "y", "if"]);
    }

    #[test]
    fn test_keywords_rank_below_non_negative_candidates() {
        let aggregator = Aggregator::default()
            .with_source(fixed("keyword", Origin::Keyword, &[("in", -10.0), ("this", -2.0)]))
            .with_source(fixed("static", Origin::Static, &[("zeta", 0.0)]));

        let result = rank(&aggregator, &identifier(""));
        insta::assert_snapshot!(result.names().join(","), @"zeta,this,in");
    }

    #[test]
    fn test_inapplicable_sources_are_skipped() {
        let mut member_source = fixed("member", Origin::Dynamic, &[("prop", 1.0)]);
        member_source.member_only = true;
        let aggregator = Aggregator::default()
            .with_source(fixed("static", Origin::Static, &[("local", 1.0)]))
            .with_source(member_source);

        let site = CompletionSite::Member {
            receiver: None,
            prefix: String::new(),
        };
        assert_eq!(rank(&aggregator, &site).names(), vec!["prop"]);
        assert_eq!(aggregator.source_names(), vec!["static", "member"]);
    }

    #[test]
    fn test_suppressed_site_is_empty() {
        let aggregator =
            Aggregator::default().with_source(fixed("static", Origin::Static, &[("x", 1.0)]));
        assert!(rank(&aggregator, &CompletionSite::Suppressed).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let build = || {
            Aggregator::default()
                .with_source(fixed("s", Origin::Static, &[("bb", 1.0), ("aa", 1.0), ("c", 1.0)]))
                .with_source(fixed("k", Origin::Keyword, &[("do", -3.0)]))
        };
        let first = rank(&build(), &identifier(""));
        let second = rank(&build(), &identifier(""));
        assert_eq!(first, second);
        assert_eq!(first.names(), vec!["c", "aa", "bb", "do"]);
    }
}
