use super::{CandidateSource, SourceInput};
use crate::{
    keywords::KeywordVocabulary,
    types::{Candidate, CandidateKind, Origin},
};

/// Offers language keywords at bare-identifier positions
pub struct KeywordSource {
    vocabulary: &'static KeywordVocabulary,
}

impl Default for KeywordSource {
    fn default() -> Self {
        Self::new(KeywordVocabulary::javascript())
    }
}

impl KeywordSource {
    pub fn new(vocabulary: &'static KeywordVocabulary) -> Self {
        Self { vocabulary }
    }
}

impl CandidateSource for KeywordSource {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn applies(&self, input: &SourceInput<'_>) -> bool {
        input.site.is_identifier()
    }

    fn collect(&self, _input: &SourceInput<'_>) -> Vec<Candidate> {
        self.vocabulary
            .iter()
            .map(|(word, weight)| {
                Candidate::new(word, CandidateKind::Keyword, weight, Origin::Keyword)
            })
            .collect()
    }
}
