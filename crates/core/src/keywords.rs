//! Language keyword vocabulary
//!
//! Keywords are weighted by observed usage frequency. The weight of the i-th
//! word of the ordered list is `-(i + 2)`, so every keyword scores below any
//! static or dynamic candidate with a non-negative score.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// JavaScript keywords, most frequently used first
const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "this",
    "function",
    "if",
    "return",
    "var",
    "else",
    "for",
    "new",
    "in",
    "typeof",
    "while",
    "case",
    "break",
    "try",
    "catch",
    "delete",
    "throw",
    "switch",
    "continue",
    "default",
    "instanceof",
    "do",
    "void",
    "finally",
    "let",
    "const",
    "class",
    "extends",
    "super",
    "import",
    "export",
    "yield",
    "async",
    "await",
    "of",
    "null",
    "true",
    "false",
    "undefined",
];

static JAVASCRIPT: Lazy<KeywordVocabulary> =
    Lazy::new(|| KeywordVocabulary::from_ordered(JAVASCRIPT_KEYWORDS.iter().copied()));

/// Immutable keyword → weight table
#[derive(Debug, Clone, Default)]
pub struct KeywordVocabulary {
    words: Vec<String>,
    weights: HashMap<String, f64>,
}

impl KeywordVocabulary {
    /// Build from words ordered most-frequent first. A repeated word keeps its first weight.
    pub fn from_ordered<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = Self::default();
        for (rank, word) in words.into_iter().enumerate() {
            let word = word.into();
            if vocabulary.weights.contains_key(&word) {
                continue;
            }
            vocabulary.weights.insert(word.clone(), -((rank + 2) as f64));
            vocabulary.words.push(word);
        }
        vocabulary
    }

    /// The process-wide JavaScript vocabulary
    pub fn javascript() -> &'static KeywordVocabulary {
        &JAVASCRIPT
    }

    pub fn weight_of(&self, word: &str) -> Option<f64> {
        self.weights.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.weights.contains_key(word)
    }

    /// Words with their weights, in frequency order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.words
            .iter()
            .map(|word| (word.as_str(), self.weights[word.as_str()]))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
