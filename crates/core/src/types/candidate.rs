use serde::Serialize;
use std::cmp::Ordering;

/// What a completion candidate names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Keyword,
    Variable,
    Parameter,
    Function,
    Class,
    Property,
}

/// Which source produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Static,
    Dynamic,
    Keyword,
}

/// One proposed completion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub name: String,
    pub kind: CandidateKind,
    pub score: f64,
    pub origin: Origin,
    /// The name is not a bare identifier and must be written as `obj["name"]`
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub needs_brackets: bool,
}

impl Candidate {
    pub fn new(name: impl Into<String>, kind: CandidateKind, score: f64, origin: Origin) -> Self {
        Self {
            name: name.into(),
            kind,
            score,
            origin,
            needs_brackets: false,
        }
    }

    pub fn with_brackets(mut self, needs_brackets: bool) -> Self {
        self.needs_brackets = needs_brackets;
        self
    }

    /// Ranking order: higher score first, then fewer characters, then lexicographic.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.name.chars().count().cmp(&other.name.chars().count()))
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Candidates ordered best-first, unique by name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedResult {
    candidates: Vec<Candidate>,
}

impl RankedResult {
    /// Build from already merged candidates; sorts them into ranking order.
    pub(crate) fn from_merged(mut candidates: Vec<Candidate>) -> Self {
        candidates.sort_by(Candidate::rank_cmp);
        Self { candidates }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn names(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn into_vec(self) -> Vec<Candidate> {
        self.candidates
    }
}

impl IntoIterator for RankedResult {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
