use scopehint_core::{Candidate, CandidateKind, Origin};

pub fn kind_label(kind: CandidateKind) -> &'static str {
    match kind {
        CandidateKind::Keyword => "keyword",
        CandidateKind::Variable => "variable",
        CandidateKind::Parameter => "parameter",
        CandidateKind::Function => "function",
        CandidateKind::Class => "class",
        CandidateKind::Property => "property",
    }
}

pub fn origin_label(origin: Origin) -> &'static str {
    match origin {
        Origin::Static => "static",
        Origin::Dynamic => "dynamic",
        Origin::Keyword => "keyword",
    }
}

/// How the candidate is inserted: bare, or bracketed for non-identifier property names
pub fn insert_text(candidate: &Candidate) -> String {
    if candidate.needs_brackets {
        format!("[{}]", serde_json::Value::String(candidate.name.clone()))
    } else {
        candidate.name.clone()
    }
}

/// One table row per candidate, numbered from 1
pub fn format_candidates(candidates: &[Candidate]) -> Vec<String> {
    let width = candidates
        .iter()
        .map(|c| insert_text(c).chars().count())
        .max()
        .unwrap_or(0);

    candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            format!(
                "{:>4}. {:<width$}  {:<9}  {:>7.2}  {}",
                i + 1,
                insert_text(candidate),
                kind_label(candidate.kind),
                candidate.score,
                origin_label(candidate.origin),
                width = width
            )
        })
        .collect()
}
