//! Classification of the cursor position
//!
//! Works on the raw text before the cursor so it stays usable when the
//! parser has recovered badly around half-typed code. The tree, when there is
//! one, is only consulted to suppress completion inside literals and comments.

use super::utils::{node_text, strictly_contains};
use crate::utils::{is_identifier_part, is_identifier_start};
use tree_sitter::{Node, Tree};

/// Node kinds whose interior is not code
const NON_CODE_KINDS: &[&str] = &["string", "template_string", "regex", "comment"];

/// What kind of completion the cursor asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionSite {
    /// A bare identifier, possibly partially typed
    Identifier { prefix: String },
    /// A property after `.` or `?.`. `receiver` is the dotted identifier path in
    /// front of the operator (`a.b.` gives `["a", "b"]`), or `None` when the
    /// receiver is an arbitrary expression such as a call.
    Member {
        receiver: Option<Vec<String>>,
        prefix: String,
    },
    /// Inside a string, comment, regex or numeric literal
    Suppressed,
}

impl CompletionSite {
    /// Classify `cursor` (a byte offset on a char boundary) in `source`
    pub fn analyze(source: &str, cursor: usize, tree: Option<&Tree>) -> Self {
        if let Some(tree) = tree {
            if inside_non_code(tree, source, cursor) {
                return CompletionSite::Suppressed;
            }
        }

        let before = &source[..cursor];
        let (rest, prefix) = split_trailing_identifier(before);
        if prefix.starts_with(|c: char| c.is_ascii_digit()) {
            return CompletionSite::Suppressed;
        }

        let Some(head) = strip_member_operator(rest) else {
            return CompletionSite::Identifier {
                prefix: prefix.to_string(),
            };
        };

        match receiver_path(head) {
            ReceiverPath::NumberLiteral => CompletionSite::Suppressed,
            ReceiverPath::Resolved(path) => CompletionSite::Member {
                receiver: Some(path),
                prefix: prefix.to_string(),
            },
            ReceiverPath::Expression => CompletionSite::Member {
                receiver: None,
                prefix: prefix.to_string(),
            },
        }
    }

    /// The partially typed name at the cursor
    pub fn prefix(&self) -> &str {
        match self {
            CompletionSite::Identifier { prefix } | CompletionSite::Member { prefix, .. } => prefix,
            CompletionSite::Suppressed => "",
        }
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, CompletionSite::Identifier { .. })
    }

    pub fn is_member_access(&self) -> bool {
        matches!(self, CompletionSite::Member { .. })
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, CompletionSite::Suppressed)
    }
}

enum ReceiverPath {
    Resolved(Vec<String>),
    Expression,
    NumberLiteral,
}

/// Split `text` into everything before its trailing identifier characters and those characters
fn split_trailing_identifier(text: &str) -> (&str, &str) {
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_identifier_part(*c))
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    text.split_at(start)
}

/// If `text` ends with a member-access operator (`.` or `?.`), return what precedes it
fn strip_member_operator(text: &str) -> Option<&str> {
    let text = text.trim_end();
    let head = text.strip_suffix('.')?;
    // `...` is spread, `..` never occurs in valid code
    if head.ends_with('.') {
        return None;
    }
    Some(head.strip_suffix('?').unwrap_or(head))
}

/// Walk backwards over `ident.ident.ident`
fn receiver_path(mut head: &str) -> ReceiverPath {
    let mut path = Vec::new();
    loop {
        let (rest, word) = split_trailing_identifier(head.trim_end());
        if word.is_empty() {
            return ReceiverPath::Expression;
        }
        if !word.starts_with(is_identifier_start) {
            return if path.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
                ReceiverPath::NumberLiteral
            } else {
                ReceiverPath::Expression
            };
        }
        path.push(word.to_string());

        match strip_member_operator(rest) {
            Some(next) => head = next,
            None => {
                path.reverse();
                return ReceiverPath::Resolved(path);
            }
        }
    }
}

fn inside_non_code(tree: &Tree, source: &str, cursor: usize) -> bool {
    if cursor == 0 {
        return false;
    }
    let root = tree.root_node();
    let Some(node) = root.descendant_for_byte_range(cursor - 1, cursor) else {
        return false;
    };

    let mut current: Option<Node> = Some(node);
    while let Some(node) = current {
        match node.kind() {
            // `${ ... }` inside a template is code again
            "template_substitution" => return false,
            // a line comment has no closing delimiter, so its end is still inside it
            "comment" if node_text(&node, source).starts_with("//") => {
                return node.start_byte() < cursor && cursor <= node.end_byte();
            }
            // an unterminated literal runs up to the cursor
            "string" | "template_string" if !is_terminated(&node) => {
                return node.start_byte() < cursor && cursor <= node.end_byte();
            }
            kind if NON_CODE_KINDS.contains(&kind) => return strictly_contains(&node, cursor),
            _ => {}
        }
        current = node.parent();
    }
    false
}

/// Whether a literal ends with a real delimiter matching its opening one
fn is_terminated(node: &Node) -> bool {
    let count = node.child_count();
    if count < 2 {
        return false;
    }
    match (node.child(0), node.child(count - 1)) {
        (Some(open), Some(close)) => {
            !close.is_missing()
                && close.kind() == open.kind()
                && close.start_byte() > open.start_byte()
                && close.end_byte() == node.end_byte()
        }
        _ => false,
    }
}
