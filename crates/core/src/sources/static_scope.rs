//! Candidates from lexical scopes around the cursor
//!
//! The walk starts at the innermost node at the cursor and climbs parent links
//! to the root. Each scope that encloses the cursor contributes the bindings it
//! introduces; the number of scope boundaries crossed so far is the distance,
//! and the signal is `weight / (distance + 1)`.

use super::{CandidateSource, SourceInput};
use crate::{
    parser::node_text,
    types::{Candidate, CandidateKind, Origin},
};
use tracing::trace;
use tree_sitter::{Node, Tree};

const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "function_expression",
    "function",
    "generator_function_declaration",
    "generator_function",
    "arrow_function",
    "method_definition",
];

/// Kinds that start a scope wherever they appear (see [`is_scope`] for blocks)
const BLOCK_SCOPE_KINDS: &[&str] = &[
    "for_statement",
    "for_in_statement",
    "catch_clause",
    "switch_body",
];

fn is_function(node: &Node) -> bool {
    FUNCTION_KINDS.contains(&node.kind())
}

/// A function body shares the function's scope, a catch body the clause's
fn is_scope(node: &Node) -> bool {
    match node.kind() {
        "program" => true,
        "statement_block" => node
            .parent()
            .is_none_or(|parent| !is_function(&parent) && parent.kind() != "catch_clause"),
        kind => BLOCK_SCOPE_KINDS.contains(&kind) || FUNCTION_KINDS.contains(&kind),
    }
}

/// Whether the node's last token is a real closing delimiter
fn is_closed(node: &Node) -> bool {
    let mut last = *node;
    while last.child_count() > 0 {
        match last.child(last.child_count() - 1) {
            Some(child) => last = child,
            None => break,
        }
    }
    !last.is_missing() && matches!(last.kind(), "}" | ")" | "]")
}

/// The cursor is inside the scope. Right after an unclosed scope (an arrow
/// function's expression body, a block missing its `}`) still counts.
fn encloses(node: &Node, cursor: usize) -> bool {
    if node.kind() == "program" {
        return true;
    }
    node.start_byte() < cursor
        && (cursor < node.end_byte() || (cursor == node.end_byte() && !is_closed(node)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Collect every declaration owned by the scope
    Scope,
    /// Inside a nested block: only `var` declarations reach the scope
    Hoist,
}

pub struct StaticScopeSource {
    weight: f64,
}

impl Default for StaticScopeSource {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl StaticScopeSource {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }

    pub fn signal_for_distance(&self, distance: usize) -> f64 {
        self.weight / (distance as f64 + 1.0)
    }

    /// Bindings visible at `cursor`, innermost scope first
    pub fn collect_from_tree(&self, tree: &Tree, source: &str, cursor: usize) -> Vec<Candidate> {
        let root = tree.root_node();
        if cursor > source.len() {
            return Vec::new();
        }

        let start = root.descendant_for_byte_range(cursor, cursor).unwrap_or(root);
        let mut candidates = Vec::new();
        let mut distance = 0;
        let mut current = Some(start);

        while let Some(node) = current {
            if is_scope(&node) && encloses(&node, cursor) {
                let mut collector = ScopeCollector {
                    source,
                    cursor,
                    signal: self.signal_for_distance(distance),
                    out: &mut candidates,
                };
                collector.collect(&node);
                trace!(
                    "scope '{}' at distance {}: {} candidates so far",
                    node.kind(),
                    distance,
                    candidates.len()
                );
                distance += 1;
            }
            current = node.parent();
        }

        candidates
    }
}

impl CandidateSource for StaticScopeSource {
    fn name(&self) -> &'static str {
        "static"
    }

    fn applies(&self, input: &SourceInput<'_>) -> bool {
        input.tree.is_some() && input.site.is_identifier()
    }

    fn collect(&self, input: &SourceInput<'_>) -> Vec<Candidate> {
        match input.tree {
            Some(tree) => self.collect_from_tree(tree, input.source, input.cursor),
            None => Vec::new(),
        }
    }
}

/// Bindings of one scope at one distance
struct ScopeCollector<'a, 's> {
    source: &'s str,
    cursor: usize,
    signal: f64,
    out: &'a mut Vec<Candidate>,
}

impl ScopeCollector<'_, '_> {
    fn collect(&mut self, scope: &Node) {
        let hoist_target = scope.kind() == "program" || is_function(scope);
        let mut body: Option<Node> = Some(*scope);

        if is_function(scope) {
            // a named function expression is visible inside itself; method names are not bindings
            if matches!(
                scope.kind(),
                "function_expression" | "function" | "generator_function"
            ) {
                if let Some(name) = scope.child_by_field_name("name") {
                    self.emit(&name, CandidateKind::Function);
                }
            }
            if let Some(params) = scope.child_by_field_name("parameters") {
                self.emit_pattern(&params, CandidateKind::Parameter);
            }
            if let Some(param) = scope.child_by_field_name("parameter") {
                self.emit_pattern(&param, CandidateKind::Parameter);
            }
            body = scope
                .child_by_field_name("body")
                .filter(|b| b.kind() == "statement_block");
        } else if scope.kind() == "catch_clause" {
            if let Some(param) = scope.child_by_field_name("parameter") {
                self.emit_pattern(&param, CandidateKind::Variable);
            }
            body = scope.child_by_field_name("body");
        } else if scope.kind() == "for_in_statement" {
            if declaration_kind(scope, self.source).is_some_and(|k| k != "var") {
                if let Some(left) = scope.child_by_field_name("left") {
                    self.emit_pattern(&left, CandidateKind::Variable);
                }
            }
        }

        let Some(body) = body else {
            return;
        };

        let mut stack: Vec<(Node, Mode)> = children(&body)
            .into_iter()
            .rev()
            .map(|child| (child, Mode::Scope))
            .collect();

        while let Some((node, mode)) = stack.pop() {
            match node.kind() {
                "variable_declaration" => {
                    if hoist_target {
                        self.emit_declarators(&node);
                    }
                }
                "lexical_declaration" => {
                    if mode == Mode::Scope {
                        self.emit_declarators(&node);
                    }
                }
                "function_declaration" | "generator_function_declaration" => {
                    if mode == Mode::Scope {
                        if let Some(name) = node.child_by_field_name("name") {
                            self.emit(&name, CandidateKind::Function);
                        }
                    }
                }
                "class_declaration" => {
                    if mode == Mode::Scope {
                        if let Some(name) = node.child_by_field_name("name") {
                            self.emit(&name, CandidateKind::Class);
                        }
                    }
                }
                "import_statement" => {
                    if mode == Mode::Scope {
                        self.emit_imports(&node);
                    }
                }
                "class" | "class_body" => {}
                kind if FUNCTION_KINDS.contains(&kind) => {}
                _ if is_scope(&node) => {
                    if hoist_target {
                        if node.kind() == "for_in_statement"
                            && declaration_kind(&node, self.source) == Some("var")
                        {
                            if let Some(left) = node.child_by_field_name("left") {
                                self.emit_pattern(&left, CandidateKind::Variable);
                            }
                        }
                        stack.extend(children(&node).into_iter().rev().map(|c| (c, Mode::Hoist)));
                    }
                }
                _ => {
                    stack.extend(children(&node).into_iter().rev().map(|c| (c, mode)));
                }
            }
        }
    }

    /// Emit a binding if it was declared before the cursor. A name that
    /// reaches the cursor is the word being typed, not a candidate.
    fn emit(&mut self, name: &Node, kind: CandidateKind) {
        if name.end_byte() >= self.cursor {
            return;
        }
        let text = node_text(name, self.source);
        if text.is_empty() || name.is_missing() {
            return;
        }
        self.out
            .push(Candidate::new(text, kind, self.signal, Origin::Static));
    }

    fn emit_declarators(&mut self, declaration: &Node) {
        for declarator in children(declaration) {
            if declarator.kind() == "variable_declarator" {
                if let Some(name) = declarator.child_by_field_name("name") {
                    self.emit_pattern(&name, CandidateKind::Variable);
                }
            }
        }
    }

    /// Every identifier bound by a (possibly destructuring) pattern
    fn emit_pattern(&mut self, pattern: &Node, kind: CandidateKind) {
        let mut stack = vec![*pattern];
        while let Some(node) = stack.pop() {
            match node.kind() {
                "identifier" | "shorthand_property_identifier_pattern" => self.emit(&node, kind),
                "assignment_pattern" | "object_assignment_pattern" => {
                    stack.extend(node.child_by_field_name("left"));
                }
                "pair_pattern" => stack.extend(node.child_by_field_name("value")),
                "formal_parameters" | "object_pattern" | "array_pattern" | "rest_pattern" => {
                    stack.extend(named_children(&node).into_iter().rev());
                }
                _ => {}
            }
        }
    }

    fn emit_imports(&mut self, import: &Node) {
        let mut stack = named_children(import);
        while let Some(node) = stack.pop() {
            match node.kind() {
                "import_clause" | "namespace_import" | "named_imports" => {
                    stack.extend(named_children(&node));
                }
                "identifier" => self.emit(&node, CandidateKind::Variable),
                "import_specifier" => {
                    let local = node
                        .child_by_field_name("alias")
                        .or_else(|| node.child_by_field_name("name"));
                    if let Some(local) = local.filter(|n| n.kind() == "identifier") {
                        self.emit(&local, CandidateKind::Variable);
                    }
                }
                _ => {}
            }
        }
    }
}

/// `var`, `let` or `const` of a `for (... in/of ...)` head
fn declaration_kind<'s>(node: &Node, source: &'s str) -> Option<&'s str> {
    node.child_by_field_name("kind")
        .map(|kind| node_text(&kind, source))
}

fn children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}
