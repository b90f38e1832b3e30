use crate::error::{Error, Result};
use tree_sitter::{Parser, Tree};

pub struct JsParser {
    parser: Parser,
}

impl JsParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    /// Parse with tree-sitter's error recovery; only fails when no tree comes back
    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| Error::ParseError("Failed to parse source code".to_string()))
    }

    /// Parse for completion purposes.
    ///
    /// A root that is itself an error node carries no usable structure and
    /// counts as a failure. In strict mode any syntax error does.
    pub fn parse_checked(&mut self, source: &str, strict: bool) -> Result<Tree> {
        let tree = self.parse(source)?;
        let root = tree.root_node();

        if root.is_error() {
            return Err(Error::ParseError(
                "Source has no recognizable structure".to_string(),
            ));
        }
        if strict && root.has_error() {
            let position = first_error_position(&tree);
            return Err(Error::ParseError(format!(
                "Syntax error at line {}, column {}",
                position.row + 1,
                position.column + 1
            )));
        }

        Ok(tree)
    }
}

fn first_error_position(tree: &Tree) -> tree_sitter::Point {
    let mut stack = vec![tree.root_node()];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return node.start_position();
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    tree.root_node().start_position()
}
