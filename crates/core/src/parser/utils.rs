use tree_sitter::Node;

/// Source text covered by `node`, or `""` when the range is not valid UTF-8
pub fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Whether `offset` lies strictly between the node's first and last byte
pub fn strictly_contains(node: &Node, offset: usize) -> bool {
    node.start_byte() < offset && offset < node.end_byte()
}
