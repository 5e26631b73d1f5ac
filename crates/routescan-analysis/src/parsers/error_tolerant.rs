//! Error-tolerant parsing: trees with ERROR nodes still yield routes from
//! their intact subtrees.

use tree_sitter::Node;

/// Count ERROR and MISSING nodes in a tree.
pub fn count_errors(root: Node) -> u32 {
    let mut count = 0u32;
    collect_errors(root, &mut count);
    count
}

fn collect_errors(node: Node, count: &mut u32) {
    if node.is_error() || node.is_missing() {
        *count += 1;
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            collect_errors(child, count);
        }
    }
}
