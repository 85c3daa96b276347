//! Recursive syntax-tree walk over parsed Kotlin sources
//!
//! This is the central extraction algorithm: visit every node of the tree,
//! prune subtrees rooted at abstract classes, and turn each
//! `function_declaration` into a `FunctionRecord` appended to the caller's
//! accumulation table.

use tree_sitter::Node;

use crate::record::{FunctionRecord, FunctionTable};

/// Walk a syntax tree rooted at `node`, appending extracted function records
/// to `table`.
///
/// `keep_empty_bodies` retains functions whose body is `""` or `"{}"`; the
/// production corpus run passes `false`, the golden harness also runs a
/// `true` pass.
pub fn walk(node: &Node, source: &str, table: &mut FunctionTable, keep_empty_bodies: bool) {
    // Abstract classes and everything they lexically contain are excluded
    if node.kind() == "class_declaration" && is_abstract_class(node, source) {
        return;
    }

    if node.kind() == "function_declaration" {
        extract_function(node, source, table, keep_empty_bodies);
        // No return: local functions nested in this body are extracted too
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(&child, source, table, keep_empty_bodies);
    }
}

/// Check whether a class declaration carries the `abstract` modifier.
///
/// The grammar attaches modifiers under a child whose kind contains
/// "modifier"; the modifier keywords themselves are that child's children.
fn is_abstract_class(node: &Node, source: &str) -> bool {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if !child.kind().contains("modifier") {
            continue;
        }
        let mut inner_cursor = child.walk();
        for grandchild in child.children(&mut inner_cursor) {
            if node_text(&grandchild, source) == "abstract" {
                return true;
            }
        }
    }
    false
}

/// Build one record from the direct children of a `function_declaration`
fn extract_function(
    node: &Node,
    source: &str,
    table: &mut FunctionTable,
    keep_empty_bodies: bool,
) {
    let mut record = FunctionRecord::default();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            // Replaces rather than appends: only the first modifiers child is
            // effective if the grammar ever emits more than one. Preserved as
            // a documented policy.
            "modifiers" | "modifier" => {
                let mut mod_cursor = child.walk();
                record.modifiers = child
                    .children(&mut mod_cursor)
                    .map(|m| node_text(&m, source))
                    .collect();
            }
            "function_body" => record.function_body.push(node_text(&child, source)),
            "function_value_parameters" => record
                .function_value_parameters
                .push(node_text(&child, source)),
            // The kotlin-ng grammar names this child `identifier`; older
            // Kotlin grammars emit `simple_identifier`. Match both.
            "identifier" | "simple_identifier" => {
                record.simple_identifier.push(node_text(&child, source))
            }
            // May collect twice: receiver type then declared return type
            "user_type" => record.user_type.push(node_text(&child, source)),
            "type_parameters" => record.type_parameters.push(node_text(&child, source)),
            _ => {}
        }
    }

    if record.has_empty_body() && !keep_empty_bodies {
        return;
    }

    record.compute_flags();
    table.push(record);
}

fn node_text(node: &Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}
