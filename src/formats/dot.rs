//! GraphViz output for parse trees.
//!
//! Every node becomes a record-shaped statement labeled with its line and
//! either the production name or the token name/value pair; edges connect
//! children to parents by pre-order id. The output is a complete `digraph`
//! ready for `dot -Tpng`.

use crate::ast::ParseNode;

/// Render a complete DOT graph rooted at `node`.
pub fn dotify(node: &ParseNode) -> String {
    let mut out = String::new();
    out.push_str("digraph \"AST\" { \n");
    out.push_str("node [shape=record, style=filled];\n\n");
    append_node(&mut out, node, None);
    out.push_str("\n}\n");
    out
}

fn append_node(out: &mut String, node: &ParseNode, parent_id: Option<i64>) {
    match &node.production {
        Some(production) => {
            out.push_str(&format!(
                "node [shape=record, label=\"{{<f0>line:{} | <f1> {} }}\"] {};\n",
                node.line,
                sanitize(production),
                node.id
            ));
        }
        None => {
            let name = node.token_name.as_deref().unwrap_or("");
            let value = node.value.as_deref().unwrap_or("");
            out.push_str(&format!(
                "node [shape=record, label=\"{{<f0>line:{} | {{ <f1> {} | <f2> {}}}}}\"] {};\n",
                node.line,
                sanitize(name),
                sanitize(value),
                node.id
            ));
        }
    }

    if let Some(parent_id) = parent_id {
        out.push_str(&format!("{} -> {};\n", parent_id, node.id));
    }

    for child in node {
        append_node(out, child, Some(node.id));
    }
}

/// Escape the characters GraphViz record labels cannot carry raw. The
/// ampersand goes first so the entity forms themselves survive.
fn sanitize(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
