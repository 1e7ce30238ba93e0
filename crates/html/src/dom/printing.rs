use core::fmt;

use super::{DOM, DOMNode, Namespace, NodeKind};
use indextree::NodeId;

use serde_json::{Map, Value, json};

// -----------------------
// Module-scope helpers
// -----------------------

fn namespace_prefix(namespace: Namespace) -> &'static str {
    match namespace {
        Namespace::Html => "",
        Namespace::Svg => "svg:",
        Namespace::MathMl => "math:",
    }
}

fn sorted_attrs(node: &DOMNode) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = node.attrs.iter().cloned().collect();
    pairs.sort_by(|left, right| left.0.cmp(&right.0));
    pairs
}

fn node_to_json(dom: &DOM, id: NodeId) -> Value {
    let Some(node) = dom.get(id) else {
        return Value::Null;
    };
    let children: Vec<Value> = dom
        .children(id)
        .map(|child| node_to_json(dom, child))
        .filter(|value| !value.is_null())
        .collect();
    match &node.kind {
        NodeKind::Document => json!({ "type": "document", "children": children }),
        NodeKind::Element {
            local_name,
            namespace,
        } => {
            let mut attrs_obj = Map::new();
            for (key, value) in sorted_attrs(node) {
                attrs_obj.insert(key, Value::String(value));
            }
            json!({
                "type": "element",
                "tag": format!("{}{}", namespace_prefix(*namespace), local_name.as_str()),
                "attrs": Value::Object(attrs_obj),
                "children": children,
            })
        }
        NodeKind::Text { text } => {
            if text.trim().is_empty() {
                Value::Null
            } else {
                json!({ "type": "text", "text": text })
            }
        }
    }
}

fn write_outline(dom: &DOM, id: NodeId, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };
    match &node.kind {
        NodeKind::Document => out.push_str("#document"),
        NodeKind::Element {
            local_name,
            namespace,
        } => {
            out.push_str(namespace_prefix(*namespace));
            out.push_str(local_name.as_str());
        }
        NodeKind::Text { .. } => out.push_str("#text"),
    }
    let mut children = dom.children(id).peekable();
    if children.peek().is_none() {
        return;
    }
    out.push('(');
    let mut first = true;
    for child in children {
        if !first {
            out.push(' ');
        }
        first = false;
        write_outline(dom, child, out);
    }
    out.push(')');
}

impl fmt::Debug for DOM {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Header
        writeln!(f, "DOM (generation {})", self.generation)?;

        fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
            for _ in 0..depth {
                f.write_str("  ")?;
            }
            Ok(())
        }

        fn escape_text(text: &str) -> String {
            let mut out = String::with_capacity(text.len());
            for ch in text.chars() {
                match ch {
                    '\\' => out.push_str("\\\\"),
                    '"' => out.push_str("\\\""),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    _ => out.push(ch),
                }
            }
            out
        }

        fn fmt_node(
            dom: &DOM,
            id: NodeId,
            f: &mut fmt::Formatter<'_>,
            depth: usize,
        ) -> fmt::Result {
            let Some(node) = dom.get(id) else {
                return Ok(());
            };
            match &node.kind {
                NodeKind::Document => {
                    write_indent(f, depth)?;
                    writeln!(f, "#document")?;
                }
                NodeKind::Element {
                    local_name,
                    namespace,
                } => {
                    write_indent(f, depth)?;
                    write!(f, "<{}{}", namespace_prefix(*namespace), local_name.as_str())?;
                    for (key, value) in sorted_attrs(node) {
                        write!(f, " {}=\"{}\"", key, escape_text(&value))?;
                    }
                    writeln!(f, ">")?;
                }
                NodeKind::Text { text } => {
                    // Skip pure-whitespace text nodes in the printer for cleaner output
                    if text.chars().all(char::is_whitespace) {
                        return Ok(());
                    }
                    write_indent(f, depth)?;
                    writeln!(f, "\"{}\"", escape_text(text))?;
                }
            }
            for child in dom.children(id) {
                fmt_node(dom, child, f, depth + 1)?;
            }
            Ok(())
        }

        fmt_node(self, self.root, f, 0)
    }
}

impl DOM {
    /// Build a deterministic JSON representation of the subtree at `id`.
    /// Schema:
    /// - Document: { "type":"document", "children":[ ... ] }
    /// - Element: { "type":"element", "tag": "tbody", "attrs": {..}, "children":[ ... ] }
    /// - Text: { "type":"text", "text":"..." }
    pub fn to_json_value(&self, id: NodeId) -> Value {
        node_to_json(self, id)
    }

    /// Pretty JSON string for snapshots and test comparisons.
    pub fn to_json_string(&self, id: NodeId) -> String {
        serde_json::to_string_pretty(&self.to_json_value(id)).unwrap_or_else(|_| String::from("{}"))
    }

    /// One-line structural summary, e.g. `table(caption thead(tr) tbody(tr tr))`.
    pub fn outline(&self, id: NodeId) -> String {
        let mut out = String::new();
        write_outline(self, id, &mut out);
        out
    }
}
