//! Triple-text serialization.
//!
//! Renders a [`ResourceGraph`] as a deterministic line-oriented document:
//! prefix declarations, a resource banner, then one block per resource in
//! insertion order. `rdf:type` renders as the `a` keyword; values that are
//! not namespace-qualified references are emitted as JSON string literals.

use indexmap::IndexMap;

use super::ResourceGraph;

const RESOURCE_BANNER: &str = "### ================================";

/// Serialize a graph to triple text.
pub fn serialize_turtle(graph: &ResourceGraph) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (prefix, uri) in &graph.prefixes {
        if prefix.is_empty() {
            lines.push(format!("@prefix : <{uri}> ."));
        } else {
            lines.push(format!("@prefix {prefix}: <{uri}> ."));
        }
    }
    lines.push(String::new());

    lines.push(RESOURCE_BANNER.to_string());
    lines.push("### Resources".to_string());
    lines.push(RESOURCE_BANNER.to_string());

    for (subject, properties) in &graph.resources {
        lines.push(format!("\n{subject}"));
        let predicates: Vec<String> = properties
            .iter()
            .map(|(predicate, object)| {
                if predicate == "rdf:type" {
                    format!("    a {object}")
                } else {
                    format!("    {predicate} {}", render_value(object))
                }
            })
            .collect();
        lines.push(predicates.join(" ;\n") + " .\n");
    }

    lines.join("\n")
}

/// A value containing a colon, no whitespace, and no scheme is treated as a
/// namespace-qualified reference and emitted bare; anything else becomes a
/// quoted string literal.
fn render_value(value: &str) -> String {
    if !value.starts_with("http") && value.contains(':') && !value.contains(' ') {
        value.to_string()
    } else {
        serde_json::Value::String(value.to_string()).to_string()
    }
}

/// Re-parse the prefix block of serialized triple text. Counterpart of the
/// prefix section of [`serialize_turtle`].
pub fn parse_prefixes(text: &str) -> IndexMap<String, String> {
    let mut prefixes = IndexMap::new();
    for line in text.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix("@prefix ") else {
            continue;
        };
        let Some((name_part, uri_part)) = rest.split_once('<') else {
            continue;
        };
        let Some(uri) = uri_part.trim_end().strip_suffix("> .") else {
            continue;
        };
        let Some(name) = name_part.trim().strip_suffix(':') else {
            continue;
        };
        prefixes.insert(name.to_string(), uri.to_string());
    }
    prefixes
}
