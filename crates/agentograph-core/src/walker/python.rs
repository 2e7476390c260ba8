//! Shared tree-sitter helpers for the Python-based walkers.
//!
//! Wraps a parsed module and exposes the two shapes every Python walker
//! needs: call sites with their keyword arguments, and class definitions
//! with their base classes. Values are recovered best-effort: string
//! literals are unquoted, everything else is captured as a symbolic
//! reference (variable name, `object.attribute`, or callee name).

use indexmap::IndexMap;
use tree_sitter::{Node, Parser, Tree};

/// One call site: `Agent(role="researcher", ...)`.
#[derive(Debug, Clone)]
pub struct PythonCall {
    /// Callee name: the identifier, or the attribute for method calls.
    pub name: String,
    /// Positional argument values, best-effort.
    pub args: Vec<String>,
    /// Keyword arguments in call order.
    pub kwargs: IndexMap<String, String>,
}

impl PythonCall {
    pub fn kwarg(&self, name: &str) -> Option<&str> {
        self.kwargs.get(name).map(String::as_str)
    }
}

/// A parsed Python module.
pub struct PythonSource {
    tree: Tree,
    content: String,
}

impl PythonSource {
    /// Parse source text. Returns `None` when the grammar cannot be loaded
    /// or the parser produces no tree; callers treat that as an empty
    /// module.
    pub fn parse(content: &str) -> Option<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .ok()?;
        let tree = parser.parse(content, None)?;
        Some(Self {
            tree,
            content: content.to_string(),
        })
    }

    /// All call sites in the module, in source order.
    pub fn calls(&self) -> Vec<PythonCall> {
        let mut calls = Vec::new();
        self.collect_calls(self.tree.root_node(), &mut calls);
        calls
    }

    /// All class definitions as (name, base classes).
    pub fn classes(&self) -> Vec<(String, Vec<String>)> {
        let mut classes = Vec::new();
        self.collect_classes(self.tree.root_node(), &mut classes);
        classes
    }

    /// The module docstring, when the first statement is a string.
    pub fn docstring(&self) -> Option<String> {
        let root = self.tree.root_node();
        let mut cursor = root.walk();
        let first = root.children(&mut cursor).next()?;
        if first.kind() != "expression_statement" {
            return None;
        }
        let mut stmt_cursor = first.walk();
        let string_node = first
            .children(&mut stmt_cursor)
            .find(|c| c.kind() == "string")?;
        Some(unquote_string(self.node_text(&string_node)).to_string())
    }

    fn node_text(&self, node: &Node) -> &str {
        &self.content[node.byte_range()]
    }

    fn collect_calls(&self, node: Node, calls: &mut Vec<PythonCall>) {
        if node.kind() == "call" {
            if let Some(call) = self.extract_call(&node) {
                calls.push(call);
            }
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.collect_calls(child, calls);
        }
    }

    fn extract_call(&self, node: &Node) -> Option<PythonCall> {
        let func = node.child_by_field_name("function")?;
        let name = match func.kind() {
            "identifier" => self.node_text(&func).to_string(),
            "attribute" => {
                let attr = func.child_by_field_name("attribute")?;
                self.node_text(&attr).to_string()
            }
            _ => return None,
        };

        let mut args = Vec::new();
        let mut kwargs = IndexMap::new();
        if let Some(arg_list) = node.child_by_field_name("arguments") {
            let mut cursor = arg_list.walk();
            for child in arg_list.children(&mut cursor) {
                match child.kind() {
                    "keyword_argument" => {
                        let (Some(key), Some(value)) = (
                            child.child_by_field_name("name"),
                            child.child_by_field_name("value"),
                        ) else {
                            continue;
                        };
                        kwargs.insert(
                            self.node_text(&key).to_string(),
                            self.value_text(&value),
                        );
                    }
                    "(" | ")" | "," | "comment" => {}
                    _ => args.push(self.value_text(&child)),
                }
            }
        }

        Some(PythonCall { name, args, kwargs })
    }

    fn collect_classes(&self, node: Node, classes: &mut Vec<(String, Vec<String>)>) {
        if node.kind() == "class_definition" {
            if let Some(name_node) = node.child_by_field_name("name") {
                let bases = node
                    .child_by_field_name("superclasses")
                    .map(|sc| {
                        let mut cursor = sc.walk();
                        sc.children(&mut cursor)
                            .filter(|c| c.kind() == "identifier" || c.kind() == "attribute")
                            .map(|c| self.node_text(&c).to_string())
                            .collect()
                    })
                    .unwrap_or_default();
                classes.push((self.node_text(&name_node).to_string(), bases));
            }
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.collect_classes(child, classes);
        }
    }

    /// Best-effort value recovery for an argument expression.
    pub fn value_text(&self, node: &Node) -> String {
        match node.kind() {
            "string" | "concatenated_string" => {
                unquote_string(self.node_text(node)).to_string()
            }
            "identifier" | "integer" | "float" | "true" | "false" | "none" => {
                self.node_text(node).to_string()
            }
            "attribute" => self.node_text(node).to_string(),
            "list" | "tuple" | "set" => {
                let mut cursor = node.walk();
                node.children(&mut cursor)
                    .filter(|c| !matches!(c.kind(), "[" | "]" | "(" | ")" | "{" | "}" | ","))
                    .map(|c| self.value_text(&c))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
            "call" => {
                // Symbolic reference to the callee, e.g. `SearchTool()`.
                node.child_by_field_name("function")
                    .map(|f| self.node_text(&f).to_string())
                    .unwrap_or_else(|| self.node_text(node).to_string())
            }
            _ => self.node_text(node).trim().to_string(),
        }
    }
}

/// Strip Python string prefixes and quoting.
fn unquote_string(raw: &str) -> &str {
    let stripped = raw.trim_start_matches(['r', 'b', 'f', 'u', 'R', 'B', 'F', 'U']);
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if stripped.starts_with(quote) && stripped.ends_with(quote) && stripped.len() >= 2 * quote.len()
        {
            return stripped[quote.len()..stripped.len() - quote.len()].trim();
        }
    }
    stripped
}
