//! LangGraph source walker.
//!
//! Recognizes `StateGraph(...)` construction, `add_node(name, callable)`
//! registrations and tool constructor calls.

use indexmap::IndexMap;

use super::python::PythonSource;
use super::SourceWalker;
use crate::classify::Framework;
use crate::normalize::slugify;
use crate::pattern::{Entity, PatternRecord};

pub struct LangGraphWalker;

impl SourceWalker for LangGraphWalker {
    fn framework(&self) -> Framework {
        Framework::LangGraph
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn walk(&self, file_name: &str, content: &str) -> PatternRecord {
        let mut record = PatternRecord {
            framework: "LangGraph".to_string(),
            file_name: file_name.to_string(),
            ..PatternRecord::default()
        };
        let Some(source) = PythonSource::parse(content) else {
            return record;
        };
        record.description = source.docstring().unwrap_or_default();

        for call in source.calls() {
            match call.name.as_str() {
                "StateGraph" => {
                    let mut attributes = IndexMap::new();
                    if let Some(state) = call.args.first() {
                        attributes.insert("state".to_string(), state.clone());
                    }
                    record.entities.push(Entity {
                        id: "graph".to_string(),
                        vendor_class: "StateGraph".to_string(),
                        maps_to: None,
                        attributes,
                        note: String::new(),
                    });
                }
                "add_node" => {
                    let Some(name) = call
                        .kwarg("node")
                        .map(str::to_string)
                        .or_else(|| call.args.first().cloned())
                    else {
                        continue;
                    };
                    let mut attributes = IndexMap::new();
                    attributes.insert("name".to_string(), name.clone());
                    if let Some(callable) = call.args.get(1) {
                        attributes.insert("callable".to_string(), callable.clone());
                    }
                    record.entities.push(Entity {
                        id: format!("{}_node", slugify(&name)),
                        vendor_class: "Node".to_string(),
                        maps_to: None,
                        attributes,
                        note: String::new(),
                    });
                }
                name if name.contains("Tool") => {
                    let mut attributes = IndexMap::new();
                    attributes.insert(
                        "name".to_string(),
                        call.kwarg("name").unwrap_or(name).to_string(),
                    );
                    if let Some(description) = call.kwarg("description") {
                        attributes.insert("description".to_string(), description.to_string());
                    }
                    record.entities.push(Entity {
                        id: slugify(call.kwarg("name").unwrap_or(name)),
                        vendor_class: call.name.clone(),
                        maps_to: None,
                        attributes,
                        note: String::new(),
                    });
                }
                _ => {}
            }
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESEARCH_GRAPH: &str = r#"
"""A two-step research graph."""
from langgraph.graph import StateGraph

graph = StateGraph(ResearchState)
graph.add_node("research", run_research)
graph.add_node("summarize", summarize)
graph.add_edge("research", "summarize")
"#;

    #[test]
    fn test_graph_and_nodes_extracted() {
        let record = LangGraphWalker.walk("research_graph.py", RESEARCH_GRAPH);
        assert_eq!(record.framework, "LangGraph");

        let graph = record
            .entities
            .iter()
            .find(|e| e.vendor_class == "StateGraph")
            .unwrap();
        assert_eq!(graph.attr_any(&["state"]), Some("ResearchState"));

        let nodes: Vec<_> = record
            .entities
            .iter()
            .filter(|e| e.vendor_class == "Node")
            .collect();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id, "research_node");
        assert_eq!(nodes[0].attr_any(&["callable"]), Some("run_research"));
        assert_eq!(nodes[1].attr_any(&["name"]), Some("summarize"));
    }
}
