//! Resource graph model.
//!
//! The graph is the pipeline's only durable output: a prefix table plus a
//! map from namespaced resource identifiers to property maps. Both maps
//! preserve insertion order so serialized output diffs reproducibly.

mod builder;
mod turtle;

pub use builder::{build_graph, GraphBuilder};
pub use turtle::{parse_prefixes, serialize_turtle};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Property map of one resource. The `rdf:type` key is mandatory and
/// singular; other keys map to a literal or another resource identifier.
pub type PropertyMap = IndexMap<String, String>;

/// The namespace prefixes every graph starts from. Fixed at build time;
/// nothing is added at runtime.
pub fn default_prefixes() -> IndexMap<String, String> {
    let mut prefixes = IndexMap::new();
    for (name, uri) in [
        ("", "http://www.w3id.org/agentic-ai/onto#"),
        ("agento", "http://www.w3id.org/agentic-ai/onto#"),
        ("ex", "http://www.w3id.org/agentic-ai/instances#"),
        ("dcterms", "http://purl.org/dc/terms/"),
        ("xsd", "http://www.w3.org/2001/XMLSchema#"),
        ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
        ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
        ("owl", "http://www.w3.org/2002/07/owl#"),
    ] {
        prefixes.insert(name.to_string(), uri.to_string());
    }
    prefixes
}

/// Prefix table plus resource map, rebuilt from scratch per input artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceGraph {
    pub prefixes: IndexMap<String, String>,
    pub resources: IndexMap<String, PropertyMap>,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self {
            prefixes: default_prefixes(),
            resources: IndexMap::new(),
        }
    }

    /// Serialize to the line-oriented triple format.
    pub fn to_turtle(&self) -> String {
        serialize_turtle(self)
    }
}

impl Default for ResourceGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// The per-artifact output document: a graph, plus the failure description
/// when the artifact could not be processed. A failed document still
/// carries the default prefix table and an empty resource map, so batch
/// consumers always receive a well-formed graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(flatten)]
    pub graph: ResourceGraph,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GraphDocument {
    pub fn ok(graph: ResourceGraph) -> Self {
        Self { graph, error: None }
    }

    pub fn failed(description: impl Into<String>) -> Self {
        Self {
            graph: ResourceGraph::new(),
            error: Some(description.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix_order() {
        let prefixes = default_prefixes();
        let names: Vec<&str> = prefixes.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            ["", "agento", "ex", "dcterms", "xsd", "rdf", "rdfs", "owl"]
        );
    }

    #[test]
    fn test_failed_document_is_well_formed() {
        let doc = GraphDocument::failed("boom");
        assert!(doc.is_failed());
        assert!(doc.graph.resources.is_empty());
        assert_eq!(doc.graph.prefixes.len(), 8);
    }

    #[test]
    fn test_document_json_shape() {
        let doc = GraphDocument::ok(ResourceGraph::new());
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("prefixes").is_some());
        assert!(json.get("resources").is_some());
        assert!(json.get("error").is_none());
    }
}
