//! LangGraph normalizer.
//!
//! Graph patterns reduce to one workflow record plus a node record per
//! graph node entity.

use super::{display_title, slugify, NodeRecord, NormalizedPattern, WorkflowRecord};
use crate::pattern::PatternRecord;

pub fn normalize(record: &PatternRecord) -> NormalizedPattern {
    let title = display_title(record);
    let slug = slugify(&title);

    let workflows = vec![WorkflowRecord {
        id: format!("{slug}_workflow"),
        title: format!("{title} Graph"),
        description: record.description.clone(),
    }];

    let nodes = record
        .entities
        .iter()
        .filter(|e| e.vendor_class.to_lowercase().contains("node") || e.id.contains("node"))
        .map(|e| NodeRecord {
            id: e.id.clone(),
            node_name: e.attr_any(&["name"]).map(str::to_string),
            callable_label: e
                .attr_any(&["callable", "callableLabel"])
                .map(str::to_string),
        })
        .collect();

    NormalizedPattern::LangGraph { workflows, nodes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Entity;
    use indexmap::IndexMap;

    #[test]
    fn test_nodes_collected_with_callable_label() {
        let mut attributes = IndexMap::new();
        attributes.insert("name".to_string(), "research".to_string());
        attributes.insert("callable".to_string(), "run_research".to_string());
        let record = PatternRecord {
            framework: "LangGraph".to_string(),
            entities: vec![
                Entity {
                    id: "research_node".to_string(),
                    vendor_class: "Node".to_string(),
                    attributes,
                    ..Entity::default()
                },
                Entity {
                    id: "graph".to_string(),
                    vendor_class: "StateGraph".to_string(),
                    ..Entity::default()
                },
            ],
            ..PatternRecord::default()
        };
        let normalized = normalize(&record);
        let nodes = normalized.nodes();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, "research_node");
        assert_eq!(nodes[0].node_name.as_deref(), Some("research"));
        assert_eq!(nodes[0].callable_label.as_deref(), Some("run_research"));
        assert!(normalized.workflows()[0].title.ends_with("Graph"));
    }
}
