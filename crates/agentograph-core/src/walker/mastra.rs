//! MastraAI source walker.
//!
//! Mastra patterns come in two surfaces: TypeScript modules constructing
//! `new Agent({...})`, and JSON/YAML config files declaring `agents` /
//! `workflows` lists. Both reduce to the same entity vocabulary.

use indexmap::IndexMap;
use tree_sitter::{Node, Parser};

use super::SourceWalker;
use crate::classify::Framework;
use crate::normalize::slugify;
use crate::pattern::{Entity, OntologyClass, PatternRecord};

pub struct MastraWalker;

impl SourceWalker for MastraWalker {
    fn framework(&self) -> Framework {
        Framework::MastraAi
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["ts", "tsx", "js", "json", "yaml", "yml"]
    }

    fn walk(&self, file_name: &str, content: &str) -> PatternRecord {
        let mut record = PatternRecord {
            framework: "MastraAI".to_string(),
            file_name: file_name.to_string(),
            ..PatternRecord::default()
        };

        let extension = file_name.rsplit('.').next().unwrap_or("").to_lowercase();
        match extension.as_str() {
            "json" => {
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(content) {
                    walk_config(&value, &mut record);
                }
            }
            "yaml" | "yml" => {
                if let Ok(value) = serde_yaml::from_str::<serde_json::Value>(content) {
                    walk_config(&value, &mut record);
                }
            }
            _ => walk_typescript(content, &mut record),
        }

        record
    }
}

// =============================================================================
// TYPESCRIPT SURFACE
// =============================================================================

fn walk_typescript(content: &str, record: &mut PatternRecord) {
    let mut parser = Parser::new();
    if parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .is_err()
    {
        return;
    }
    let Some(tree) = parser.parse(content, None) else {
        return;
    };
    collect_agent_constructions(tree.root_node(), content, record);
}

fn collect_agent_constructions(node: Node, content: &str, record: &mut PatternRecord) {
    if node.kind() == "new_expression" {
        let constructor = node
            .child_by_field_name("constructor")
            .map(|c| node_text(&c, content))
            .unwrap_or_default();
        if constructor.contains("Agent") {
            if let Some(attributes) = first_object_argument(&node, content) {
                let name = attributes.get("name").cloned().unwrap_or_default();
                record.entities.push(Entity {
                    id: if name.is_empty() {
                        "agent".to_string()
                    } else {
                        slugify(&name)
                    },
                    vendor_class: constructor.to_string(),
                    maps_to: Some(OntologyClass::Agent),
                    attributes,
                    note: String::new(),
                });
            }
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_agent_constructions(child, content, record);
    }
}

fn first_object_argument(
    node: &Node,
    content: &str,
) -> Option<IndexMap<String, String>> {
    let arguments = node.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    let object = arguments
        .children(&mut cursor)
        .find(|c| c.kind() == "object")?;

    let mut attributes = IndexMap::new();
    let mut obj_cursor = object.walk();
    for pair in object.children(&mut obj_cursor) {
        if pair.kind() != "pair" {
            continue;
        }
        let (Some(key), Some(value)) = (
            pair.child_by_field_name("key"),
            pair.child_by_field_name("value"),
        ) else {
            continue;
        };
        attributes.insert(
            unquote_ts(node_text(&key, content)).to_string(),
            ts_value_text(&value, content),
        );
    }
    Some(attributes)
}

/// Best-effort value recovery for a TypeScript expression.
fn ts_value_text(node: &Node, content: &str) -> String {
    match node.kind() {
        "string" | "template_string" => unquote_ts(node_text(node, content)).to_string(),
        // `openai("gpt-4o-mini")` resolves to its string argument.
        "call_expression" => {
            if let Some(arguments) = node.child_by_field_name("arguments") {
                let mut cursor = arguments.walk();
                let string_arg = arguments
                    .children(&mut cursor)
                    .find(|c| c.kind() == "string");
                if let Some(string_arg) = string_arg {
                    return unquote_ts(node_text(&string_arg, content)).to_string();
                }
            }
            node.child_by_field_name("function")
                .map(|f| node_text(&f, content).to_string())
                .unwrap_or_else(|| node_text(node, content).to_string())
        }
        _ => node_text(node, content).trim().to_string(),
    }
}

fn node_text<'a>(node: &Node, content: &'a str) -> &'a str {
    &content[node.byte_range()]
}

fn unquote_ts(raw: &str) -> &str {
    raw.trim_matches(['"', '\'', '`'])
}

// =============================================================================
// CONFIG SURFACE (JSON/YAML)
// =============================================================================

fn walk_config(value: &serde_json::Value, record: &mut PatternRecord) {
    if let Some(description) = value.get("description").and_then(|v| v.as_str()) {
        record.description = description.to_string();
    }

    // A named config declares the deployed pattern itself.
    if let Some(name) = value.get("name").and_then(|v| v.as_str()) {
        let mut attributes = IndexMap::new();
        attributes.insert("name".to_string(), name.to_string());
        record.entities.push(Entity {
            id: "pattern".to_string(),
            vendor_class: "Pattern".to_string(),
            maps_to: None,
            attributes,
            note: String::new(),
        });
    }

    for agent in list_of(value, "agents") {
        let mut attributes = IndexMap::new();
        for key in ["name", "role", "instructions", "model", "description"] {
            if let Some(v) = agent.get(key).and_then(|v| v.as_str()) {
                attributes.insert(key.to_string(), v.to_string());
            }
        }
        if attributes.is_empty() {
            continue;
        }
        let name = attributes.get("name").cloned().unwrap_or_default();
        record.entities.push(Entity {
            id: if name.is_empty() {
                "agent".to_string()
            } else {
                slugify(&name)
            },
            vendor_class: "Agent".to_string(),
            maps_to: Some(OntologyClass::Agent),
            attributes,
            note: String::new(),
        });
    }

    for workflow in list_of(value, "workflows") {
        let mut attributes = IndexMap::new();
        for key in ["name", "description"] {
            if let Some(v) = workflow.get(key).and_then(|v| v.as_str()) {
                attributes.insert(key.to_string(), v.to_string());
            }
        }
        if attributes.is_empty() {
            continue;
        }
        let name = attributes.get("name").cloned().unwrap_or_default();
        record.entities.push(Entity {
            id: if name.is_empty() {
                "workflow".to_string()
            } else {
                slugify(&name)
            },
            vendor_class: "Workflow".to_string(),
            maps_to: Some(OntologyClass::Workflow),
            attributes,
            note: String::new(),
        });
    }
}

fn list_of<'a>(value: &'a serde_json::Value, key: &str) -> &'a [serde_json::Value] {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEATHER_AGENT_TS: &str = r#"
import { Agent } from "@mastra/core/agent";
import { openai } from "@ai-sdk/openai";

export const weatherAgent = new Agent({
  name: "Weather Agent",
  instructions: "You provide accurate weather information.",
  model: openai("gpt-4o-mini"),
});
"#;

    #[test]
    fn test_new_agent_object_literal() {
        let record = MastraWalker.walk("weather-agent.ts", WEATHER_AGENT_TS);
        assert_eq!(record.entities.len(), 1);
        let agent = &record.entities[0];
        assert_eq!(agent.id, "weather_agent");
        assert_eq!(agent.attr_any(&["name"]), Some("Weather Agent"));
        assert_eq!(
            agent.attr_any(&["instructions"]),
            Some("You provide accurate weather information.")
        );
        assert_eq!(agent.attr_any(&["model"]), Some("gpt-4o-mini"));
    }

    #[test]
    fn test_json_config() {
        let config = r#"{
            "name": "Support Bot",
            "description": "Answers support tickets.",
            "agents": [
                {"name": "triage", "role": "Triage", "instructions": "Sort tickets", "model": "gpt-4o"}
            ],
            "workflows": [
                {"name": "ticket_flow", "description": "Ticket handling"}
            ]
        }"#;
        let record = MastraWalker.walk("support.json", config);
        assert_eq!(record.description, "Answers support tickets.");
        assert_eq!(record.entities[0].id, "pattern");
        assert_eq!(record.entities[0].attr_any(&["name"]), Some("Support Bot"));
        let agent = record
            .entities
            .iter()
            .find(|e| e.vendor_class == "Agent")
            .unwrap();
        assert_eq!(agent.attr_any(&["model"]), Some("gpt-4o"));
        assert!(record.entities.iter().any(|e| e.vendor_class == "Workflow"));
    }

    #[test]
    fn test_yaml_config() {
        let config = "name: Weather Service\nagents:\n  - name: forecaster\n    role: Forecaster\n";
        let record = MastraWalker.walk("weather.yaml", config);
        assert_eq!(record.entities[0].attr_any(&["name"]), Some("Weather Service"));
        let agent = record
            .entities
            .iter()
            .find(|e| e.vendor_class == "Agent")
            .unwrap();
        assert_eq!(agent.id, "forecaster");
    }

    #[test]
    fn test_invalid_json_yields_empty_record() {
        let record = MastraWalker.walk("broken.json", "{nope");
        assert!(record.entities.is_empty());
    }
}
