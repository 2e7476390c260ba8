//! CrewAI source walker.
//!
//! Recognizes `Agent(...)`, `Task(...)` and `Crew(...)` constructor calls
//! plus `class X(Flow)` definitions, mirroring the attribute vocabulary of
//! the analysis-document path.

use indexmap::IndexMap;

use super::python::PythonSource;
use super::SourceWalker;
use crate::classify::Framework;
use crate::normalize::slugify;
use crate::pattern::{Entity, OntologyClass, PatternRecord};

pub struct CrewAiWalker;

impl SourceWalker for CrewAiWalker {
    fn framework(&self) -> Framework {
        Framework::CrewAi
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn walk(&self, file_name: &str, content: &str) -> PatternRecord {
        let mut record = PatternRecord {
            framework: "CrewAI".to_string(),
            file_name: file_name.to_string(),
            ..PatternRecord::default()
        };
        let Some(source) = PythonSource::parse(content) else {
            return record;
        };
        record.description = source.docstring().unwrap_or_default();

        let mut task_count = 0usize;
        for call in source.calls() {
            match call.name.as_str() {
                "Agent" => {
                    let mut attributes = IndexMap::new();
                    // Role doubles as the agent's name.
                    if let Some(role) = call.kwarg("role") {
                        attributes.insert("name".to_string(), role.to_string());
                        attributes.insert("role".to_string(), role.to_string());
                    }
                    for key in ["goal", "backstory", "tools", "llm"] {
                        if let Some(value) = call.kwarg(key) {
                            attributes.insert(key.to_string(), value.to_string());
                        }
                    }
                    let id = call
                        .kwarg("role")
                        .map(slugify)
                        .unwrap_or_else(|| "agent".to_string());
                    record.entities.push(Entity {
                        id,
                        vendor_class: "Agent".to_string(),
                        maps_to: Some(OntologyClass::Agent),
                        attributes,
                        note: String::new(),
                    });
                }
                "Task" => {
                    task_count += 1;
                    let mut attributes = IndexMap::new();
                    for key in ["description", "expected_output", "agent"] {
                        if let Some(value) = call.kwarg(key) {
                            attributes.insert(key.to_string(), value.to_string());
                        }
                    }
                    record.entities.push(Entity {
                        id: format!("task_{task_count}"),
                        vendor_class: "Task".to_string(),
                        maps_to: Some(OntologyClass::Task),
                        attributes,
                        note: String::new(),
                    });
                }
                "Crew" => {
                    let mut attributes = IndexMap::new();
                    attributes.insert("name".to_string(), "Crew".to_string());
                    for key in ["agents", "tasks", "process"] {
                        if let Some(value) = call.kwarg(key) {
                            attributes.insert(key.to_string(), value.to_string());
                        }
                    }
                    record.entities.push(Entity {
                        id: "crew".to_string(),
                        vendor_class: "Crew".to_string(),
                        maps_to: None,
                        attributes,
                        note: String::new(),
                    });
                }
                _ => {}
            }
        }

        // Flow subclasses declare the pattern's workflow container.
        for (class_name, bases) in source.classes() {
            if bases.iter().any(|b| b.contains("Flow")) {
                let mut attributes = IndexMap::new();
                attributes.insert("name".to_string(), class_name.clone());
                record.entities.push(Entity {
                    id: slugify(&class_name),
                    vendor_class: "Flow".to_string(),
                    maps_to: Some(OntologyClass::Workflow),
                    attributes,
                    note: String::new(),
                });
            }
        }

        record
    }
}
