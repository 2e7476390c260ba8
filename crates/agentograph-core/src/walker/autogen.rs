//! AutoGen source walker.
//!
//! Recognizes agent constructor calls (`AssistantAgent(...)`,
//! `UserProxyAgent(...)`, any `*Agent(...)`) and reads the keyword
//! arguments the normalizer understands.

use indexmap::IndexMap;

use super::python::PythonSource;
use super::SourceWalker;
use crate::classify::Framework;
use crate::normalize::slugify;
use crate::pattern::{Entity, OntologyClass, PatternRecord};

pub struct AutogenWalker;

impl SourceWalker for AutogenWalker {
    fn framework(&self) -> Framework {
        Framework::Autogen
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn walk(&self, file_name: &str, content: &str) -> PatternRecord {
        let mut record = PatternRecord {
            framework: "AutoGen".to_string(),
            file_name: file_name.to_string(),
            ..PatternRecord::default()
        };
        let Some(source) = PythonSource::parse(content) else {
            return record;
        };
        record.description = source.docstring().unwrap_or_default();

        for call in source.calls() {
            if !call.name.contains("Agent") {
                continue;
            }
            let mut attributes = IndexMap::new();
            for key in ["name", "system_message", "human_input_mode"] {
                if let Some(value) = call.kwarg(key) {
                    attributes.insert(key.to_string(), value.to_string());
                }
            }
            let id = call
                .kwarg("name")
                .map(slugify)
                .unwrap_or_else(|| call.name.to_lowercase());
            record.entities.push(Entity {
                id,
                maps_to: OntologyClass::from_vendor_class(&call.name),
                vendor_class: call.name,
                attributes,
                note: String::new(),
            });
        }

        record
    }
}
