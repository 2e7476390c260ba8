//! AutoGen normalizer.
//!
//! AutoGen patterns pair an assistant agent with a user-proxy agent; both
//! are recognized by substring probes over the vendor class and entity id.
//! Exactly one workflow-pattern record is always emitted.

use super::{display_title, slugify, AgentRecord, NormalizedPattern, WorkflowRecord};
use crate::pattern::PatternRecord;

pub fn normalize(record: &PatternRecord) -> NormalizedPattern {
    let title = display_title(record);
    let slug = slugify(&title);

    let mut agents = Vec::new();
    for entity in &record.entities {
        let vc = entity.vendor_class.to_lowercase();
        let ent_id = if entity.id.is_empty() {
            entity.attr_any(&["name"]).unwrap_or("").to_string()
        } else {
            entity.id.clone()
        };

        if vc.contains("assistant") || ent_id.contains("assistant") {
            let agent_id = entity
                .attr_any(&["name"])
                .map(str::to_string)
                .or_else(|| (!ent_id.is_empty()).then(|| ent_id.clone()))
                .unwrap_or_else(|| format!("{slug}_assistant"));
            let system_message = entity
                .attr_any(&["system_message", "systemMessage", "system message"])
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!("You are a helpful AI assistant for {}", title.to_lowercase())
                });
            agents.push(AgentRecord {
                id: "assistant".to_string(),
                agent_id,
                role: "Assistant Agent".to_string(),
                title: format!("{title} Assistant"),
                description: system_message,
                ..AgentRecord::default()
            });
        } else if vc.contains("userproxy") || vc.contains("user proxy") || ent_id.contains("user") {
            let agent_id = entity
                .attr_any(&["name"])
                .map(str::to_string)
                .or_else(|| (!ent_id.is_empty()).then(|| ent_id.clone()))
                .unwrap_or_else(|| "user".to_string());
            let human_mode = entity
                .attr_any(&["human_input_mode", "humanInputMode", "human input mode"])
                .unwrap_or("NEVER");
            agents.push(AgentRecord {
                id: "userproxy".to_string(),
                agent_id,
                role: "User Proxy Agent".to_string(),
                title: "User Proxy".to_string(),
                description: format!("Human input proxy with {human_mode} mode"),
                ..AgentRecord::default()
            });
        }
    }

    let workflows = vec![WorkflowRecord {
        id: format!("{slug}_workflow"),
        title: format!("{title} Workflow"),
        description: record.description.clone(),
    }];

    NormalizedPattern::Autogen { agents, workflows }
}
