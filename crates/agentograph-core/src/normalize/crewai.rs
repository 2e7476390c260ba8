//! CrewAI normalizer.
//!
//! Flow and crew entities become systems; an entity listing its crew
//! members as a comma-separated attribute is expanded into one agent
//! record per member.

use super::{display_title, slugify, AgentRecord, NormalizedPattern, SystemRecord, WorkflowRecord};
use crate::pattern::PatternRecord;

pub fn normalize(record: &PatternRecord) -> NormalizedPattern {
    let title = display_title(record);
    let slug = slugify(&title);

    let workflows = vec![WorkflowRecord {
        id: format!("{slug}_workflow"),
        title: format!("{title} Flow"),
        description: record.description.clone(),
    }];

    let mut systems = Vec::new();
    let mut agents = Vec::new();

    for entity in &record.entities {
        let vc = entity.vendor_class.to_lowercase();
        let name_attr = entity.attr_any(&["name"]).unwrap_or("");

        if vc.contains("flow") || entity.id.contains("flow") {
            systems.push(SystemRecord {
                id: non_empty_or(&entity.id, &non_empty_or(name_attr, "flow_system")),
                declared_type: "agento:System".to_string(),
                title: non_empty_or(name_attr, &entity.id),
                ..SystemRecord::default()
            });
        }
        if vc.contains("crew")
            || vc.contains("system")
            || entity.id.contains("crew")
            || name_attr.contains("crew")
        {
            systems.push(SystemRecord {
                id: non_empty_or(&entity.id, name_attr),
                declared_type: "agento:System".to_string(),
                title: non_empty_or(name_attr, &entity.id),
                ..SystemRecord::default()
            });
        }

        // Member expansion: "blog_researcher, blog_writer" becomes two
        // agent records.
        let members = entity
            .attr_any(&["agents"])
            .or_else(|| (!vc.contains("crew")).then_some(name_attr).filter(|v| !v.is_empty()));
        if let Some(members) = members {
            if members.contains(',') {
                for member in members.split(',').map(str::trim).filter(|m| !m.is_empty()) {
                    agents.push(AgentRecord {
                        id: member.to_string(),
                        agent_id: member.to_string(),
                        role: "Crew Agent".to_string(),
                        title: member.to_string(),
                        ..AgentRecord::default()
                    });
                }
            }
        }
    }

    NormalizedPattern::CrewAi {
        systems,
        agents,
        workflows,
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
