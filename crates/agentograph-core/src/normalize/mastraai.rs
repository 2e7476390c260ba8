//! MastraAI normalizer.
//!
//! Mastra patterns declare one deployed system plus instruction-driven
//! agents, each optionally configured by a language model.

use super::{slugify, unquote, AgentRecord, ModelRecord, NormalizedPattern, SystemRecord};
use crate::pattern::PatternRecord;

const DEFAULT_SYSTEM_NAME: &str = "MastraAI System";

pub fn normalize(record: &PatternRecord) -> NormalizedPattern {
    // The pattern entity names the system; fall back to document identity.
    let system_name = record
        .entities
        .iter()
        .filter(|e| e.id.starts_with("pattern"))
        .find_map(|e| e.attr_any(&["name"]))
        .map(str::to_string)
        .or_else(|| (!record.file_name.is_empty()).then(|| record.file_name.clone()))
        .or_else(|| (!record.description.is_empty()).then(|| record.description.clone()))
        .unwrap_or_else(|| DEFAULT_SYSTEM_NAME.to_string());
    let system_name = unquote(&system_name).to_string();
    let system_name = if system_name.is_empty() {
        DEFAULT_SYSTEM_NAME.to_string()
    } else {
        system_name
    };

    let system = SystemRecord {
        id: slugify(&system_name),
        declared_type: "agento:System".to_string(),
        title: system_name,
        description: record.description.clone(),
        agents: Vec::new(),
    };

    let mut agents = Vec::new();
    let mut models = Vec::new();

    for entity in &record.entities {
        let has_agent_shape = ["role", "instructions", "model", "name"]
            .iter()
            .any(|k| entity.attributes.contains_key(*k));
        if !has_agent_shape || entity.id == "pattern" {
            continue;
        }

        let raw_name = entity.attr_any(&["name"]).unwrap_or(&entity.id);
        let agent_id = slugify(unquote(raw_name));

        let mut agent = AgentRecord {
            id: agent_id.clone(),
            agent_id: entity
                .attr_any(&["name"])
                .unwrap_or(&agent_id)
                .to_string(),
            role: entity.attr_any(&["role"]).unwrap_or("").to_string(),
            description: entity.attr_any(&["instructions"]).unwrap_or("").to_string(),
            part_of_system: Some(system.id.clone()),
            ..AgentRecord::default()
        };

        if let Some(model_name) = entity.attr_any(&["model"]) {
            let model_id = format!("llm_{}", slugify(model_name));
            models.push(ModelRecord {
                id: model_id.clone(),
                model_name: model_name.to_string(),
            });
            agent.configured_by = Some(model_id);
        }

        agents.push(agent);
    }

    NormalizedPattern::MastraAi {
        systems: vec![system],
        agents,
        models,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Entity;
    use indexmap::IndexMap;

    fn entity(id: &str, attrs: &[(&str, &str)]) -> Entity {
        let mut attributes = IndexMap::new();
        for (k, v) in attrs {
            attributes.insert(k.to_string(), v.to_string());
        }
        Entity {
            id: id.to_string(),
            attributes,
            ..Entity::default()
        }
    }

    #[test]
    fn test_pattern_entity_names_the_system() {
        let record = PatternRecord {
            framework: "MastraAI".to_string(),
            entities: vec![
                entity("pattern", &[("name", "Weather Assistant")]),
                entity(
                    "weather_agent",
                    &[
                        ("name", "weather_agent"),
                        ("role", "Forecaster"),
                        ("instructions", "Answer weather questions"),
                        ("model", "gpt-4o-mini"),
                    ],
                ),
            ],
            ..PatternRecord::default()
        };
        let normalized = normalize(&record);
        let systems = normalized.systems();
        assert_eq!(systems.len(), 1);
        assert_eq!(systems[0].id, "weather_assistant");
        assert_eq!(systems[0].title, "Weather Assistant");

        let agents = normalized.agents();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].id, "weather_agent");
        assert_eq!(agents[0].role, "Forecaster");
        assert_eq!(agents[0].description, "Answer weather questions");
        assert_eq!(agents[0].part_of_system.as_deref(), Some("weather_assistant"));
        assert_eq!(agents[0].configured_by.as_deref(), Some("llm_gpt-4o-mini"));

        let models = normalized.models();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "llm_gpt-4o-mini");
        assert_eq!(models[0].model_name, "gpt-4o-mini");
    }

    #[test]
    fn test_system_name_falls_back_to_file_name() {
        let record = PatternRecord {
            file_name: "weather-agent.ts".to_string(),
            ..PatternRecord::default()
        };
        let normalized = normalize(&record);
        assert_eq!(normalized.systems()[0].title, "weather-agent.ts");
    }

    #[test]
    fn test_default_system_name() {
        let normalized = normalize(&PatternRecord::default());
        assert_eq!(normalized.systems()[0].title, DEFAULT_SYSTEM_NAME);
        assert_eq!(normalized.systems()[0].id, "mastraai_system");
    }
}
