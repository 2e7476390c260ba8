//! Per-framework normalizers.
//!
//! Each normalizer is a pure function from a parsed [`PatternRecord`] to a
//! [`NormalizedPattern`] variant: the common intermediate representation
//! (agents, systems, workflows, nodes, models) the graph builder consumes.
//! Adding a framework means adding a variant and a normalizer function, not
//! extending conditional chains.

mod autogen;
mod crewai;
mod langgraph;
mod mastraai;

use serde::{Deserialize, Serialize};

use crate::classify::Framework;
use crate::pattern::{Entity, PatternRecord};

// =============================================================================
// INTERMEDIATE RECORDS
// =============================================================================

/// An agent in the common intermediate representation.
///
/// Empty string fields are omitted from the emitted resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Resource identifier seed (pre-sanitization).
    pub id: String,
    /// Declared agent identifier (the ontology `agentID` literal).
    pub agent_id: String,
    /// Role label, e.g. "Assistant Agent".
    pub role: String,
    /// Display title.
    pub title: String,
    /// Free-text description (system message, instructions, ...).
    pub description: String,
    /// Identifier of the containing system, when declared.
    pub part_of_system: Option<String>,
    /// Identifier of the language-model resource configuring this agent.
    pub configured_by: Option<String>,
}

/// A system (crew, flow, deployed pattern) grouping agents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemRecord {
    pub id: String,
    /// Declared ontology type string; decides System vs Workflow typing.
    pub declared_type: String,
    pub title: String,
    pub description: String,
    /// Nested agent identifiers, backfilled as plain agents by the builder.
    pub agents: Vec<String>,
}

/// A workflow pattern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowRecord {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// A graph node (LangGraph).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub node_name: Option<String>,
    pub callable_label: Option<String>,
}

/// A language model an agent is configured by (MastraAI).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelRecord {
    pub id: String,
    pub model_name: String,
}

// =============================================================================
// NORMALIZED PATTERN
// =============================================================================

/// The common intermediate representation, tagged by framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "framework", rename_all = "lowercase")]
pub enum NormalizedPattern {
    Autogen {
        agents: Vec<AgentRecord>,
        workflows: Vec<WorkflowRecord>,
    },
    #[serde(rename = "crewai")]
    CrewAi {
        systems: Vec<SystemRecord>,
        agents: Vec<AgentRecord>,
        workflows: Vec<WorkflowRecord>,
    },
    #[serde(rename = "langgraph")]
    LangGraph {
        workflows: Vec<WorkflowRecord>,
        nodes: Vec<NodeRecord>,
    },
    #[serde(rename = "mastraai")]
    MastraAi {
        systems: Vec<SystemRecord>,
        agents: Vec<AgentRecord>,
        models: Vec<ModelRecord>,
    },
    /// Passthrough for unclassifiable input: the raw entity list and
    /// description, without framework-specific shaping.
    Unknown {
        entities: Vec<Entity>,
        description: String,
    },
}

impl NormalizedPattern {
    pub fn agents(&self) -> &[AgentRecord] {
        match self {
            Self::Autogen { agents, .. }
            | Self::CrewAi { agents, .. }
            | Self::MastraAi { agents, .. } => agents,
            _ => &[],
        }
    }

    pub fn systems(&self) -> &[SystemRecord] {
        match self {
            Self::CrewAi { systems, .. } | Self::MastraAi { systems, .. } => systems,
            _ => &[],
        }
    }

    pub fn workflows(&self) -> &[WorkflowRecord] {
        match self {
            Self::Autogen { workflows, .. }
            | Self::CrewAi { workflows, .. }
            | Self::LangGraph { workflows, .. } => workflows,
            _ => &[],
        }
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        match self {
            Self::LangGraph { nodes, .. } => nodes,
            _ => &[],
        }
    }

    pub fn models(&self) -> &[ModelRecord] {
        match self {
            Self::MastraAi { models, .. } => models,
            _ => &[],
        }
    }
}

/// Dispatch a record to the normalizer for its framework.
pub fn normalize(framework: Framework, record: &PatternRecord) -> NormalizedPattern {
    match framework {
        Framework::Autogen => autogen::normalize(record),
        Framework::CrewAi => crewai::normalize(record),
        Framework::LangGraph => langgraph::normalize(record),
        Framework::MastraAi => mastraai::normalize(record),
        Framework::Unknown => NormalizedPattern::Unknown {
            entities: record.entities.clone(),
            description: record.description.clone(),
        },
    }
}

// =============================================================================
// TITLE DERIVATION
// =============================================================================

/// Derive the document's display title, by priority: an entity attribute
/// named `name`, the humanized file name, the pattern type, the first
/// sentence of the description, the literal `Unknown`.
pub fn display_title(record: &PatternRecord) -> String {
    for entity in &record.entities {
        if let Some(name) = entity.attr_any(&["name"]) {
            return unquote(name).to_string();
        }
    }
    if !record.file_name.is_empty() {
        let base = file_stem(&record.file_name);
        if !base.is_empty() {
            return humanize(&base);
        }
    }
    if !record.pattern_type.is_empty() {
        return record.pattern_type.clone();
    }
    if !record.description.is_empty() {
        return record
            .description
            .split('.')
            .next()
            .unwrap_or("")
            .trim()
            .to_string();
    }
    "Unknown".to_string()
}

/// Lowercase, spaces to underscores. Seeds every auto-generated identifier
/// for a document.
pub fn slugify(title: &str) -> String {
    title.trim().to_lowercase().replace(' ', "_")
}

/// Strip surrounding straight or typographic double quotes.
pub(crate) fn unquote(value: &str) -> &str {
    value
        .trim()
        .trim_matches('"')
        .trim_matches(|c| c == '\u{201C}' || c == '\u{201D}')
}

fn file_stem(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => base.to_string(),
    }
}

/// "chess_game" -> "Chess Game".
fn humanize(stem: &str) -> String {
    stem.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
