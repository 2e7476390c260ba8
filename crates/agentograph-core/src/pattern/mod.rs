//! Pattern record types.
//!
//! A [`PatternRecord`] is the structured form of one analyzed agentic-AI
//! pattern, independent of whether it came from a free-text analysis
//! document or from walking program source. It is created once per input
//! artifact, is immutable after parsing, and is consumed by exactly one
//! normalizer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// =============================================================================
// PATTERN RECORD
// =============================================================================

/// One analyzed pattern: identity block plus extracted tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternRecord {
    /// Declared framework name (e.g. "AutoGen"), may be empty.
    pub framework: String,

    /// Declared source file name (e.g. "chess_game.py"), may be empty.
    pub file_name: String,

    /// Declared pattern type (e.g. "Two-Agent Chat"), may be empty.
    pub pattern_type: String,

    /// Free-text description of the pattern.
    pub description: String,

    /// Rows of the structure-analysis table.
    pub entities: Vec<Entity>,

    /// Rows of the relational-property table.
    pub relational_properties: Vec<RelationalProperty>,

    /// Declared ontology extensions (new classes / properties).
    pub adjustments: OntologyAdjustments,
}

// =============================================================================
// ENTITY
// =============================================================================

/// One row of the structure-analysis table: a vendor-framework construct
/// (agent, crew, flow, node) with its example attribute values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entity {
    /// Lower-snake identifier derived from the display name.
    pub id: String,

    /// Framework-specific construct name (e.g. "AssistantAgent").
    pub vendor_class: String,

    /// Base ontology class this construct maps onto, if any.
    pub maps_to: Option<OntologyClass>,

    /// Attribute name -> example value, in table order.
    ///
    /// Keys are unique; on duplicate attribute names the last pairing wins.
    /// Unknown keys are pass-through data, not a schema violation.
    pub attributes: IndexMap<String, String>,

    /// Free-text note cell.
    pub note: String,
}

impl Entity {
    /// Look up an attribute, trying each of the given spelling variants.
    pub fn attr_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|k| self.attributes.get(*k).map(String::as_str))
            .filter(|v| !v.is_empty())
    }

    /// True when the vendor class or the id contains the needle
    /// (case-insensitive). The standard classification probe.
    pub fn mentions(&self, needle: &str) -> bool {
        self.vendor_class.to_lowercase().contains(needle) || self.id.to_lowercase().contains(needle)
    }
}

/// Base ontology classes an entity row can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum OntologyClass {
    Agent,
    Task,
    Workflow,
}

impl OntologyClass {
    /// Substring heuristic over the vendor class name.
    pub fn from_vendor_class(vendor_class: &str) -> Option<Self> {
        let lower = vendor_class.to_lowercase();
        if vendor_class.contains("Agent") || lower.contains("agent") {
            Some(Self::Agent)
        } else if vendor_class.contains("Task") {
            Some(Self::Task)
        } else if vendor_class.contains("Flow") || lower.contains("workflow") {
            Some(Self::Workflow)
        } else {
            None
        }
    }

    /// Namespace-qualified name (e.g. "agento:Agent").
    pub fn as_curie(&self) -> &'static str {
        match self {
            Self::Agent => "agento:Agent",
            Self::Task => "agento:Task",
            Self::Workflow => "agento:Workflow",
        }
    }
}

// =============================================================================
// RELATIONAL PROPERTY
// =============================================================================

/// One row of the relational-property table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationalProperty {
    /// Property name (e.g. "hasAgentMember").
    pub name: String,

    /// Domain class parsed from the "domain -> range" cell.
    pub domain: String,

    /// Range class; empty when the cell had no arrow.
    pub range: String,

    /// Free-text definition.
    pub definition: String,

    /// Usage status of the property within this pattern.
    pub status: PropertyStatus,
}

/// Normalized usage status of a declared property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Suggested,
    Optional,
    NotUsed,
    #[default]
    Used,
    /// Any status string outside the recognized vocabulary.
    Other(String),
}

impl PropertyStatus {
    /// Normalize a raw status cell. The original corpus mixes English and
    /// Indonesian status words.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        match lower.as_str() {
            "suggested" | "disarankan" => Self::Suggested,
            "optional" | "opsional" => Self::Optional,
            "not_used" | "tidak muncul" => Self::NotUsed,
            "used" | "" => Self::Used,
            _ => Self::Other(lower),
        }
    }
}

// =============================================================================
// ONTOLOGY ADJUSTMENTS
// =============================================================================

/// Declared ontology extensions: terms not present in the base ontology
/// that the analysis wants merged into the resource graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OntologyAdjustments {
    /// New classes to declare.
    pub new_classes: Vec<NewClass>,

    /// New datatype properties.
    pub datatype_properties: Vec<DeclaredProperty>,

    /// Optional (non-mandatory) properties.
    pub optional_properties: Vec<DeclaredProperty>,
}

impl OntologyAdjustments {
    /// True when no extensions were declared.
    pub fn is_empty(&self) -> bool {
        self.new_classes.is_empty()
            && self.datatype_properties.is_empty()
            && self.optional_properties.is_empty()
    }
}

/// A declared new ontology class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewClass {
    pub name: String,
    pub definition: String,
}

/// A declared datatype/optional property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclaredProperty {
    pub name: String,
    /// Domain class, defaulting to the agent class.
    pub domain: String,
    /// Range datatype, defaulting to xsd:string.
    pub range: String,
    /// Free-text justification for the extension.
    pub justification: String,
}

impl Default for DeclaredProperty {
    fn default() -> Self {
        Self {
            name: String::new(),
            domain: "agento:Agent".to_string(),
            range: "xsd:string".to_string(),
            justification: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ontology_class_heuristic() {
        assert_eq!(
            OntologyClass::from_vendor_class("AssistantAgent"),
            Some(OntologyClass::Agent)
        );
        assert_eq!(
            OntologyClass::from_vendor_class("Task"),
            Some(OntologyClass::Task)
        );
        assert_eq!(
            OntologyClass::from_vendor_class("ContentCreatorFlow"),
            Some(OntologyClass::Workflow)
        );
        assert_eq!(OntologyClass::from_vendor_class("StateGraph"), None);
    }

    #[test]
    fn test_property_status_parse() {
        assert_eq!(PropertyStatus::parse("disarankan"), PropertyStatus::Suggested);
        assert_eq!(PropertyStatus::parse("Opsional"), PropertyStatus::Optional);
        assert_eq!(PropertyStatus::parse("tidak muncul"), PropertyStatus::NotUsed);
        assert_eq!(PropertyStatus::parse(""), PropertyStatus::Used);
        assert_eq!(
            PropertyStatus::parse("weird"),
            PropertyStatus::Other("weird".to_string())
        );
    }

    #[test]
    fn test_attr_any_skips_empty() {
        let mut entity = Entity::default();
        entity.attributes.insert("system_message".into(), "".into());
        entity
            .attributes
            .insert("systemMessage".into(), "hello".into());
        assert_eq!(entity.attr_any(&["system_message", "systemMessage"]), Some("hello"));
    }
}
