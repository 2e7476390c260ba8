//! Framework classification.
//!
//! Routes a [`PatternRecord`] to the framework whose normalizer should
//! consume it. The declared framework name is authoritative; when it is
//! missing or unrecognized, vendor class names decide.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pattern::PatternRecord;

/// The agentic frameworks the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Autogen,
    #[serde(rename = "crewai")]
    CrewAi,
    #[serde(rename = "langgraph")]
    LangGraph,
    #[serde(rename = "mastraai")]
    MastraAi,
    Unknown,
}

impl Framework {
    /// Stable lowercase name, used for output paths and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Autogen => "autogen",
            Self::CrewAi => "crewai",
            Self::LangGraph => "langgraph",
            Self::MastraAi => "mastraai",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a user-supplied framework name (CLI flag, directory name).
    pub fn from_name(name: &str) -> Option<Self> {
        match classify_declared(name) {
            Self::Unknown => None,
            fw => Some(fw),
        }
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Framework {
    type Err = UnknownFramework;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Framework::from_name(s).ok_or_else(|| UnknownFramework(s.to_string()))
    }
}

/// A framework name that matched no declared-name rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown framework '{0}'")]
pub struct UnknownFramework(pub String);

/// Declared-name rules, in priority order. First substring match wins.
const DECLARED_RULES: &[(&str, Framework)] = &[
    ("autogen", Framework::Autogen),
    ("crewai", Framework::CrewAi),
    ("langraph", Framework::LangGraph),
    ("langgraph", Framework::LangGraph),
    ("mastra", Framework::MastraAi),
];

/// Vendor-class fallback rules, in priority order over the joined class
/// names. Note "assistant" alone is an AutoGen signal and "flow" a CrewAI
/// one; order matters.
const VENDOR_RULES: &[(&str, Framework)] = &[
    ("assistantagent", Framework::Autogen),
    ("userproxyagent", Framework::Autogen),
    ("assistant", Framework::Autogen),
    ("crew", Framework::CrewAi),
    ("flow", Framework::CrewAi),
    ("stategraph", Framework::LangGraph),
    ("node", Framework::LangGraph),
    ("workflow", Framework::LangGraph),
];

fn classify_declared(name: &str) -> Framework {
    let lower = name.trim().to_lowercase();
    for (needle, fw) in DECLARED_RULES {
        if lower.contains(needle) {
            return *fw;
        }
    }
    Framework::Unknown
}

/// Classify a record. Tries the declared framework name first, then the
/// concatenated lowercase vendor class names.
pub fn classify(record: &PatternRecord) -> Framework {
    match classify_declared(&record.framework) {
        Framework::Unknown => {}
        fw => return fw,
    }

    let joined = record
        .entities
        .iter()
        .map(|e| e.vendor_class.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    for (needle, fw) in VENDOR_RULES {
        if joined.contains(needle) {
            return *fw;
        }
    }
    Framework::Unknown
}
