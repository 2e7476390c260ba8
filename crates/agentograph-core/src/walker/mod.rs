//! Structural source walkers.
//!
//! For frameworks that ship no analysis document, entities are recovered by
//! walking the program's syntax tree directly. Each walker recognizes a
//! small fixed set of constructor-like call shapes and reads their keyword
//! arguments into the same attribute vocabulary the text-based path uses
//! (`name`, `role`, `goal`, `backstory`, `system_message`, ...).
//!
//! Walking is total over source text: source that cannot be structurally
//! parsed yields an empty record, never an error. [`WalkError`] exists only
//! for the file-reading boundary.

mod autogen;
mod crewai;
mod langgraph;
mod mastra;
mod python;

pub use python::{PythonCall, PythonSource};

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::classify::Framework;
use crate::pattern::PatternRecord;

/// Errors at the walker's file-reading boundary.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("failed to read source file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no walker registered for framework '{0}'")]
    UnsupportedFramework(Framework),
}

/// A structural walker for one framework's source surface.
pub trait SourceWalker: Send + Sync {
    /// The framework this walker recovers patterns for.
    fn framework(&self) -> Framework;

    /// File extensions (lowercase, no dot) this walker accepts.
    fn supported_extensions(&self) -> &'static [&'static str];

    /// Recover a pattern record from source text. Total: unparseable
    /// source yields a record with no entities.
    fn walk(&self, file_name: &str, content: &str) -> PatternRecord;
}

/// Registry of framework walkers.
pub struct WalkerRegistry {
    walkers: HashMap<Framework, Arc<dyn SourceWalker>>,
}

impl WalkerRegistry {
    /// Create a registry with all built-in walkers.
    pub fn new() -> Self {
        let mut registry = Self {
            walkers: HashMap::new(),
        };
        registry.register(Arc::new(autogen::AutogenWalker));
        registry.register(Arc::new(crewai::CrewAiWalker));
        registry.register(Arc::new(langgraph::LangGraphWalker));
        registry.register(Arc::new(mastra::MastraWalker));
        registry
    }

    pub fn register(&mut self, walker: Arc<dyn SourceWalker>) {
        self.walkers.insert(walker.framework(), walker);
    }

    pub fn walker_for(&self, framework: Framework) -> Option<Arc<dyn SourceWalker>> {
        self.walkers.get(&framework).cloned()
    }

    /// Whether the walker for `framework` accepts files with `extension`.
    pub fn accepts(&self, framework: Framework, extension: &str) -> bool {
        self.walkers
            .get(&framework)
            .map(|w| {
                w.supported_extensions()
                    .contains(&extension.to_lowercase().as_str())
            })
            .unwrap_or(false)
    }

    /// Read and walk one source file.
    pub fn walk_file(&self, framework: Framework, path: &Path) -> Result<PatternRecord, WalkError> {
        let walker = self
            .walker_for(framework)
            .ok_or(WalkError::UnsupportedFramework(framework))?;
        let content = std::fs::read_to_string(path).map_err(|source| WalkError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        Ok(walker.walk(file_name, &content))
    }
}

impl Default for WalkerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
