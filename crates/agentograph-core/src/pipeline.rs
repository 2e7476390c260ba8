//! End-to-end per-artifact transformation.
//!
//! One artifact in, one resource graph out. Document conversion is total;
//! source extraction can fail only at the walker's file/framework boundary.
//! No state is shared across artifacts: every call builds a fresh graph.

use std::path::Path;

use thiserror::Error;

use crate::analysis;
use crate::classify::{self, Framework};
use crate::graph::{build_graph, ResourceGraph};
use crate::normalize;
use crate::pattern::PatternRecord;
use crate::walker::{WalkError, WalkerRegistry};

/// Errors surfaced to the batch driver for a single artifact.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Walk(#[from] WalkError),
}

/// The extraction-and-normalization pipeline.
pub struct Pipeline {
    walkers: WalkerRegistry,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            walkers: WalkerRegistry::new(),
        }
    }

    /// Convert one analysis document to a resource graph. Total over its
    /// input: any text yields a graph.
    pub fn convert_document(&self, text: &str) -> ResourceGraph {
        let record = analysis::parse_document(text);
        graph_for(&record)
    }

    /// Extract a resource graph from program source. The declared framework
    /// selects the walker; classification still runs on the recovered
    /// record so entity-level signals can refine it.
    pub fn extract_source(
        &self,
        framework: Framework,
        file_name: &str,
        content: &str,
    ) -> Result<ResourceGraph, PipelineError> {
        let walker = self
            .walkers
            .walker_for(framework)
            .ok_or(WalkError::UnsupportedFramework(framework))?;
        let record = walker.walk(file_name, content);
        Ok(graph_for(&record))
    }

    /// Read and extract one source file.
    pub fn extract_file(
        &self,
        framework: Framework,
        path: &Path,
    ) -> Result<ResourceGraph, PipelineError> {
        let record = self.walkers.walk_file(framework, path)?;
        Ok(graph_for(&record))
    }

    pub fn walkers(&self) -> &WalkerRegistry {
        &self.walkers
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify, normalize and build the graph for one parsed record.
fn graph_for(record: &PatternRecord) -> ResourceGraph {
    let framework = classify::classify(record);
    let normalized = normalize::normalize(framework, record);
    build_graph(&normalized, record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_document_is_total() {
        let pipeline = Pipeline::new();
        let graph = pipeline.convert_document("");
        assert!(graph.resources.is_empty());
        assert_eq!(graph.prefixes.len(), 8);
    }

    #[test]
    fn test_extract_unknown_framework_errors() {
        let pipeline = Pipeline::new();
        let result = pipeline.extract_source(Framework::Unknown, "x.py", "");
        assert!(matches!(
            result,
            Err(PipelineError::Walk(WalkError::UnsupportedFramework(_)))
        ));
    }
}
