pub mod analysis;
pub mod classify;
pub mod config;
pub mod graph;
pub mod normalize;
pub mod pattern;
pub mod pipeline;
pub mod walker;

pub use classify::Framework;
pub use graph::{GraphDocument, ResourceGraph};
pub use pattern::PatternRecord;
pub use pipeline::{Pipeline, PipelineError};
