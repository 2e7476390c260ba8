//! Default values for agentograph configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Extraction Defaults
// ============================================================================

/// Maximum size of a single source file to walk (256 KB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 256 * 1024;

/// Source file extensions the structural walkers accept.
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["py", "ts", "tsx", "js", "json", "yaml", "yml"];

/// Extension of analysis documents.
pub const DEFAULT_DOCUMENT_EXTENSION: &str = "txt";

// ============================================================================
// Output Defaults
// ============================================================================

/// Default output format name.
pub const DEFAULT_OUTPUT_FORMAT: &str = "json";

/// Pretty-print JSON output by default.
pub const DEFAULT_PRETTY_JSON: bool = true;
