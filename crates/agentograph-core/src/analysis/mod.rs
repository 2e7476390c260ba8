//! Analysis-document parsing.
//!
//! An analysis document is loosely structured free text: a fixed vocabulary
//! of section headings, each followed by tabular data flattened to one cell
//! per line. This module splits the text into sections and assembles a
//! [`PatternRecord`] from the recognized tables.
//!
//! The parsers are deliberately tolerant: malformed or hand-edited input
//! degrades to partial records instead of failing the whole document.

mod tables;

pub use tables::{
    parse_adjustments, parse_entities, parse_relational_properties, parse_two_column,
    split_quoted_values,
};

use indexmap::IndexMap;

use crate::pattern::PatternRecord;

// =============================================================================
// SECTIONS
// =============================================================================

/// The fixed heading vocabulary of an analysis document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Key/value identity block (framework, file name, pattern type, ...).
    Identity,
    /// Five-column entity table.
    StructureAnalysis,
    /// Legacy class listing; recognized so its rows do not leak into the
    /// preceding section, but never consumed.
    Classes,
    /// Five-column relational-property table.
    RelationalProperties,
    /// Attributive-property listing; recognized but not consumed.
    AttributiveProperties,
    /// Four-column ontology-adjustment table.
    OntologyAdjustments,
}

impl SectionKind {
    /// Match a trimmed line against the heading vocabulary. Each section
    /// accepts its canonical heading and the legacy heading used by the
    /// original analysis corpus.
    pub fn from_heading(line: &str) -> Option<Self> {
        match line {
            "Pattern Identity" | "Identitas Pattern" => Some(Self::Identity),
            "Pattern Structure Analysis" | "Analisis Struktur Pattern" => {
                Some(Self::StructureAnalysis)
            }
            "Classes" | "kelas (classes)" => Some(Self::Classes),
            "Relational Properties" | "Properti relasional" => Some(Self::RelationalProperties),
            "Attributive Properties" | "Properti atributif" => Some(Self::AttributiveProperties),
            "Ontology Adjustments" | "Penyesuaian AgentO" => Some(Self::OntologyAdjustments),
            _ => None,
        }
    }
}

/// Raw text partitioned into named sections.
///
/// Lines are trimmed and blanks dropped before classification; lines before
/// the first recognized heading are discarded; unrecognized headings are
/// ordinary content lines.
#[derive(Debug, Clone, Default)]
pub struct AnalysisDocument {
    sections: IndexMap<SectionKind, Vec<String>>,
}

impl AnalysisDocument {
    /// Split raw analysis text into heading-grouped line lists.
    pub fn split(text: &str) -> Self {
        let mut sections: IndexMap<SectionKind, Vec<String>> = IndexMap::new();
        let mut current: Option<SectionKind> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(kind) = SectionKind::from_heading(line) {
                sections.entry(kind).or_default();
                current = Some(kind);
            } else if let Some(kind) = current {
                sections
                    .entry(kind)
                    .or_default()
                    .push(line.to_string());
            }
        }

        Self { sections }
    }

    /// Line list for a section; empty slice when absent.
    pub fn section(&self, kind: SectionKind) -> &[String] {
        self.sections.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the heading was present at all.
    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.sections.contains_key(&kind)
    }
}

// =============================================================================
// DOCUMENT -> RECORD
// =============================================================================

/// Parse an analysis document into a [`PatternRecord`].
///
/// Total over its input: any text yields a record, possibly with empty
/// fields and no entities.
pub fn parse_document(text: &str) -> PatternRecord {
    let doc = AnalysisDocument::split(text);
    let mut record = PatternRecord::default();

    if doc.has_section(SectionKind::Identity) {
        let identity = parse_two_column(doc.section(SectionKind::Identity));
        record.framework = identity_value(&identity, &["Framework"]);
        record.file_name = identity_value(&identity, &["File name", "File Name"]);
        record.pattern_type = identity_value(&identity, &["Pattern Type", "Pattern type"]);
        record.description = identity_value(&identity, &["Description", "Deskripsi"]);
    }

    record.entities = parse_entities(doc.section(SectionKind::StructureAnalysis));
    record.relational_properties =
        parse_relational_properties(doc.section(SectionKind::RelationalProperties));
    record.adjustments = parse_adjustments(doc.section(SectionKind::OntologyAdjustments));

    record
}

fn identity_value(identity: &IndexMap<String, String>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|k| identity.get(*k))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}
