//! Tabular record parsers.
//!
//! Sections carry table data flattened to one cell per line. Records are
//! reassembled by chunking the line list at the table's column count;
//! short final chunks are padded with empty cells rather than rejected.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::pattern::{
    DeclaredProperty, Entity, NewClass, OntologyAdjustments, OntologyClass, PropertyStatus,
    RelationalProperty,
};

/// "Domain -> Range" with an ASCII or unicode arrow, single-token sides.
static ARROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_]+)\s*(?:->|→)\s*([A-Za-z0-9_]+)").expect("valid arrow regex")
});

/// Fixed-width chunks over a cell list, the final chunk padded to `width`
/// with empty strings.
fn padded_chunks(lines: &[String], width: usize) -> Vec<Vec<String>> {
    lines
        .chunks(width)
        .map(|chunk| {
            let mut cells: Vec<String> = chunk.iter().map(|c| c.trim().to_string()).collect();
            cells.resize(width, String::new());
            cells
        })
        .collect()
}

/// Strip surrounding straight or typographic double quotes.
fn unquote(value: &str) -> &str {
    value
        .trim()
        .trim_matches('"')
        .trim_matches(|c| c == '\u{201C}' || c == '\u{201D}')
}

// =============================================================================
// TWO-COLUMN (IDENTITY)
// =============================================================================

/// Parse an alternating key/value line list into an ordered map.
///
/// A leading "Attribute"/"Atribut" header pair is skipped. An odd trailing
/// key maps to the empty string.
pub fn parse_two_column(lines: &[String]) -> IndexMap<String, String> {
    let lines = match lines.first() {
        Some(first) if matches!(first.to_lowercase().as_str(), "atribut" | "attribute") => {
            &lines[2.min(lines.len())..]
        }
        _ => lines,
    };

    let mut map = IndexMap::new();
    for pair in lines.chunks(2) {
        let key = pair[0].clone();
        let value = pair.get(1).cloned().unwrap_or_default();
        map.insert(key, value);
    }
    map
}

// =============================================================================
// FIVE-COLUMN (ENTITIES)
// =============================================================================

/// Parse the structure-analysis table into entity rows.
///
/// Columns: display name, vendor class, attribute names, example values,
/// note. Attribute names pair positionally with example values; surplus
/// names on either side are dropped.
pub fn parse_entities(lines: &[String]) -> Vec<Entity> {
    // Header rows are flattened like data rows; drop the first full row
    // when it looks like one.
    let lines = match lines.first() {
        Some(first)
            if lines.len() > 5
                && (first.to_lowercase().starts_with("entitas")
                    || first.to_lowercase().starts_with("entity")) =>
        {
            &lines[5..]
        }
        _ => lines,
    };

    padded_chunks(lines, 5)
        .into_iter()
        .map(|cells| {
            let [display, vendor_class, attr_names, example_values, note] =
                <[String; 5]>::try_from(cells).unwrap_or_default();

            let names: Vec<String> = if attr_names.is_empty() {
                Vec::new()
            } else {
                attr_names.split(',').map(|a| a.trim().to_string()).collect()
            };
            let values = split_quoted_values(&example_values);

            let mut attributes = IndexMap::new();
            for (name, value) in names.into_iter().zip(values) {
                attributes.insert(name, value);
            }

            Entity {
                id: display.to_lowercase().replace(' ', "_"),
                maps_to: OntologyClass::from_vendor_class(&vendor_class),
                vendor_class,
                attributes,
                note,
            }
        })
        .collect()
}

/// Split a comma-separated value cell, treating commas inside double quotes
/// as part of the value. Each value is trimmed and unquoted.
pub fn split_quoted_values(cell: &str) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in cell.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                values.push(current.clone());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(current);
    values.iter().map(|v| unquote(v).to_string()).collect()
}

// =============================================================================
// FIVE-COLUMN (RELATIONAL PROPERTIES)
// =============================================================================

/// Parse the relational-property table.
///
/// Columns: name, "domain -> range", definition, evidence (unused), status.
/// Rows with an empty name cell are skipped.
pub fn parse_relational_properties(lines: &[String]) -> Vec<RelationalProperty> {
    let lines = match lines.first() {
        Some(first)
            if first.to_lowercase().starts_with("property")
                || first.to_lowercase().starts_with("properti") =>
        {
            &lines[5.min(lines.len())..]
        }
        _ => lines,
    };

    padded_chunks(lines, 5)
        .into_iter()
        .filter_map(|cells| {
            let [name, domain_range, definition, _evidence, status] =
                <[String; 5]>::try_from(cells).unwrap_or_default();
            if name.is_empty() {
                return None;
            }
            let (domain, range) = parse_domain_range(&domain_range);
            Some(RelationalProperty {
                name,
                domain,
                range,
                definition,
                status: PropertyStatus::parse(&status),
            })
        })
        .collect()
}

/// Split a "domain -> range" cell. Falls back to (whole cell, "") when no
/// arrow is found.
fn parse_domain_range(cell: &str) -> (String, String) {
    if let Some((domain, range)) = cell.split_once('\u{2192}') {
        return (domain.trim().to_string(), range.trim().to_string());
    }
    if let Some(caps) = ARROW_RE.captures(cell) {
        return (caps[1].to_string(), caps[2].to_string());
    }
    (cell.to_string(), String::new())
}

// =============================================================================
// FOUR-COLUMN (ONTOLOGY ADJUSTMENTS)
// =============================================================================

/// Parse the ontology-adjustment table.
///
/// Columns: kind, name, definition, justification. The kind cell routes the
/// row by substring: "class" declares a new class, "datatype" a datatype
/// property, "optional"/"opsional" an optional property. Rows with an empty
/// kind or an unrecognized kind are skipped.
pub fn parse_adjustments(lines: &[String]) -> OntologyAdjustments {
    let mut adjustments = OntologyAdjustments::default();

    for cells in padded_chunks(lines, 4) {
        let [kind, name, definition, justification] =
            <[String; 4]>::try_from(cells).unwrap_or_default();
        if kind.is_empty() {
            continue;
        }
        let kind = kind.to_lowercase();
        if kind.contains("class") {
            adjustments.new_classes.push(NewClass { name, definition });
        } else if kind.contains("datatype") {
            adjustments.datatype_properties.push(DeclaredProperty {
                name,
                justification,
                ..DeclaredProperty::default()
            });
        } else if kind.contains("optional") || kind.contains("opsional") {
            adjustments.optional_properties.push(DeclaredProperty {
                name,
                justification,
                ..DeclaredProperty::default()
            });
        }
    }

    adjustments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_two_column_skips_header_and_pads_odd_tail() {
        let map = parse_two_column(&lines(&["Atribut", "Nilai", "Framework", "AutoGen", "Extra"]));
        assert_eq!(map.get("Framework").map(String::as_str), Some("AutoGen"));
        assert_eq!(map.get("Extra").map(String::as_str), Some(""));
    }

    #[test]
    fn test_quoted_comma_stays_in_value() {
        let values = split_quoted_values(r#"chess_player, "You are a chess player, be bold""#);
        assert_eq!(values[0], "chess_player");
        assert_eq!(values[1], "You are a chess player, be bold");
    }

    #[test]
    fn test_entity_row_with_three_cells_pads() {
        let entities = parse_entities(&lines(&["Assistant", "AssistantAgent", "name"]));
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, "assistant");
        assert_eq!(entities[0].vendor_class, "AssistantAgent");
        assert_eq!(entities[0].note, "");
        assert!(entities[0].attributes.is_empty());
    }

    #[test]
    fn test_surplus_attr_names_dropped() {
        let entities = parse_entities(&lines(&[
            "Assistant",
            "AssistantAgent",
            "name, system_message, extra",
            "chess_player, \"Play chess\"",
            "",
        ]));
        let attrs = &entities[0].attributes;
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("name").map(String::as_str), Some("chess_player"));
        assert!(!attrs.contains_key("extra"));
    }

    #[test]
    fn test_unicode_arrow_with_spaces() {
        let props = parse_relational_properties(&lines(&[
            "hasAgentMember",
            "System → Agent",
            "membership",
            "",
            "disarankan",
        ]));
        assert_eq!(props[0].domain, "System");
        assert_eq!(props[0].range, "Agent");
        assert_eq!(props[0].status, PropertyStatus::Suggested);
    }

    #[test]
    fn test_ascii_arrow() {
        let props = parse_relational_properties(&lines(&[
            "routesTo",
            "Node -> Node",
            "",
            "",
            "",
        ]));
        assert_eq!(props[0].domain, "Node");
        assert_eq!(props[0].range, "Node");
    }

    #[test]
    fn test_no_arrow_keeps_cell_as_domain() {
        let props = parse_relational_properties(&lines(&["uses", "Agent", "", "", ""]));
        assert_eq!(props[0].domain, "Agent");
        assert_eq!(props[0].range, "");
    }

    #[test]
    fn test_empty_property_name_skipped() {
        let props = parse_relational_properties(&lines(&["", "A → B", "", "", ""]));
        assert!(props.is_empty());
    }

    #[test]
    fn test_adjustments_routing() {
        let adj = parse_adjustments(&lines(&[
            "New Class",
            "ChessGame",
            "A chess match",
            "",
            "Datatype Property",
            "boardState",
            "",
            "tracks board",
            "Opsional Property",
            "maxTurns",
            "",
            "limit",
        ]));
        assert_eq!(adj.new_classes[0].name, "ChessGame");
        assert_eq!(adj.datatype_properties[0].name, "boardState");
        assert_eq!(adj.datatype_properties[0].domain, "agento:Agent");
        assert_eq!(adj.optional_properties[0].name, "maxTurns");
    }

    #[test]
    fn test_unknown_kind_skipped() {
        let adj = parse_adjustments(&lines(&["Mystery", "x", "", ""]));
        assert!(adj.is_empty());
    }
}
