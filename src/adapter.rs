//! Normalization boundary for simplification-service responses.
//!
//! The service may omit any field, and its `groups` payload is a
//! heterogeneous JSON array. All tolerance for partial or malformed results
//! lives here: downstream code (grid, overlay, expression panel) only ever
//! sees a fully populated [`SimplificationResult`]. Normalization never
//! fails; it degrades to placeholders.

use serde::Deserialize;
use serde_json::Value;

use crate::state::FormMode;

/// Placeholder shown for a missing expression.
pub const MISSING_EXPRESSION: &str = "—";

/// One prime-term grouping as an inclusive rectangular span in grid
/// coordinates, with the service's color tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSpan {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
    pub color: String,
}

/// Fully normalized simplification result.
#[derive(Clone, Debug, PartialEq)]
pub struct SimplificationResult {
    pub original_expression: String,
    pub simplified_expression: String,
    pub minterms: Vec<usize>,
    pub maxterms: Vec<usize>,
    pub groups: Vec<GroupSpan>,
    pub form: FormMode,
}

/// Raw wire shape of a `/simplify` response. Every field is optional; junk
/// inside sequences is tolerated by deserializing them as loose JSON values.
#[derive(Debug, Default, Deserialize)]
pub struct RawSimplifyResponse {
    #[serde(default)]
    pub simplified_expression: Option<String>,
    #[serde(default)]
    pub original_expression: Option<String>,
    #[serde(default)]
    pub minterms: Option<Value>,
    #[serde(default)]
    pub maxterms: Option<Value>,
    #[serde(default)]
    pub groups: Option<Value>,
    #[serde(default, rename = "type")]
    pub form: Option<String>,
}

/// Normalize a raw response. `fallback_mode` is the caller's currently
/// selected form mode, used when the response does not state one.
pub fn normalize(raw: RawSimplifyResponse, fallback_mode: FormMode) -> SimplificationResult {
    SimplificationResult {
        original_expression: expression_or_placeholder(raw.original_expression),
        simplified_expression: expression_or_placeholder(raw.simplified_expression),
        minterms: term_list(raw.minterms),
        maxterms: term_list(raw.maxterms),
        groups: group_list(raw.groups),
        form: parse_form(raw.form.as_deref()).unwrap_or(fallback_mode),
    }
}

fn expression_or_placeholder(expr: Option<String>) -> String {
    match expr {
        Some(s) if !s.trim().is_empty() => s,
        _ => MISSING_EXPRESSION.to_string(),
    }
}

fn parse_form(raw: Option<&str>) -> Option<FormMode> {
    match raw?.trim().to_ascii_uppercase().as_str() {
        "SOP" => Some(FormMode::Sop),
        "POS" => Some(FormMode::Pos),
        _ => None,
    }
}

/// Extract a minterm/maxterm index list, skipping anything that is not a
/// non-negative integer.
fn term_list(raw: Option<Value>) -> Vec<usize> {
    match raw {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_u64().map(|n| n as usize))
            .collect(),
        _ => Vec::new(),
    }
}

/// Extract group spans. The service sends each group as a positional array
/// `[row_start, row_end, col_start, col_end, color, ...]` (trailing elements
/// carry implicant bookkeeping we do not render); the object form
/// `{rowStart, rowEnd, colStart, colEnd, color}` is accepted as well.
/// Malformed entries are dropped, a non-array `groups` becomes empty.
fn group_list(raw: Option<Value>) -> Vec<GroupSpan> {
    match raw {
        Some(Value::Array(items)) => items.iter().filter_map(parse_group).collect(),
        _ => Vec::new(),
    }
}

fn parse_group(value: &Value) -> Option<GroupSpan> {
    match value {
        Value::Array(parts) => {
            let coord = |i: usize| parts.get(i)?.as_u64().map(|n| n as usize);
            let span = GroupSpan {
                row_start: coord(0)?,
                row_end: coord(1)?,
                col_start: coord(2)?,
                col_end: coord(3)?,
                color: parts
                    .get(4)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            };
            ordered(span)
        }
        Value::Object(fields) => {
            let coord = |key: &str| fields.get(key)?.as_u64().map(|n| n as usize);
            let span = GroupSpan {
                row_start: coord("rowStart")?,
                row_end: coord("rowEnd")?,
                col_start: coord("colStart")?,
                col_end: coord("colEnd")?,
                color: fields
                    .get("color")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            };
            ordered(span)
        }
        _ => None,
    }
}

/// A span whose end precedes its start cannot be drawn; treat it as
/// malformed rather than panicking in the geometry math.
fn ordered(span: GroupSpan) -> Option<GroupSpan> {
    (span.row_start <= span.row_end && span.col_start <= span.col_end).then_some(span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw(value: Value) -> RawSimplifyResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_response_degrades_to_placeholders() {
        let result = normalize(raw(json!({})), FormMode::Sop);
        assert_eq!(result.simplified_expression, MISSING_EXPRESSION);
        assert_eq!(result.original_expression, MISSING_EXPRESSION);
        assert!(result.minterms.is_empty());
        assert!(result.maxterms.is_empty());
        assert!(result.groups.is_empty());
        assert_eq!(result.form, FormMode::Sop);
    }

    #[test]
    fn complete_response_passes_through() {
        let result = normalize(
            raw(json!({
                "simplified_expression": "BC'D",
                "original_expression": "A'BC'D + ABC'D",
                "minterms": [5, 13],
                "maxterms": [],
                "groups": [[1, 1, 1, 1, "border-blue-500", 1, [5, 13]]],
                "type": "SOP",
            })),
            FormMode::Pos,
        );
        assert_eq!(result.simplified_expression, "BC'D");
        assert_eq!(result.minterms, vec![5, 13]);
        assert_eq!(result.form, FormMode::Sop);
        assert_eq!(
            result.groups,
            vec![GroupSpan {
                row_start: 1,
                row_end: 1,
                col_start: 1,
                col_end: 1,
                color: "border-blue-500".into(),
            }]
        );
    }

    #[test]
    fn object_form_groups_are_accepted() {
        let result = normalize(
            raw(json!({
                "groups": [{
                    "rowStart": 0, "rowEnd": 1,
                    "colStart": 2, "colEnd": 3,
                    "color": "red",
                }],
            })),
            FormMode::Sop,
        );
        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0].col_start, 2);
        assert_eq!(result.groups[0].color, "red");
    }

    #[test]
    fn malformed_entries_are_dropped_not_propagated() {
        let result = normalize(
            raw(json!({
                "minterms": [1, "two", null, 3, -4],
                "groups": [
                    [0, 0, 0],                       // too short
                    "not a group",
                    [2, 0, 0, 1, "red"],             // end before start
                    {"rowStart": 0, "rowEnd": 0},    // missing columns
                    [0, 0, 0, 1, "green"],
                ],
            })),
            FormMode::Sop,
        );
        assert_eq!(result.minterms, vec![1, 3]);
        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0].color, "green");
    }

    #[test]
    fn groups_not_a_sequence_becomes_empty() {
        let result = normalize(raw(json!({ "groups": {"SOP": []} })), FormMode::Sop);
        assert!(result.groups.is_empty());
    }

    #[test]
    fn missing_form_falls_back_to_callers_mode() {
        let result = normalize(raw(json!({})), FormMode::Pos);
        assert_eq!(result.form, FormMode::Pos);

        let result = normalize(raw(json!({"type": "pos"})), FormMode::Sop);
        assert_eq!(result.form, FormMode::Pos);

        let result = normalize(raw(json!({"type": "garbage"})), FormMode::Sop);
        assert_eq!(result.form, FormMode::Sop);
    }

    #[test]
    fn blank_expression_counts_as_missing() {
        let result = normalize(raw(json!({"simplified_expression": "  "})), FormMode::Sop);
        assert_eq!(result.simplified_expression, MISSING_EXPRESSION);
    }
}
