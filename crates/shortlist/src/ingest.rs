//! Boundary between loosely-typed evaluator JSON and the strictly typed
//! ranking input.
//!
//! CRITICAL: conversion fails closed. A record that cannot be turned into a
//! valid `Evaluation` rejects the whole batch; missing scoring fields are
//! never silently defaulted. The only derived field is the display-only
//! `grade`, computed from the already-validated score when the evaluator
//! omitted it.

use serde_json::Value;

use crate::errors::ShortlistError;
use crate::models::{score_in_range, Evaluation, Grade};

/// Converts evaluator output into validated `Evaluation` records.
///
/// Accepts the two shapes the evaluator produces:
/// - flat rows: `[{"candidate_id": ..., "persona_id": ..., "score": ...}]`
/// - candidate blocks: `[{"candidate_id": ..., "persona_results": [...]}]`,
///   where rows inherit the block's `candidate_id` when they carry none.
///
/// `index` in errors refers to the record's position in the top-level array.
pub fn parse_evaluations(payload: &Value) -> Result<Vec<Evaluation>, ShortlistError> {
    let items = payload
        .as_array()
        .ok_or_else(|| ShortlistError::InvalidPayload {
            got: json_type_name(payload),
        })?;

    let mut evaluations = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match item.get("persona_results") {
            Some(results) => {
                let candidate_id = require_string(item, "candidate_id", index)?;
                if candidate_id.trim().is_empty() {
                    return Err(ShortlistError::EmptyField {
                        index,
                        field: "candidate_id",
                    });
                }
                let rows = results
                    .as_array()
                    .ok_or_else(|| ShortlistError::InvalidField {
                        index,
                        field: "persona_results",
                        detail: format!("expected an array, got {}", json_type_name(results)),
                    })?;
                for row in rows {
                    evaluations.push(parse_row(row, Some(candidate_id.as_str()), index)?);
                }
            }
            None => evaluations.push(parse_row(item, None, index)?),
        }
    }

    Ok(evaluations)
}

/// Parses one evaluation row. `inherited_candidate` carries the enclosing
/// block's id for the nested shape.
fn parse_row(
    row: &Value,
    inherited_candidate: Option<&str>,
    index: usize,
) -> Result<Evaluation, ShortlistError> {
    if !row.is_object() {
        return Err(ShortlistError::InvalidField {
            index,
            field: "evaluation",
            detail: format!("expected an object, got {}", json_type_name(row)),
        });
    }

    let candidate_id = match optional_string(row, "candidate_id", index)? {
        Some(id) => id,
        None => inherited_candidate
            .map(str::to_string)
            .ok_or(ShortlistError::MissingField {
                index,
                field: "candidate_id",
            })?,
    };
    if candidate_id.trim().is_empty() {
        return Err(ShortlistError::EmptyField {
            index,
            field: "candidate_id",
        });
    }

    let persona_id = require_string(row, "persona_id", index)?;
    if persona_id.trim().is_empty() {
        return Err(ShortlistError::EmptyField {
            index,
            field: "persona_id",
        });
    }

    let score = match row.get("score") {
        None | Some(Value::Null) => {
            return Err(ShortlistError::MissingField {
                index,
                field: "score",
            })
        }
        Some(value) => value.as_f64().ok_or_else(|| ShortlistError::InvalidField {
            index,
            field: "score",
            detail: format!("expected a number, got {}", json_type_name(value)),
        })?,
    };
    if !score_in_range(score) {
        return Err(ShortlistError::InvalidScore {
            index,
            candidate_id,
            persona_id,
            score,
        });
    }

    let grade = match optional_string(row, "grade", index)? {
        Some(letter) => letter
            .parse::<Grade>()
            .map_err(|detail| ShortlistError::InvalidField {
                index,
                field: "grade",
                detail,
            })?,
        None => Grade::from_score(score),
    };

    let persona_name = match optional_string(row, "persona_name", index)? {
        Some(name) if !name.trim().is_empty() => name,
        _ => persona_id.clone(),
    };

    let strengths = string_list(row, "strengths", index)?;
    let gaps = string_list(row, "gaps", index)?;
    let explanation = optional_string(row, "explanation", index)?.unwrap_or_default();

    Ok(Evaluation {
        candidate_id,
        persona_id,
        persona_name,
        score,
        grade,
        strengths,
        gaps,
        explanation,
    })
}

/// Reads a field that must be a string when present. Absent and `null` are
/// both treated as absent.
fn optional_string(
    row: &Value,
    field: &'static str,
    index: usize,
) -> Result<Option<String>, ShortlistError> {
    match row.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ShortlistError::InvalidField {
            index,
            field,
            detail: format!("expected a string, got {}", json_type_name(other)),
        }),
    }
}

fn require_string(
    row: &Value,
    field: &'static str,
    index: usize,
) -> Result<String, ShortlistError> {
    optional_string(row, field, index)?.ok_or(ShortlistError::MissingField { index, field })
}

/// Reads an optional string array. Non-string items are skipped; a present
/// non-array value is rejected.
fn string_list(
    row: &Value,
    field: &'static str,
    index: usize,
) -> Result<Vec<String>, ShortlistError> {
    match row.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|item| item.as_str().map(String::from))
            .collect()),
        Some(other) => Err(ShortlistError::InvalidField {
            index,
            field,
            detail: format!("expected an array, got {}", json_type_name(other)),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
