use std::collections::{BTreeSet, HashSet};

use jsonschema::JSONSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::{
    ArrayValidation, InstanceType, NumberValidation, RootSchema, Schema, SchemaObject,
};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use studyplan_core::{
    NonStudyTimeBlock, PlanDraft, PlanError, Result, ValidationResult, parse_time_of_day,
};

/// Allowed kinds of non-study time blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum NonStudyBlockKind {
    #[serde(rename = "아침식사")]
    Breakfast,
    #[serde(rename = "점심식사")]
    Lunch,
    #[serde(rename = "저녁식사")]
    Dinner,
    #[serde(rename = "수면")]
    Sleep,
    #[serde(rename = "기타")]
    Other,
}

/// Declarative contract a non-study time block must satisfy.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NonStudyTimeBlockContract {
    #[serde(rename = "type")]
    pub kind: NonStudyBlockKind,
    /// 24-hour `HH:mm`.
    #[schemars(regex(pattern = r"^([01]\d|2[0-3]):[0-5]\d$"))]
    pub start_time: String,
    /// 24-hour `HH:mm`.
    #[schemars(regex(pattern = r"^([01]\d|2[0-3]):[0-5]\d$"))]
    pub end_time: String,
    /// Days (0-6) the block applies to; absent means every day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "day_of_week_schema")]
    pub day_of_week: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Emit the JSON Schema for a plan draft.
pub fn plan_draft_json_schema() -> RootSchema {
    schema_for!(PlanDraft)
}

/// Emit the JSON Schema for the `non_study_time_blocks` list.
pub fn non_study_time_blocks_json_schema() -> RootSchema {
    schema_for!(Vec<NonStudyTimeBlockContract>)
}

/// Validate non-study time blocks against the contract, then check the list
/// as a whole for inverted windows and duplicates.
///
/// Every contract violation becomes one message. `Err` is returned only when
/// the contract itself cannot be compiled or the blocks cannot be encoded.
pub fn validate_non_study_time_blocks(blocks: &[NonStudyTimeBlock]) -> Result<ValidationResult> {
    let schema = serde_json::to_value(non_study_time_blocks_json_schema())?;
    let compiled = JSONSchema::compile(&schema).map_err(|err| PlanError::Schema(err.to_string()))?;
    let instance = serde_json::to_value(blocks)?;

    let mut result = ValidationResult::new();

    if let Err(errors) = compiled.validate(&instance) {
        for error in errors {
            let pointer = error.instance_path.to_string();
            result.push_error(describe_violation(&pointer, &error.to_string()));
        }
        return Ok(result);
    }

    if !blocks.iter().all(starts_before_end) {
        result.push_error("each non-study time block must start before it ends");
    }

    let mut seen = HashSet::new();
    if !blocks.iter().all(|block| seen.insert(dedup_key(block))) {
        result.push_error("non-study time blocks must not repeat the same time window and days");
    }

    Ok(result)
}

fn starts_before_end(block: &NonStudyTimeBlock) -> bool {
    match (
        parse_time_of_day(&block.start_time),
        parse_time_of_day(&block.end_time),
    ) {
        (Some(start), Some(end)) => start < end,
        _ => false,
    }
}

fn dedup_key(block: &NonStudyTimeBlock) -> (String, String, String) {
    let days = match &block.day_of_week {
        Some(days) if !days.is_empty() => days
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|day| day.to_string())
            .collect::<Vec<_>>()
            .join(","),
        _ => "all".to_string(),
    };
    (block.start_time.clone(), block.end_time.clone(), days)
}

/// Turn a JSON pointer such as `/2/start_time` into `non-study time block 3 (start_time)`.
fn describe_violation(pointer: &str, message: &str) -> String {
    let mut segments = pointer.split('/').filter(|segment| !segment.is_empty());
    let Some(index) = segments.next().and_then(|segment| segment.parse::<usize>().ok()) else {
        return format!("non-study time blocks: {message}");
    };
    let field = segments.collect::<Vec<_>>().join(".");
    if field.is_empty() {
        format!("non-study time block {}: {message}", index + 1)
    } else {
        format!("non-study time block {} ({field}): {message}", index + 1)
    }
}

fn day_of_week_schema(_: &mut SchemaGenerator) -> Schema {
    let day = SchemaObject {
        instance_type: Some(InstanceType::Integer.into()),
        number: Some(Box::new(NumberValidation {
            minimum: Some(0.0),
            maximum: Some(6.0),
            ..Default::default()
        })),
        ..Default::default()
    };

    SchemaObject {
        instance_type: Some(InstanceType::Array.into()),
        array: Some(Box::new(ArrayValidation {
            items: Some(Schema::Object(day).into()),
            ..Default::default()
        })),
        ..Default::default()
    }
    .into()
}
