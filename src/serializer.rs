use crate::coerce::{self, Scalar};
use crate::errors::FormatError;
use crate::models::ActivityRecord;
use serde_yaml::Value;

pub const EXPORT_FILE_NAME: &str = "activities.yaml";
pub const EXPORT_CONTENT_TYPE: &str = "text/yaml; charset=utf-8";

/// Dumps the list as a YAML sequence, keeping record and field order.
pub fn serialize(records: &[ActivityRecord]) -> Result<String, FormatError> {
    serde_yaml::to_string(records).map_err(|err| FormatError::Emit(err.to_string()))
}

/// Reads a YAML sequence of activity mappings. Field values are coerced but not
/// range-checked, so an out-of-range scale comes back as-is.
pub fn parse(text: &str) -> Result<Vec<ActivityRecord>, FormatError> {
    let document: Value =
        serde_yaml::from_str(text).map_err(|err| FormatError::Parse(err.to_string()))?;

    let entries = match document {
        Value::Sequence(entries) => entries,
        other => return Err(FormatError::NotASequence(kind(&other))),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect()
}

fn parse_entry(index: usize, entry: &Value) -> Result<ActivityRecord, FormatError> {
    let entry = match entry {
        Value::Tagged(tagged) => &tagged.value,
        entry => entry,
    };
    if !entry.is_mapping() {
        return Err(FormatError::InvalidEntry {
            index,
            reason: format!("expected a mapping, found {}", kind(entry)),
        });
    }

    let invalid = |err: crate::errors::CoerceError| FormatError::InvalidEntry {
        index,
        reason: err.to_string(),
    };

    Ok(ActivityRecord {
        activity: coerce::activity(Scalar::from(entry.get("activity"))).map_err(invalid)?,
        scale: coerce::scale(Scalar::from(entry.get("scale"))).map_err(invalid)?,
        importance: coerce::importance(Scalar::from(entry.get("importance"))),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty document",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
