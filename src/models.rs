use crate::aggregate::Aggregation;
use crate::chart::ChartData;
use crate::coerce::{self, Scalar};
use crate::errors::CoerceError;
use serde::{Deserialize, Serialize, Serializer};

pub const DEFAULT_IMPORTANCE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecord {
    pub activity: String,
    pub scale: Option<i64>,
    #[serde(serialize_with = "whole_numbers_without_fraction")]
    pub importance: f64,
}

impl ActivityRecord {
    pub fn new(activity: impl Into<String>, scale: Option<i64>, importance: f64) -> Self {
        Self {
            activity: activity.into(),
            scale,
            importance,
        }
    }

    /// A record counts toward the chart when it is rated and its importance is
    /// finite and non-zero.
    pub fn is_eligible(&self) -> bool {
        self.scale.is_some() && self.importance != 0.0 && self.importance.is_finite()
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Activity(activity) => self.activity = activity,
            FieldUpdate::Scale(scale) => self.scale = scale,
            FieldUpdate::Importance(importance) => self.importance = importance,
        }
    }
}

impl Default for ActivityRecord {
    fn default() -> Self {
        Self::new("", None, DEFAULT_IMPORTANCE)
    }
}

// Keeps exported YAML reading `importance: 70` rather than `70.0`.
fn whole_numbers_without_fraction<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Activity,
    Scale,
    Importance,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Activity(String),
    Scale(Option<i64>),
    Importance(f64),
}

impl FieldUpdate {
    pub fn coerce(field: FieldName, value: Scalar<'_>) -> Result<Self, CoerceError> {
        Ok(match field {
            FieldName::Activity => FieldUpdate::Activity(coerce::activity(value)?),
            FieldName::Scale => FieldUpdate::Scale(coerce::scale(value)?),
            FieldName::Importance => FieldUpdate::Importance(coerce::importance(value)),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub field: FieldName,
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub version: u64,
    pub activities: Vec<ActivityRecord>,
    pub aggregation: Aggregation,
    pub chart: ChartData,
    pub chart_svg: String,
}
