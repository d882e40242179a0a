//! A single worker label event.
//!
//! Classifications arrive either as database rows (`from_json`) or as live
//! event payloads (`from_panoptes`). Both parsers validate every field and
//! report the offending key; nothing is coerced.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ClassificationError;
use crate::models::{Label, SubjectId, UserId};

/// One worker's label for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub user: UserId,
    pub subject: SubjectId,
    pub annotation: Label,
    /// Expert label shipped with the event, if the source knows it.
    #[serde(default)]
    pub gold: Option<Label>,
}

impl Classification {
    pub fn new(user: impl Into<UserId>, subject: impl Into<SubjectId>, annotation: Label) -> Self {
        Self {
            user: user.into(),
            subject: subject.into(),
            annotation,
            gold: None,
        }
    }

    pub fn with_gold(mut self, gold: Label) -> Self {
        self.gold = Some(gold);
        self
    }

    /// Build a classification from a database row.
    ///
    /// Required keys: `user_id`, `session_id`, `subject_id`, `annotation`.
    /// A null `user_id` falls back to the anonymous `session_id`.
    /// `gold_label`, when present and not null, must be 0 or 1.
    pub fn from_json(row: &Value) -> Result<Self, ClassificationError> {
        for key in ["user_id", "session_id", "subject_id", "annotation"] {
            if row.get(key).is_none() {
                return Err(ClassificationError::missing(key));
            }
        }

        let user = match &row["user_id"] {
            Value::Null => parse_id("session_id", &row["session_id"])?,
            other => parse_id("user_id", other)?,
        };
        let subject = parse_id("subject_id", &row["subject_id"])?;
        let annotation = parse_label("annotation", &row["annotation"])?;
        let gold = match row.get("gold_label") {
            None | Some(Value::Null) => None,
            Some(v) => Some(parse_label("gold_label", v)?),
        };

        Ok(Self {
            user: UserId(user),
            subject: SubjectId(subject),
            annotation,
            gold,
        })
    }

    /// Build a classification from a live event payload of the form
    /// `{user_id, subject_id, annotations: {task: [{value}]}}`.
    ///
    /// Only the first task's first answer is read.
    pub fn from_panoptes(event: &Value) -> Result<Self, ClassificationError> {
        let user = event
            .get("user_id")
            .ok_or_else(|| ClassificationError::missing("user_id"))?;
        let subject = event
            .get("subject_id")
            .ok_or_else(|| ClassificationError::missing("subject_id"))?;
        let annotations = event
            .get("annotations")
            .ok_or_else(|| ClassificationError::missing("annotations"))?;

        let value = annotations
            .as_object()
            .and_then(|tasks| tasks.values().next())
            .and_then(|answers| answers.get(0))
            .and_then(|answer| answer.get("value"))
            .ok_or_else(|| ClassificationError::missing("annotations.value"))?;

        Ok(Self {
            user: UserId(parse_id("user_id", user)?),
            subject: SubjectId(parse_id("subject_id", subject)?),
            annotation: parse_label("annotation", value)?,
            gold: None,
        })
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "user {} subject {} annotation {}",
            self.user, self.subject, self.annotation
        )
    }
}

fn parse_id(field: &str, value: &Value) -> Result<String, ClassificationError> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
        other => Err(ClassificationError::invalid(field, "id", json_type(other))),
    }
}

fn parse_label(field: &str, value: &Value) -> Result<Label, ClassificationError> {
    match value.as_i64() {
        Some(n) => Label::parse(field, n),
        None => Err(ClassificationError::invalid(field, "int", json_type(value))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(s) if s.is_empty() => "empty string",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
