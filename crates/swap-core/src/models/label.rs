use serde::{Deserialize, Serialize};

use crate::errors::ClassificationError;

/// A binary label. `Real` is the class of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
pub enum Label {
    Bogus = 0,
    Real = 1,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Bogus, Label::Real];

    /// Parse an integer label, naming `field` in the error.
    pub fn parse(field: &str, value: i64) -> Result<Self, ClassificationError> {
        match value {
            0 => Ok(Self::Bogus),
            1 => Ok(Self::Real),
            other => Err(ClassificationError::invalid(field, "0 or 1", other)),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Export encoding of an optional gold label: -1 unknown, else 0/1.
    pub fn gold_code(gold: Option<Label>) -> i8 {
        gold.map_or(-1, |g| g as i8)
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label as u8
    }
}

impl TryFrom<i64> for Label {
    type Error = ClassificationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Label::parse("label", value)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", *self as u8)
    }
}
