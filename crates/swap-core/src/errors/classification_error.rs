/// Malformed classification input. Never silently coerced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassificationError {
    #[error("key {field} not found in classification")]
    MissingField { field: String },

    #[error("key {field} should be {expected} but is {found}")]
    InvalidValue {
        field: String,
        expected: String,
        found: String,
    },
}

impl ClassificationError {
    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    pub fn invalid(field: &str, expected: &str, found: impl ToString) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
