//! Opaque agent identities.
//!
//! Subjects and users are keyed by strings so that numeric database ids,
//! worker names, and anonymous session ids share one representation.
//!
//! # Examples
//!
//! ```
//! use swap_core::models::{SubjectId, UserId};
//!
//! assert_eq!(SubjectId::from(2149031u64).to_string(), "2149031");
//! assert_eq!(UserId::from("HTMAMR38").0, "HTMAMR38");
//! ```

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n.to_string())
            }
        }

        impl From<i64> for $name {
            fn from(n: i64) -> Self {
                Self(n.to_string())
            }
        }
    };
}

string_id!(
    /// Identity of a labelled item.
    SubjectId
);

string_id!(
    /// Identity of a worker: a registered user name or an anonymous session.
    UserId
);
