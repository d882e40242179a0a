//! Seams to the external storage collaborator.

mod classification_source;
mod gold_source;

pub use classification_source::{ClassificationCursor, ClassificationSource};
pub use gold_source::{GoldMap, GoldSource};
