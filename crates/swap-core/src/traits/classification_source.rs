use crate::errors::SwapResult;
use crate::models::Classification;

/// An ordered, possibly blocking stream of classifications.
pub type ClassificationCursor = Box<dyn Iterator<Item = SwapResult<Classification>> + Send>;

/// Supplies classifications in processing order.
pub trait ClassificationSource {
    /// The historical dump, ordered by the source (e.g. classification id ascending).
    fn classifications(&self) -> SwapResult<ClassificationCursor>;

    /// Live classifications to process after the historical cursor is drained.
    /// The cursor ends when the live feed closes.
    fn live(&self) -> SwapResult<Option<ClassificationCursor>> {
        Ok(None)
    }
}
