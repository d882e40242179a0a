//! Span definitions per operation: classify, propagation, export.

/// Create a span around one classification.
#[macro_export]
macro_rules! classify_span {
    ($user:expr, $subject:expr) => {
        tracing::debug_span!("swap.classify", user = %$user, subject = %$subject)
    };
}

/// Create a span around a gold-label batch or change flush.
#[macro_export]
macro_rules! propagation_span {
    ($golds:expr) => {
        tracing::info_span!("swap.propagation", golds = $golds)
    };
}

/// Create a span around an export.
#[macro_export]
macro_rules! export_span {
    ($kind:expr, $subjects:expr) => {
        tracing::info_span!("swap.export", kind = $kind, subjects = $subjects)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const CLASSIFY: &str = "swap.classify";
    pub const PROPAGATION: &str = "swap.propagation";
    pub const EXPORT: &str = "swap.export";
}
