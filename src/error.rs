//! Form generation error types

use thiserror::Error;

/// Errors that can occur while building a form tree.
///
/// Unsupported field shapes and broken schema references are *not* errors:
/// they render as inline diagnostic placeholders so that the rest of the
/// form is still produced. An error here signals an internal inconsistency
/// between the classifier and the widget table and is meant to be caught at
/// the integration boundary.
#[derive(Debug, Error)]
pub enum FormError {
    /// The widget dispatched for a field kind found a type expression that
    /// the classifier should have ruled out
    #[error("widget contract violation at '{path}': {detail}")]
    ContractViolation { path: String, detail: String },
}

impl FormError {
    pub(crate) fn contract(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ContractViolation {
            path: path.into(),
            detail: detail.into(),
        }
    }
}
