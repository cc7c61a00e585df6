//! Typed path parameter helpers.

use archtool_core::error::AppError;
use archtool_core::types::{BindingId, DiagramId};

/// Parses a diagram id from a path segment.
pub fn parse_diagram_id(s: &str) -> Result<DiagramId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid diagram id: {s}")))
}

/// Parses a revision number from a path segment.
pub fn parse_revision(s: &str) -> Result<i32, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid revision: {s}")))
}

/// Parses a binding id from a path segment.
pub fn parse_binding_id(s: &str) -> Result<BindingId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid binding id: {s}")))
}
