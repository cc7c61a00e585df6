//! Convenience result type alias.

use crate::error::AppError;

/// A specialized `Result` type for ArchTool operations.
pub type AppResult<T> = Result<T, AppError>;
