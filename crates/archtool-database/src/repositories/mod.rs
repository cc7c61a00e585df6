//! PostgreSQL repository implementations.

pub mod binding;
pub mod diagram;

pub use binding::PgBindingRepository;
pub use diagram::PgDiagramRepository;

use archtool_core::error::{AppError, ErrorKind};

/// Wrap a sqlx error as a storage failure.
pub(crate) fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, message, e)
}

/// Escape `LIKE` wildcards so the term matches literally.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
