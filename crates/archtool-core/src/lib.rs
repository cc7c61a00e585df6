//! # archtool-core
//!
//! Core crate for the ArchTool diagram backend. Contains configuration
//! schemas, typed identifiers, pagination types, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other ArchTool crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
