//! HTTP request handlers, one module per resource.

pub mod binding;
pub mod diagram;
pub mod health;
pub mod version;
