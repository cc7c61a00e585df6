//! Diagram element binding entities.

pub mod model;

pub use model::{DiagramBinding, UpsertBinding};
