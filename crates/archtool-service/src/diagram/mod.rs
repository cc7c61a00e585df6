//! Diagram documents and their revision history.

pub mod service;
pub mod version;

pub use service::{DiagramService, EditDiagram, NewDiagram};
pub use version::VersionService;
