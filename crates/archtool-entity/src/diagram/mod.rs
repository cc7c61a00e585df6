//! Diagram document entities.

pub mod model;
pub mod version;

pub use model::{CreateDiagram, Diagram, DiagramFilter, UpdateDiagram};
pub use version::DiagramVersion;
