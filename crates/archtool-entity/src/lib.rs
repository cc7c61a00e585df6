//! # archtool-entity
//!
//! Row models for the diagram store. Every struct here is either a
//! database row (deriving `sqlx::FromRow`) or the input of a store
//! operation.

pub mod binding;
pub mod diagram;

pub use binding::{DiagramBinding, UpsertBinding};
pub use diagram::{CreateDiagram, Diagram, DiagramFilter, DiagramVersion, UpdateDiagram};
