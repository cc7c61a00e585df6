//! # archtool-service
//!
//! Use-case layer of the diagram backend. Each service checks its inputs,
//! records who is acting, and delegates to the store traits from
//! `archtool-database`.
//!
//! Services follow constructor injection; the stores are passed in as
//! `Arc<dyn ...>` handles at construction time.

pub mod binding;
pub mod context;
pub mod diagram;

pub use binding::{BindElement, BindingService};
pub use context::RequestContext;
pub use diagram::{DiagramService, EditDiagram, NewDiagram, VersionService};
