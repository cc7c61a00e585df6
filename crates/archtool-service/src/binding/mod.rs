//! Element-to-object bindings.

pub mod service;

pub use service::{BindElement, BindingService};
