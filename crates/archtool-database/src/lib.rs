//! # archtool-database
//!
//! Durable storage for diagrams: connection management, migrations, the
//! [`DiagramStore`] and [`BindingIndex`] traits, and their PostgreSQL and
//! in-memory implementations.

pub mod backend;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

#[cfg(test)]
mod conformance;

pub use backend::Stores;
pub use connection::DatabasePool;
pub use store::{BindingIndex, DiagramStore};
