//! # archtool-auth
//!
//! Caller identity for the diagram backend. Tokens are issued by the
//! external authentication service; this crate only verifies them and
//! extracts the principal id.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder};
