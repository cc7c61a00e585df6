//! Custom Axum extractors.

pub mod caller;
pub mod if_match;
pub mod json;
pub mod pagination;
pub mod path;
pub mod query;

pub use caller::Caller;
pub use if_match::IfMatch;
pub use json::ValidatedJson;
pub use pagination::LimitOffsetParams;
pub use query::QueryParams;
