//! Domain types and wire protocol shared by the dial game client crates.

pub mod domain;
pub mod error;
pub mod protocol;

pub use error::{DomainError, ServerError};
