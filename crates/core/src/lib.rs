//! `invoicer-core` — shared building blocks for table hooks.
//!
//! This crate contains **pure** primitives (no IO, no host concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::RecordId;
