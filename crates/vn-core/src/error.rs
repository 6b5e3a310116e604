//! Core error type.
//!
//! Higher crates define their own error enums and convert `CoreError` into
//! them via `From` impls.

use thiserror::Error;

/// Errors produced by `vn-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("cost {0} is neither a finite non-negative value nor a closed sentinel")]
    InvalidCost(f64),

    #[error("line geometry needs at least 2 vertices, got {0}")]
    DegenerateLine(usize),
}

/// Shorthand result type for `vn-core`.
pub type CoreResult<T> = Result<T, CoreError>;
