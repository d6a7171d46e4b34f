//! Shared error taxonomy.
//!
//! Sub-crates define their own error enums and convert into/from `McppError`
//! via `From` impls, or wrap it as one variant. Both patterns are acceptable;
//! prefer whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error taxonomy, shared by every `mcpp-*` crate.
#[derive(Debug, Error)]
pub enum McppError {
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("seed ({r},{c}) is not a free cell")]
    SeedOutsideFree { r: usize, c: usize },

    #[error("agents at index {first} and {second} share seed ({r},{c})")]
    SeedCollision {
        first: usize,
        second: usize,
        r: usize,
        c: usize,
    },

    #[error("disconnected: {0}")]
    Disconnected(String),

    #[error("balance not reached within {max_iter} iterations")]
    BalanceUnreached { max_iter: usize },

    #[error("unsupported change: {0}")]
    UnsupportedChange(String),

    #[error("agent {0:?} not found")]
    NotFound(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Shorthand result type for all `mcpp-*` crates.
pub type McppResult<T> = Result<T, McppError>;
