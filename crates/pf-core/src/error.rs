//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `PfError` as one variant
//! via `#[from]`, so configuration problems surface unchanged at the
//! orchestrator's API.

use thiserror::Error;

/// The base error type for `pf-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum PfError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `pf-*` crates.
pub type PfResult<T> = Result<T, PfError>;
