//! Error types for path, bucket and store validation.
//!
//! This module provides the single-value errors [`PathError`] and
//! [`BucketError`], the per-key [`StoreFailure`] reasons accumulated into
//! [`StoreFailures`], and the [`StoreError`] raised when a store is rejected.

mod failure;
mod kinds;

pub use failure::{StoreFailure, StoreFailures};
pub use kinds::{BucketError, Error, PathError, StoreError};
