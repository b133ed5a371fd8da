//! Error values surfaced to callers.

use crate::error::failure::StoreFailures;

/// A supplied value is not a well-formed path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is an invalid path")]
pub struct PathError {
    /// The rejected value.
    pub value: String,
}

impl PathError {
    /// Creates an error for the rejected value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A supplied value is not a valid bucket of message templates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{value} is an invalid bucket")]
pub struct BucketError {
    /// The rendering of the rejected value.
    pub value: String,
}

impl BucketError {
    /// Creates an error for the rendered rejected value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A supplied mapping failed store validation at one or more keys.
///
/// The error always carries every failure found, never just the first.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{failures}")]
pub struct StoreError {
    /// All failures found in the rejected mapping.
    pub failures: StoreFailures,
}

impl StoreError {
    /// Creates an error from the accumulated failures.
    pub fn new(failures: StoreFailures) -> Self {
        Self { failures }
    }
}

/// Any error raised by the composition API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Bucket(#[from] BucketError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Error>();
    assert_sync::<Error>();
};
