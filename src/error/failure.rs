//! Per-key store validation failures.
//!
//! This module provides [`StoreFailure`], the reason one key of a candidate
//! store was rejected, and [`StoreFailures`], a non-empty accumulation of them.

use std::fmt::{self, Display};

use stillwater::prelude::*;

/// The reason a candidate store, or one of its keys, was rejected.
///
/// Variants are ordered so that a set of failures lists the same way no matter
/// in which order the keys were checked.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StoreFailure {
    /// The candidate is not a mapping at all.
    NotAMapping,
    /// The key is not a valid path; its bucket is fine.
    InvalidPath(String),
    /// The key is a valid path mapped to an invalid bucket.
    InvalidBucket(String),
    /// Both the key and its bucket are invalid.
    InvalidPathAndBucket(String),
}

impl StoreFailure {
    /// Builds the failure for one entry from its two independent checks.
    ///
    /// Returns None when both checks passed.
    pub fn for_entry(key: &str, path_is_valid: bool, bucket_is_valid: bool) -> Option<Self> {
        match (path_is_valid, bucket_is_valid) {
            (true, true) => None,
            (false, true) => Some(StoreFailure::InvalidPath(key.to_string())),
            (true, false) => Some(StoreFailure::InvalidBucket(key.to_string())),
            (false, false) => Some(StoreFailure::InvalidPathAndBucket(key.to_string())),
        }
    }

    /// Returns the offending key, or None when the whole candidate was rejected.
    pub fn key(&self) -> Option<&str> {
        match self {
            StoreFailure::NotAMapping => None,
            StoreFailure::InvalidPath(key)
            | StoreFailure::InvalidBucket(key)
            | StoreFailure::InvalidPathAndBucket(key) => Some(key),
        }
    }
}

impl Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreFailure::NotAMapping => write!(f, "store must be a mapping of paths to buckets"),
            StoreFailure::InvalidPath(key) => write!(f, "'{}' is an invalid path", key),
            StoreFailure::InvalidBucket(key) => {
                write!(f, "'{}' is mapped to an invalid bucket", key)
            }
            StoreFailure::InvalidPathAndBucket(key) => {
                write!(f, "'{}' is an invalid path mapped to an invalid bucket", key)
            }
        }
    }
}

/// A non-empty collection of store failures.
///
/// `StoreFailures` implements `Semigroup`, so failures found while checking
/// separate parts of a candidate combine into one report:
///
/// ```rust
/// use remarks::{StoreFailure, StoreFailures};
/// use stillwater::prelude::*;
///
/// let a = StoreFailures::single(StoreFailure::InvalidPath("a..b".into()));
/// let b = StoreFailures::single(StoreFailure::InvalidBucket("c".into()));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StoreFailures(NonEmptyVec<StoreFailure>);

impl StoreFailures {
    /// Creates a collection holding a single failure.
    pub fn single(failure: StoreFailure) -> Self {
        Self(NonEmptyVec::singleton(failure))
    }

    /// Creates a collection from a vec, or None if the vec is empty.
    pub fn from_vec(failures: Vec<StoreFailure>) -> Option<Self> {
        let mut failures = failures.into_iter();
        let first = Self::single(failures.next()?);
        Some(failures.fold(first, |acc, failure| acc.combine(Self::single(failure))))
    }

    /// Returns the number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection holds at least one failure.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the failures.
    pub fn iter(&self) -> impl Iterator<Item = &StoreFailure> {
        self.0.iter()
    }

    /// Returns true if some failure names `key`.
    pub fn mentions(&self, key: &str) -> bool {
        self.0.iter().any(|failure| failure.key() == Some(key))
    }

    /// Converts this collection into a `Vec<StoreFailure>`.
    pub fn into_vec(self) -> Vec<StoreFailure> {
        self.0.into_vec()
    }
}

impl Semigroup for StoreFailures {
    fn combine(self, other: Self) -> Self {
        StoreFailures(self.0.combine(other.0))
    }
}

impl Display for StoreFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Encountered {} store issue(s):", self.len())?;
        for failure in self.iter() {
            writeln!(f, "  [!] {}", failure)?;
        }
        Ok(())
    }
}

impl IntoIterator for StoreFailures {
    type Item = StoreFailure;
    type IntoIter = std::vec::IntoIter<StoreFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<StoreFailures>();
    assert_sync::<StoreFailures>();
};
