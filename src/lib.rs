//! # Remarks
//!
//! Accumulates human-readable validation messages keyed by the *path* they
//! apply to, and fills in each message's subject from the shape of the paths
//! stored alongside it.
//!
//! ## Overview
//!
//! Messages are stored as templates. A template that starts with
//! [`SUBJECT_PLACEHOLDER`] is completed at read time with a phrase inferred
//! purely from neighboring paths, with no schema: `data.{email}` next to
//! `data` reads as `email in data`. Array elements such as `tags.[0]` read
//! as their raw path, or as `Item at index 0 in tags` under
//! [`IndexPhrasing::Positional`]. Messages on the root read as capitalized
//! sentences.
//!
//! ## Core Types
//!
//! - [`Path`]: a validated dot-joined path of key (`{name}`), index (`[0]`) and opaque tokens
//! - [`Bucket`]: the deduplicated message templates stored under one path
//! - [`Store`]: a validated mapping of paths to buckets, rejected as a whole with every failure listed
//! - [`Sack`]: merge, mount and formatted read projections over a store
//! - [`Rules`]: the switchable token-order and array-phrasing rules
//!
//! ## Example
//!
//! ```rust
//! use remarks::{Sack, ROOT_PATH};
//! use serde_json::json;
//!
//! let sack = Sack::from_value(&json!({
//!     ROOT_PATH: ["{subject} must contain only 5 characters"],
//!     "data": ["{subject} is not a valid record instance"],
//!     "data.{email}": ["{subject} must have the gmail domain"],
//! }))
//! .unwrap();
//!
//! let map = sack.map();
//! assert_eq!(map[ROOT_PATH], vec!["Must contain only 5 characters"]);
//! assert_eq!(map["data"], vec!["data is not a valid record instance"]);
//! assert_eq!(map["data.{email}"], vec!["email in data must have the gmail domain"]);
//! ```

pub mod bucket;
pub mod error;
pub mod path;
pub mod rules;
pub mod sack;
pub mod store;
pub mod subject;
pub mod token;

pub use bucket::Bucket;
pub use error::{BucketError, Error, PathError, StoreError, StoreFailure, StoreFailures};
pub use path::{Path, TokenOrder, ROOT_PATH};
pub use rules::Rules;
pub use sack::Sack;
pub use store::Store;
pub use subject::{
    first_child_path, subject_parent_type, subject_substitute, subject_type, IndexPhrasing,
    PathLookup, SubjectType,
};
pub use token::{classify, TokenKind, SUBJECT_PLACEHOLDER};

/// Type alias for store validation results.
pub type StoreValidation = stillwater::Validation<Store, StoreFailures>;
