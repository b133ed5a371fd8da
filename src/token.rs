//! Path token classification.
//!
//! A path is a dot-joined sequence of tokens. Each token is one of:
//!
//! - a **key** token, `{name}`, marking a field inside a record
//! - an **index** token, `[0]`, marking an element inside an array
//! - an **opaque** token, such as `data` or `gender`, carrying no structural type

use std::sync::LazyLock;

use regex::Regex;

/// The reserved token a message template starts with when its subject should
/// be inferred from the path it is stored under.
pub const SUBJECT_PLACEHOLDER: &str = "{subject}";

static KEY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{[a-z0-9_]+\}$").expect("key token pattern"));

static INDEX_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\d+\]$").expect("index token pattern"));

static OPAQUE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^.\{\}\[\]]+$").expect("opaque token pattern"));

/// The syntactic kind of a single path token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A record field, written `{name}`.
    Key,
    /// An array element, written `[n]`.
    Index,
    /// Any other segment.
    Opaque,
}

/// Classifies a single segment. Classification is total: anything that is not
/// a key or index token is opaque.
///
/// # Example
///
/// ```rust
/// use remarks::{classify, TokenKind};
///
/// assert_eq!(classify("{email}"), TokenKind::Key);
/// assert_eq!(classify("[3]"), TokenKind::Index);
/// assert_eq!(classify("data"), TokenKind::Opaque);
/// ```
pub fn classify(segment: &str) -> TokenKind {
    if KEY_TOKEN.is_match(segment) {
        TokenKind::Key
    } else if INDEX_TOKEN.is_match(segment) {
        TokenKind::Index
    } else {
        TokenKind::Opaque
    }
}

/// Returns true if the segment may appear in a path.
///
/// Opaque segments may not contain the structural delimiters, so `[name]` or
/// `{Name}` are rejected rather than passed through as opaque. The subject
/// placeholder is reserved and never a valid segment.
pub fn is_token(segment: &str) -> bool {
    if segment == SUBJECT_PLACEHOLDER {
        return false;
    }
    match classify(segment) {
        TokenKind::Key | TokenKind::Index => true,
        TokenKind::Opaque => OPAQUE_TOKEN.is_match(segment),
    }
}

/// Returns the field name of a key token with its braces stripped.
pub fn field_name(segment: &str) -> Option<&str> {
    match classify(segment) {
        TokenKind::Key => Some(&segment[1..segment.len() - 1]),
        _ => None,
    }
}

/// Returns the digits of an index token with its brackets stripped.
pub fn index_digits(segment: &str) -> Option<&str> {
    match classify(segment) {
        TokenKind::Index => Some(&segment[1..segment.len() - 1]),
        _ => None,
    }
}
