//! Paths locating messages inside a validated structure.
//!
//! This module provides [`Path`], a validated dot-joined sequence of tokens
//! (or the [`ROOT_PATH`] sentinel), and the [`TokenOrder`] switch that decides
//! whether opaque tokens may follow structural ones.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::PathError;
use crate::token::{self, TokenKind};

/// The sentinel naming the structure as a whole.
pub const ROOT_PATH: &str = "%root%";

/// Ordering rule applied to the tokens of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenOrder {
    /// Key, index and opaque tokens may appear in any order.
    #[default]
    Permissive,
    /// An opaque token may not follow a key or index token (`{user}.name` is rejected).
    Strict,
}

/// A validated path such as `data.{user}.{emails}.[0]`, or the root sentinel.
///
/// Paths are immutable values. Equality and ordering are plain string
/// equality and ordering, so a sorted collection of paths lists every parent
/// before its children.
///
/// # Example
///
/// ```rust
/// use remarks::Path;
///
/// let path = Path::ensure("data.{user}").unwrap();
/// assert_eq!(path.to_string(), "data.{user}");
/// assert_eq!(path.parent().unwrap().as_str(), "data");
///
/// assert!(Path::ensure("data..{user}").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(String);

impl Path {
    /// Returns the root path.
    pub fn root() -> Self {
        Self(ROOT_PATH.to_string())
    }

    /// Returns true if `value` is a valid path under the permissive token order.
    pub fn is_valid(value: &str) -> bool {
        Self::is_valid_with(value, TokenOrder::Permissive)
    }

    /// Returns true if `value` is the root sentinel or a non-empty dot-joined
    /// sequence of tokens obeying `order`.
    pub fn is_valid_with(value: &str, order: TokenOrder) -> bool {
        if value == ROOT_PATH {
            return true;
        }

        let mut previous: Option<TokenKind> = None;
        for segment in value.split('.') {
            if !token::is_token(segment) {
                return false;
            }

            let kind = token::classify(segment);
            if order == TokenOrder::Strict
                && kind == TokenKind::Opaque
                && matches!(previous, Some(TokenKind::Key | TokenKind::Index))
            {
                return false;
            }
            previous = Some(kind);
        }

        true
    }

    /// Validates `value` under the permissive token order and returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] naming the rejected value.
    pub fn ensure(value: impl Into<String>) -> Result<Self, PathError> {
        Self::ensure_with(value, TokenOrder::Permissive)
    }

    /// Validates `value` under `order` and returns it unchanged.
    pub fn ensure_with(value: impl Into<String>, order: TokenOrder) -> Result<Self, PathError> {
        let value = value.into();
        if Self::is_valid_with(&value, order) {
            Ok(Self(value))
        } else {
            Err(PathError::new(value))
        }
    }

    /// Returns true if this is the root sentinel.
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_PATH
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns an iterator over the tokens. The root has no tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        let tokens = if self.is_root() { "" } else { self.0.as_str() };
        tokens.split('.').filter(|token| !token.is_empty())
    }

    /// Returns the last token, or None for the root.
    pub fn last_token(&self) -> Option<&str> {
        self.tokens().last()
    }

    /// Returns the path without its last token.
    ///
    /// A single-token path has no parent, and neither does the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        self.0
            .rsplit_once('.')
            .map(|(parent, _)| Self(parent.to_string()))
    }

    /// Returns true if `self` lies strictly below `ancestor`.
    ///
    /// Below the root means a direct child (a single-token path) or a path
    /// that keeps the sentinel as its leading segment, as left by mounting
    /// onto the root.
    pub fn is_child_of(&self, ancestor: &Path) -> bool {
        if self.is_root() {
            return false;
        }
        if ancestor.is_root() {
            return !self.0.contains('.') || self.after_root_segment().is_some();
        }
        self.0.len() > ancestor.0.len() + 1
            && self.0.starts_with(ancestor.as_str())
            && self.0.as_bytes()[ancestor.0.len()] == b'.'
    }

    /// Returns the token immediately after `ancestor` in this path, if `self`
    /// lies below it.
    pub fn next_token_after(&self, ancestor: &Path) -> Option<&str> {
        if !self.is_child_of(ancestor) {
            return None;
        }
        let rest = if ancestor.is_root() {
            self.after_root_segment().unwrap_or(self.0.as_str())
        } else {
            &self.0[ancestor.0.len() + 1..]
        };
        rest.split('.').next()
    }

    /// Returns the rest of a path whose leading segment is the root sentinel.
    fn after_root_segment(&self) -> Option<&str> {
        self.0
            .strip_prefix(ROOT_PATH)
            .and_then(|rest| rest.strip_prefix('.'))
            .filter(|rest| !rest.is_empty())
    }

    /// Returns this path re-rooted under `mount`.
    ///
    /// The root becomes `mount` itself, every other path `p` becomes `mount.p`.
    /// Mounting under the root sentinel keeps the sentinel as a leading segment.
    pub fn mounted_under(&self, mount: &Path) -> Self {
        if self.is_root() {
            mount.clone()
        } else {
            Self(format!("{}.{}", mount.0, self.0))
        }
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ensure(s)
    }
}

impl TryFrom<&str> for Path {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ensure(value)
    }
}

impl TryFrom<String> for Path {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::ensure(value)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(value: &str) -> Path {
        Path::ensure(value).unwrap()
    }

    #[test]
    fn test_root_is_valid() {
        assert!(Path::is_valid(ROOT_PATH));
        assert!(Path::root().is_root());
        assert_eq!(Path::root().tokens().count(), 0);
    }

    #[test]
    fn test_valid_paths() {
        for value in [
            "gender",
            "data.{name}",
            "users.[0].{email}",
            "[0].[1]",
            "{a}.b.[2]",
            "%root%.{email}",
        ] {
            assert!(Path::is_valid(value), "{value} should be valid");
        }
    }

    #[test]
    fn test_invalid_paths() {
        for value in [
            "",
            ".",
            "data.",
            ".data",
            "data..{name}",
            "users.[i]",
            "gender.[name]",
            "user.{Name}",
            "data.{subject}",
        ] {
            assert!(!Path::is_valid(value), "{value:?} should be invalid");
        }
    }

    #[test]
    fn test_strict_order_rejects_opaque_after_structural_tokens() {
        assert!(Path::is_valid_with("data.{user}.[0]", TokenOrder::Strict));
        assert!(!Path::is_valid_with("{user}.name", TokenOrder::Strict));
        assert!(!Path::is_valid_with("items.[0].name", TokenOrder::Strict));
        assert!(Path::is_valid_with("items.[0].name", TokenOrder::Permissive));
    }

    #[test]
    fn test_ensure_returns_value_unchanged() {
        assert_eq!(path("data.{user}").as_str(), "data.{user}");
    }

    #[test]
    fn test_ensure_error_names_value() {
        let error = Path::ensure("users.[i]").unwrap_err();
        assert_eq!(error.to_string(), "'users.[i]' is an invalid path");
    }

    #[test]
    fn test_parent() {
        assert_eq!(path("a.{b}.[0]").parent(), Some(path("a.{b}")));
        assert_eq!(path("a").parent(), None);
        assert_eq!(Path::root().parent(), None);
    }

    #[test]
    fn test_is_child_of() {
        assert!(path("data.{user}").is_child_of(&path("data")));
        assert!(path("data.{user}.[0]").is_child_of(&path("data")));
        assert!(!path("database").is_child_of(&path("data")));
        assert!(!path("data").is_child_of(&path("data")));

        assert!(path("data").is_child_of(&Path::root()));
        assert!(!path("data.{user}").is_child_of(&Path::root()));
        assert!(!Path::root().is_child_of(&Path::root()));

        assert!(path("%root%.{title}").is_child_of(&Path::root()));
        assert!(path("%root%.data.{email}").is_child_of(&Path::root()));
        assert!(!path("%rootish.{title}").is_child_of(&Path::root()));
    }

    #[test]
    fn test_next_token_after() {
        let leaf = path("data.{user}.{emails}.[0]");
        assert_eq!(leaf.next_token_after(&path("data")), Some("{user}"));
        assert_eq!(leaf.next_token_after(&path("data.{user}.{emails}")), Some("[0]"));
        assert_eq!(leaf.next_token_after(&path("other")), None);
        assert_eq!(path("data").next_token_after(&Path::root()), Some("data"));
        assert_eq!(
            path("%root%.{title}").next_token_after(&Path::root()),
            Some("{title}")
        );
    }

    #[test]
    fn test_mounted_under() {
        let mount = path("report");
        assert_eq!(Path::root().mounted_under(&mount), mount);
        assert_eq!(path("{title}").mounted_under(&mount), path("report.{title}"));
        assert_eq!(
            path("{title}").mounted_under(&Path::root()).as_str(),
            "%root%.{title}"
        );
    }
}
