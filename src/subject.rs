//! Subject inference from the shape of stored paths.
//!
//! There is no schema. Whether a path denotes a record or an array is read off
//! the *immediate next token* of a deeper path stored alongside it: a key token
//! below `p` makes `p` a record, an index token makes it an array. The result
//! depends on every other path currently stored, so it is recomputed on every
//! read rather than cached.
//!
//! Inference only sees paths through the [`PathLookup`] trait.

use std::collections::{BTreeMap, BTreeSet};

use crate::path::Path;
use crate::token::{self, TokenKind};

/// The structural type inferred for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectType {
    /// A deeper path continues with a key token.
    Record,
    /// A deeper path continues with an index token.
    Array,
}

impl SubjectType {
    fn from_token(token: &str) -> Option<Self> {
        match token::classify(token) {
            TokenKind::Key => Some(SubjectType::Record),
            TokenKind::Index => Some(SubjectType::Array),
            TokenKind::Opaque => None,
        }
    }
}

/// How the subject of an array element is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexPhrasing {
    /// The raw path, `data.{emails}.[0]`.
    #[default]
    RawPath,
    /// `Item at index 0 in data.{emails}`.
    Positional,
}

/// Read access to the set of paths a subject is inferred against.
///
/// This trait keeps inference independent of the store types built on top of it.
pub trait PathLookup {
    /// Returns an iterator over every stored path.
    fn paths(&self) -> Box<dyn Iterator<Item = &Path> + '_>;

    /// Returns true if `path` is stored.
    fn contains_path(&self, path: &Path) -> bool;
}

impl<V> PathLookup for BTreeMap<Path, V> {
    fn paths(&self) -> Box<dyn Iterator<Item = &Path> + '_> {
        Box::new(self.keys())
    }

    fn contains_path(&self, path: &Path) -> bool {
        self.contains_key(path)
    }
}

impl PathLookup for BTreeSet<Path> {
    fn paths(&self) -> Box<dyn Iterator<Item = &Path> + '_> {
        Box::new(self.iter())
    }

    fn contains_path(&self, path: &Path) -> bool {
        self.contains(path)
    }
}

/// Returns the lexicographically smallest stored path below `path`.
///
/// Below the root only direct children count. Callers should rely on the type
/// the child implies, not on which sibling was picked.
pub fn first_child_path<'a, L>(path: &Path, lookup: &'a L) -> Option<&'a Path>
where
    L: PathLookup + ?Sized,
{
    lookup.paths().filter(|candidate| candidate.is_child_of(path)).min()
}

/// Infers whether `path` denotes a record or an array.
///
/// `hint_child` is used when it is a stored path below `path`; otherwise the
/// first stored child is looked up. Only the token right after `path` in that
/// child matters.
pub fn subject_type<L>(path: &Path, lookup: &L, hint_child: Option<&Path>) -> Option<SubjectType>
where
    L: PathLookup + ?Sized,
{
    let child = hint_child
        .filter(|hint| *hint != path && hint.is_child_of(path) && lookup.contains_path(hint))
        .or_else(|| first_child_path(path, lookup))?;

    child
        .next_token_after(path)
        .and_then(SubjectType::from_token)
}

/// Infers the type of the parent of `path`, using `path` itself as the child.
pub fn subject_parent_type<L>(path: &Path, lookup: &L) -> Option<SubjectType>
where
    L: PathLookup + ?Sized,
{
    let parent = path.parent()?;
    subject_type(&parent, lookup, Some(path))
}

/// Renders the phrase substituted for the subject placeholder of `path`.
///
/// Returns None for the root and for paths with no inferable type on either
/// side, in which case messages are capitalized instead. A field of a record
/// renders as `email in data`, an element of an array as
/// the raw path or `Item at index 0 in data.{emails}`, per `phrasing`.
/// Anything else falls back to the raw path.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeSet;
/// use remarks::{subject_substitute, IndexPhrasing, Path};
///
/// let paths: BTreeSet<Path> = ["data", "data.{email}"]
///     .into_iter()
///     .map(|p| Path::ensure(p).unwrap())
///     .collect();
///
/// let email = Path::ensure("data.{email}").unwrap();
/// assert_eq!(
///     subject_substitute(&email, &paths, IndexPhrasing::Positional).as_deref(),
///     Some("email in data")
/// );
/// ```
pub fn subject_substitute<L>(path: &Path, lookup: &L, phrasing: IndexPhrasing) -> Option<String>
where
    L: PathLookup + ?Sized,
{
    if path.is_root() {
        return None;
    }

    let own_type = subject_type(path, lookup, None);
    let parent_type = subject_parent_type(path, lookup);

    if own_type.is_none() && parent_type.is_none() {
        return None;
    }

    let last = path.last_token().unwrap_or_default();
    let parent = path.parent();

    let phrase = match (parent_type, phrasing) {
        (Some(SubjectType::Record), _) => {
            let field = token::field_name(last).unwrap_or(last);
            match parent {
                Some(parent) => format!("{} in {}", field, parent),
                None => field.to_string(),
            }
        }
        (Some(SubjectType::Array), IndexPhrasing::Positional) => {
            let index = token::index_digits(last).unwrap_or(last);
            match parent {
                Some(parent) => format!("Item at index {} in {}", index, parent),
                None => format!("Item at index {}", index),
            }
        }
        _ => path.to_string(),
    };

    Some(phrase)
}
