//! Composition of stores.
//!
//! A [`Sack`] owns a [`Store`] and lets independently built stores be merged
//! into one namespace or re-rooted under a new path, while the formatted read
//! projections keep inferring subjects against whatever is stored now.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::bucket::Bucket;
use crate::error::{Error, PathError, StoreError};
use crate::path::{Path, TokenOrder};
use crate::rules::Rules;
use crate::store::Store;

/// The composition and read API over a [`Store`].
///
/// `merge` and `mount` validate their arguments before touching the store, so
/// a rejected call leaves the sack unchanged. Reads recompute subjects on every
/// call.
///
/// # Example
///
/// ```rust
/// use remarks::{Sack, Store, ROOT_PATH};
/// use serde_json::json;
///
/// let mut sack = Sack::from_value(&json!({
///     ROOT_PATH: ["{subject} must contain only 5 chars"],
/// }))
/// .unwrap();
///
/// let other = Store::ensure(&json!({
///     ROOT_PATH: ["This is a complete message for new data"],
///     "{email}": ["{subject} must be registered"],
/// }))
/// .unwrap();
///
/// sack.merge(&other, Some("data")).unwrap();
///
/// let map = sack.map();
/// assert_eq!(map["data.{email}"], vec!["email in data must be registered"]);
/// assert_eq!(map[ROOT_PATH], vec!["Must contain only 5 chars"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sack {
    store: Store,
}

impl Sack {
    /// Creates an empty sack with the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sack with the given rules.
    pub fn with_rules(rules: Rules) -> Self {
        Self {
            store: Store::with_rules(rules),
        }
    }

    /// Wraps an existing store.
    pub fn from_store(store: Store) -> Self {
        Self { store }
    }

    /// Builds a sack from a candidate mapping under the default rules.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] carrying every failure of the candidate.
    pub fn from_value(value: &Value) -> Result<Self, StoreError> {
        Store::ensure(value).map(Self::from_store)
    }

    /// Builds a sack from a candidate mapping under `rules`.
    pub fn from_value_with(value: &Value, rules: Rules) -> Result<Self, StoreError> {
        Store::ensure_with(value, rules).map(Self::from_store)
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Consumes the sack, returning its store.
    pub fn into_store(self) -> Store {
        self.store
    }

    /// Returns the rules of the underlying store.
    pub fn rules(&self) -> Rules {
        self.store.rules()
    }

    /// Adds message templates at `path`, uniting them with any already there.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Path`] or [`Error::Bucket`] without mutating the sack.
    ///
    /// # Example
    ///
    /// ```rust
    /// use remarks::{Sack, ROOT_PATH};
    ///
    /// let mut sack = Sack::new();
    /// sack.add(ROOT_PATH, ["{subject} is incomplete"]).unwrap();
    /// sack.add("form.{name}", ["{subject} is required"]).unwrap();
    ///
    /// assert!(sack.add("form..name", ["oops"]).is_err());
    /// assert_eq!(sack.all().len(), 2);
    /// ```
    pub fn add<I, S>(&mut self, path: &str, messages: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = Path::ensure_with(path, self.rules().token_order())?;
        let bucket = Bucket::from_messages(messages)?;

        trace!(path = %path, messages = bucket.len(), "adding messages");
        self.store.insert_union(path, &bucket);
        Ok(())
    }

    /// Returns every formatted message, flattened across paths.
    pub fn all(&self) -> Vec<String> {
        self.map().into_values().flatten().collect()
    }

    /// Returns the formatted messages of every path.
    ///
    /// Subjects are inferred against the current store on every call.
    pub fn map(&self) -> IndexMap<String, Vec<String>> {
        self.store
            .iter()
            .map(|(path, bucket)| {
                let substitute = self.store.subject_substitute(path);
                (path.to_string(), bucket.format(substitute.as_deref()))
            })
            .collect()
    }

    /// Returns the formatted projection as a JSON object.
    pub fn to_value(&self) -> Value {
        let object: Map<String, Value> = self
            .map()
            .into_iter()
            .map(|(path, messages)| {
                let messages = messages.into_iter().map(Value::String).collect();
                (path, Value::Array(messages))
            })
            .collect();
        Value::Object(object)
    }

    /// Merges another store (or sack) into this one.
    ///
    /// Without a mount path every key is kept as is. With one, the source root
    /// lands on `mount_path` and every other key `k` on `mount_path.k`. Buckets
    /// landing on an existing key are united with it.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] if `mount_path` or any destination key is not a
    /// valid path under this sack's rules. Nothing is merged in that case.
    pub fn merge<S>(&mut self, source: &S, mount_path: Option<&str>) -> Result<(), PathError>
    where
        S: AsRef<Store> + ?Sized,
    {
        let source = source.as_ref();
        let order = self.rules().token_order();

        let mount = mount_path
            .map(|mount| Path::ensure_with(mount, order))
            .transpose()?;

        let destinations = source
            .iter()
            .map(|(path, bucket)| -> Result<_, PathError> {
                let destination = match &mount {
                    Some(mount) => revalidate(path.mounted_under(mount), order)?,
                    None => revalidate(path.clone(), order)?,
                };
                Ok((destination, bucket))
            })
            .collect::<Result<Vec<_>, PathError>>()?;

        debug!(
            entries = destinations.len(),
            mount = mount_path.unwrap_or_default(),
            "merging store"
        );

        for (destination, bucket) in destinations {
            trace!(path = %destination, "merged");
            self.store.insert_union(destination, bucket);
        }
        Ok(())
    }

    /// Validates a candidate mapping as a store, then merges it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the candidate is rejected, or
    /// [`Error::Path`] if the mount path is. Nothing is merged in either case.
    pub fn merge_value(&mut self, value: &Value, mount_path: Option<&str>) -> Result<(), Error> {
        let source = Store::ensure_with(value, self.rules())?;
        self.merge(&source, mount_path)?;
        Ok(())
    }

    /// Re-roots every stored path under `path`.
    ///
    /// The root key becomes `path` and every other key `k` becomes `path.k`.
    /// Buckets are moved unchanged. Mounting under the root sentinel is
    /// allowed and keeps the sentinel as a leading segment.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] if `path` (or a resulting key) is invalid; the
    /// sack is left unchanged.
    pub fn mount(&mut self, path: &str) -> Result<(), PathError> {
        let order = self.rules().token_order();
        let mount = Path::ensure_with(path, order)?;

        let entries = self
            .store
            .iter()
            .map(|(path, bucket)| -> Result<_, PathError> {
                let destination = revalidate(path.mounted_under(&mount), order)?;
                Ok((destination, bucket.clone()))
            })
            .collect::<Result<BTreeMap<_, _>, PathError>>()?;

        debug!(entries = entries.len(), mount = %mount, "mounting store");
        self.store.replace_entries(entries);
        Ok(())
    }
}

impl AsRef<Store> for Sack {
    fn as_ref(&self) -> &Store {
        &self.store
    }
}

impl From<Store> for Sack {
    fn from(store: Store) -> Self {
        Self::from_store(store)
    }
}

/// Checks a rewritten key against the destination ordering rule.
fn revalidate(path: Path, order: TokenOrder) -> Result<Path, PathError> {
    if Path::is_valid_with(path.as_str(), order) {
        Ok(path)
    } else {
        Err(PathError::new(path))
    }
}
