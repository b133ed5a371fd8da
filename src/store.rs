//! Validated mappings from paths to buckets.
//!
//! A [`Store`] is built once from a candidate mapping and validated eagerly.
//! Validation checks every key before reporting, so a rejected candidate
//! yields the complete set of offending keys and no partial store.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};
use stillwater::Validation;
use tracing::debug;

use crate::bucket::Bucket;
use crate::error::{StoreError, StoreFailure, StoreFailures};
use crate::path::Path;
use crate::rules::Rules;
use crate::subject::{self, PathLookup};
use crate::StoreValidation;

/// A validated mapping from [`Path`] to [`Bucket`].
///
/// Every key is a valid path under the store's [`Rules`] and every bucket is
/// a non-empty set of non-empty templates.
///
/// # Example
///
/// ```rust
/// use remarks::Store;
/// use serde_json::json;
///
/// let store = Store::ensure(&json!({
///     "%root%": ["{subject} must contain only 5 characters"],
///     "data.{email}": ["{subject} must have the gmail domain"],
/// }))
/// .unwrap();
/// assert_eq!(store.len(), 2);
///
/// let error = Store::ensure(&json!({
///     "gender.[name]": ["bad path"],
///     "data.{name}": "not a bucket",
/// }))
/// .unwrap_err();
/// assert_eq!(error.failures.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Store {
    entries: BTreeMap<Path, Bucket>,
    rules: Rules,
}

impl Store {
    /// Creates an empty store with the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given rules.
    pub fn with_rules(rules: Rules) -> Self {
        Self {
            entries: BTreeMap::new(),
            rules,
        }
    }

    /// Validates a candidate mapping, accumulating every failure.
    ///
    /// Each key is checked for path validity and bucket validity
    /// independently; one failure is reported per offending key.
    pub fn validation(value: &Value, rules: Rules) -> StoreValidation {
        let Some(object) = value.as_object() else {
            return Validation::Failure(StoreFailures::single(StoreFailure::NotAMapping));
        };

        let mut entries = BTreeMap::new();
        let mut failures = Vec::new();

        for (key, candidate) in object {
            let path = Path::ensure_with(key.as_str(), rules.token_order());
            let bucket = Bucket::ensure(candidate);

            match (path, bucket) {
                (Ok(path), Ok(bucket)) => {
                    entries.insert(path, bucket);
                }
                (path, bucket) => {
                    failures.extend(StoreFailure::for_entry(key, path.is_ok(), bucket.is_ok()));
                }
            }
        }

        finish(entries, failures, rules)
    }

    /// Returns every failure of a candidate mapping under the default rules.
    ///
    /// The set is empty iff the candidate is acceptable.
    pub fn validate(value: &Value) -> BTreeSet<StoreFailure> {
        Self::validate_with(value, Rules::default())
    }

    /// Returns every failure of a candidate mapping under `rules`.
    pub fn validate_with(value: &Value, rules: Rules) -> BTreeSet<StoreFailure> {
        match Self::validation(value, rules) {
            Validation::Success(_) => BTreeSet::new(),
            Validation::Failure(failures) => failures.into_iter().collect(),
        }
    }

    /// Returns true if the candidate mapping is acceptable under the default rules.
    pub fn is_valid(value: &Value) -> bool {
        Self::validate(value).is_empty()
    }

    /// Builds a store from a candidate mapping under the default rules.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] carrying every failure if any key is rejected.
    pub fn ensure(value: &Value) -> Result<Self, StoreError> {
        Self::ensure_with(value, Rules::default())
    }

    /// Builds a store from a candidate mapping under `rules`.
    pub fn ensure_with(value: &Value, rules: Rules) -> Result<Self, StoreError> {
        into_result(Self::validation(value, rules))
    }

    /// Builds a store from typed entries under the default rules.
    ///
    /// Entries repeating a path have their buckets united.
    ///
    /// # Example
    ///
    /// ```rust
    /// use remarks::Store;
    ///
    /// let store = Store::from_entries([
    ///     ("gender", vec!["{subject} is not a valid gender"]),
    ///     ("data.{email}", vec!["This is not a valid email address"]),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(store.len(), 2);
    /// ```
    pub fn from_entries<I, K, B, S>(entries: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (K, B)>,
        K: Into<String>,
        B: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_entries_with(entries, Rules::default())
    }

    /// Builds a store from typed entries under `rules`.
    pub fn from_entries_with<I, K, B, S>(entries: I, rules: Rules) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (K, B)>,
        K: Into<String>,
        B: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::with_rules(rules);
        let mut failures = Vec::new();

        for (key, messages) in entries {
            let key = key.into();
            let path = Path::ensure_with(key.as_str(), rules.token_order());
            let bucket = Bucket::from_messages(messages);

            match (path, bucket) {
                (Ok(path), Ok(bucket)) => store.insert_union(path, &bucket),
                (path, bucket) => {
                    failures.extend(StoreFailure::for_entry(&key, path.is_ok(), bucket.is_ok()));
                }
            }
        }

        into_result(finish(store.entries, failures, rules))
    }

    /// Returns the rules this store validates and renders with.
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Returns the bucket stored at `path`.
    pub fn get(&self, path: &Path) -> Option<&Bucket> {
        self.entries.get(path)
    }

    /// Returns true if a bucket is stored at `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Returns an iterator over the entries, sorted by path.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Bucket)> {
        self.entries.iter()
    }

    /// Returns the number of stored paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Infers the subject substitute of `path` against the current entries.
    pub fn subject_substitute(&self, path: &Path) -> Option<String> {
        subject::subject_substitute(path, &self.entries, self.rules.index_phrasing())
    }

    /// Returns the formatted messages stored at `path`.
    pub fn formatted(&self, path: &Path) -> Option<Vec<String>> {
        let bucket = self.entries.get(path)?;
        Some(bucket.format(self.subject_substitute(path).as_deref()))
    }

    /// Exports the raw templates as a JSON object keyed by path.
    ///
    /// The export is always accepted again by [`Store::ensure_with`] with the same rules.
    pub fn to_value(&self) -> Value {
        let object: Map<String, Value> = self
            .entries
            .iter()
            .map(|(path, bucket)| (path.to_string(), bucket.to_value()))
            .collect();
        Value::Object(object)
    }

    /// Unites `bucket` into whatever is stored at `path`.
    pub(crate) fn insert_union(&mut self, path: Path, bucket: &Bucket) {
        let merged = match self.entries.get(&path) {
            Some(existing) => existing.union(bucket),
            None => bucket.clone(),
        };
        self.entries.insert(path, merged);
    }

    /// Swaps in a whole new set of entries.
    pub(crate) fn replace_entries(&mut self, entries: BTreeMap<Path, Bucket>) {
        self.entries = entries;
    }
}

impl PathLookup for Store {
    fn paths(&self) -> Box<dyn Iterator<Item = &Path> + '_> {
        self.entries.paths()
    }

    fn contains_path(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }
}

impl AsRef<Store> for Store {
    fn as_ref(&self) -> &Store {
        self
    }
}

impl TryFrom<&Value> for Store {
    type Error = StoreError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::ensure(value)
    }
}

fn finish(
    entries: BTreeMap<Path, Bucket>,
    failures: Vec<StoreFailure>,
    rules: Rules,
) -> StoreValidation {
    match StoreFailures::from_vec(failures) {
        Some(failures) => Validation::Failure(failures),
        None => Validation::Success(Store { entries, rules }),
    }
}

fn into_result(validation: StoreValidation) -> Result<Store, StoreError> {
    match validation {
        Validation::Success(store) => Ok(store),
        Validation::Failure(failures) => {
            debug!(failures = failures.len(), "rejected store candidate");
            Err(StoreError::new(failures))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{TokenOrder, ROOT_PATH};
    use serde_json::json;

    fn path(value: &str) -> Path {
        Path::ensure(value).unwrap()
    }

    fn invalid_candidate() -> Value {
        json!({
            ROOT_PATH: [1, "Some complete message here"],
            "data.{name}": "Some complete message outside array",
            "gender.[name]": ["Some complete message outside collection"],
            "x..y": 5,
        })
    }

    #[test]
    fn test_validate_accepts_valid_candidate() {
        let candidate = json!({
            ROOT_PATH: [
                "This is seen as a complete message",
                "This {subject} message is also complete",
            ],
            "data.{name}": [
                "{subject} message is a partial message",
                "{subject} makes message partial",
            ],
        });

        assert!(Store::validate(&candidate).is_empty());
        assert!(Store::is_valid(&candidate));
    }

    #[test]
    fn test_validate_reports_every_key() {
        let failures = Store::validate(&invalid_candidate());

        let expected: BTreeSet<StoreFailure> = [
            StoreFailure::InvalidPath("gender.[name]".into()),
            StoreFailure::InvalidBucket("data.{name}".into()),
            StoreFailure::InvalidBucket(ROOT_PATH.into()),
            StoreFailure::InvalidPathAndBucket("x..y".into()),
        ]
        .into_iter()
        .collect();

        assert_eq!(failures, expected);
    }

    #[test]
    fn test_validate_rejects_non_mapping() {
        let failures = Store::validate(&json!(["not", "a", "mapping"]));
        assert_eq!(failures.into_iter().collect::<Vec<_>>(), vec![StoreFailure::NotAMapping]);
    }

    #[test]
    fn test_ensure_normalizes_buckets() {
        let store = Store::ensure(&json!({"gender": ["a", "a", "b"]})).unwrap();
        assert_eq!(store.get(&path("gender")).unwrap().len(), 2);
    }

    #[test]
    fn test_ensure_carries_all_failures() {
        let error = Store::ensure(&invalid_candidate()).unwrap_err();
        assert_eq!(error.failures.len(), 4);
        assert!(error.failures.mentions("x..y"));
        assert!(error.to_string().contains("'gender.[name]' is an invalid path"));
    }

    #[test]
    fn test_ensure_with_strict_rules() {
        let candidate = json!({"items.[0].name": ["{subject} is required"]});
        let strict = Rules::new().with_token_order(TokenOrder::Strict);

        assert!(Store::ensure(&candidate).is_ok());
        let failures = Store::validate_with(&candidate, strict);
        assert!(failures.contains(&StoreFailure::InvalidPath("items.[0].name".into())));
    }

    #[test]
    fn test_from_entries_unites_repeated_paths() {
        let store = Store::from_entries([("gender", vec!["a"]), ("gender", vec!["b", "a"])]).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&path("gender")).unwrap().len(), 2);
    }

    #[test]
    fn test_from_entries_reports_every_key() {
        let error = Store::from_entries([
            ("ok", vec!["fine"]),
            ("bad..path", vec!["fine"]),
            ("empty", vec![]),
        ])
        .unwrap_err();

        assert_eq!(error.failures.len(), 2);
        assert!(error.failures.mentions("bad..path"));
        assert!(error.failures.mentions("empty"));
    }

    #[test]
    fn test_exported_store_is_accepted_again() {
        let store = Store::ensure(&json!({
            ROOT_PATH: ["{subject} must be set"],
            "data.{email}": ["{subject} is invalid"],
        }))
        .unwrap();

        let again = Store::ensure(&store.to_value()).unwrap();
        assert_eq!(again, store);
    }

    #[test]
    fn test_formatted_reads_against_current_entries() {
        let store = Store::ensure(&json!({
            "data": ["{subject} is not a valid record instance"],
            "data.{email}": ["{subject} is not a valid email address"],
        }))
        .unwrap();

        assert_eq!(
            store.formatted(&path("data.{email}")).unwrap(),
            vec!["email in data is not a valid email address"]
        );
        assert_eq!(
            store.formatted(&path("data")).unwrap(),
            vec!["data is not a valid record instance"]
        );
        assert!(store.formatted(&path("missing")).is_none());
    }
}
