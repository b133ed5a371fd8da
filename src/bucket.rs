//! Buckets of message templates.
//!
//! A [`Bucket`] is the deduplicated set of message templates stored under one
//! path. Templates that start with [`SUBJECT_PLACEHOLDER`] have the placeholder
//! replaced at read time by a phrase describing the path's subject.

use indexmap::IndexSet;
use serde_json::Value;

use crate::error::BucketError;
use crate::token::SUBJECT_PLACEHOLDER;

/// A non-empty, deduplicated set of message templates.
///
/// Message identity is exact string equality: near-duplicate phrasings are
/// kept as distinct templates. Insertion order is kept for stable output.
///
/// # Example
///
/// ```rust
/// use remarks::Bucket;
///
/// let bucket = Bucket::from_messages(["{subject} must be a string"]).unwrap();
///
/// assert_eq!(bucket.format(None), vec!["Must be a string"]);
/// assert_eq!(bucket.format(Some("data.email")), vec!["data.email must be a string"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket(IndexSet<String>);

impl Bucket {
    /// Returns true if `value` is a non-empty JSON array of non-empty strings.
    pub fn is_valid(value: &Value) -> bool {
        match value {
            Value::Array(items) => {
                !items.is_empty()
                    && items
                        .iter()
                        .all(|item| item.as_str().is_some_and(|message| !message.is_empty()))
            }
            _ => false,
        }
    }

    /// Converts a JSON array of message strings into a bucket.
    ///
    /// # Errors
    ///
    /// Returns a [`BucketError`] naming the value if it is not a valid bucket.
    pub fn ensure(value: &Value) -> Result<Self, BucketError> {
        if !Self::is_valid(value) {
            return Err(BucketError::new(value.to_string()));
        }

        let messages = value
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();

        Ok(Self(messages))
    }

    /// Builds a bucket from message strings.
    ///
    /// # Errors
    ///
    /// Returns a [`BucketError`] if there are no messages or one of them is empty.
    pub fn from_messages<I, S>(messages: I) -> Result<Self, BucketError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();

        if messages.is_empty() || messages.iter().any(String::is_empty) {
            return Err(BucketError::new(format!("{:?}", messages)));
        }

        Ok(Self(messages.into_iter().collect()))
    }

    /// Returns a new bucket holding the templates of both buckets.
    pub fn union(&self, other: &Bucket) -> Self {
        Self(self.0.union(&other.0).cloned().collect())
    }

    /// Returns the number of distinct templates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the bucket holds no templates.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the bucket holds exactly this template.
    pub fn contains(&self, message: &str) -> bool {
        self.0.contains(message)
    }

    /// Returns an iterator over the raw templates.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the raw templates as a JSON array.
    pub fn to_value(&self) -> Value {
        Value::Array(self.0.iter().cloned().map(Value::String).collect())
    }

    /// Formats every template against a subject substitute.
    ///
    /// A template starting with the placeholder has its first occurrence
    /// replaced by `subject_substitute` (or nothing) and is trimmed. Without a
    /// substitute the result is also capitalized so it still reads as a
    /// sentence. Other templates pass through unchanged. Templates that format
    /// to the same string collapse into one.
    pub fn format(&self, subject_substitute: Option<&str>) -> Vec<String> {
        let mut formatted = IndexSet::with_capacity(self.0.len());

        for message in &self.0 {
            if !message.starts_with(SUBJECT_PLACEHOLDER) {
                formatted.insert(message.clone());
                continue;
            }

            let message = message
                .replacen(SUBJECT_PLACEHOLDER, subject_substitute.unwrap_or_default(), 1)
                .trim()
                .to_string();

            let message = match subject_substitute {
                Some(_) => message,
                None => capitalize(&message),
            };
            formatted.insert(message);
        }

        formatted.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Bucket {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
