//! Configuration shared by a store and every composition applied to it.

use crate::path::TokenOrder;
use crate::subject::IndexPhrasing;

/// The switchable rules a store validates and renders with.
///
/// The defaults accept tokens in any order and render array elements by
/// their raw path.
///
/// # Example
///
/// ```rust
/// use remarks::{IndexPhrasing, Rules, TokenOrder};
///
/// let rules = Rules::new()
///     .with_token_order(TokenOrder::Strict)
///     .with_index_phrasing(IndexPhrasing::Positional);
///
/// assert_eq!(rules.token_order(), TokenOrder::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rules {
    token_order: TokenOrder,
    index_phrasing: IndexPhrasing,
}

impl Rules {
    /// Creates the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the token ordering rule used to validate paths.
    pub fn with_token_order(mut self, token_order: TokenOrder) -> Self {
        self.token_order = token_order;
        self
    }

    /// Sets how array elements are rendered as subjects.
    pub fn with_index_phrasing(mut self, index_phrasing: IndexPhrasing) -> Self {
        self.index_phrasing = index_phrasing;
        self
    }

    /// Returns the token ordering rule.
    pub fn token_order(&self) -> TokenOrder {
        self.token_order
    }

    /// Returns how array elements are rendered as subjects.
    pub fn index_phrasing(&self) -> IndexPhrasing {
        self.index_phrasing
    }
}
