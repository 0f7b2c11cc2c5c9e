//! Configuration options for ranking.
//!
//! [`MatcherOptions`] adjusts how [`rank_with_options`](crate::rank_with_options)
//! filters and truncates its output. The defaults reproduce plain
//! [`rank`](crate::rank): every product with at least one matching tag.

/// Options that control which ranked products are returned.
///
/// # Defaults
///
/// - `min_score`: `1` (any product with a matching tag)
/// - `limit`: `None` (no truncation)
///
/// # Examples
///
/// ```
/// use visual_matcher::MatcherOptions;
///
/// let opts = MatcherOptions::default();
/// assert_eq!(opts.min_score, 1);
/// assert_eq!(opts.limit, None);
///
/// // Keep only the five best matches.
/// let opts = MatcherOptions { limit: Some(5), ..Default::default() };
/// assert_eq!(opts.limit, Some(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherOptions {
    /// Smallest score a product needs to be returned. Values below `1` are
    /// treated as `1`; zero-score products are never returned.
    pub min_score: usize,

    /// Maximum number of results, applied after sorting.
    pub limit: Option<usize>,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            min_score: 1,
            limit: None,
        }
    }
}
