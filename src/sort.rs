//! Ordering of scored products.
//!
//! Results are ordered by score alone. There is no secondary
//! key: products with equal scores stay in catalog order, which relies on
//! the sort being stable.

use std::cmp::Ordering;

use crate::ranking::ScoredProduct;

/// Compare two scored products so that the higher score sorts first.
///
/// Returns [`Ordering::Equal`] for equal scores regardless of any other
/// field, leaving the tie to the stable sort in [`sort_scored`].
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use visual_matcher::{Product, ScoredProduct};
/// use visual_matcher::sort::compare_scores;
///
/// let p = Product::with_tags(1, "x", &["a"]);
/// let high = ScoredProduct { product: &p, index: 0, score: 3 };
/// let low = ScoredProduct { product: &p, index: 1, score: 1 };
///
/// assert_eq!(compare_scores(&high, &low), Ordering::Less);
/// assert_eq!(compare_scores(&low, &high), Ordering::Greater);
/// ```
pub fn compare_scores(a: &ScoredProduct<'_>, b: &ScoredProduct<'_>) -> Ordering {
    b.score.cmp(&a.score)
}

/// Sort scored products by score, descending, in place.
///
/// Uses [`slice::sort_by`], which is stable: equal-score products keep
/// the order they had on input (catalog order when called from
/// [`rank`](crate::ranking::rank)).
pub fn sort_scored(scored: &mut [ScoredProduct<'_>]) {
    scored.sort_by(compare_scores);
}
