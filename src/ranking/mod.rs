//! Tag scoring and result ranking.
//!
//! A product's score is the number of its tags that contain at least one
//! search token as a substring, compared case-insensitively. A tag that
//! contains several tokens still counts once. [`rank`] scores the whole
//! catalog, drops zero-score products and orders the rest by score,
//! keeping catalog order among equal scores.

use memchr::memmem::Finder;
use serde::Serialize;
use tracing::debug;

use crate::catalog::Product;
use crate::options::MatcherOptions;
use crate::sort::sort_scored;

/// A product paired with its score for one search.
///
/// Borrows the product from the catalog; lives only as long as the search
/// response that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProduct<'a> {
    /// The matched catalog entry.
    #[serde(flatten)]
    pub product: &'a Product,
    /// Position of the product in the catalog.
    #[serde(skip)]
    pub index: usize,
    /// Number of the product's tags that matched at least one token.
    pub score: usize,
}

/// Pre-built substring searchers for a token list.
///
/// Built once per search so that each tag comparison is a handful of
/// `memmem` scans rather than fresh needle setup.
pub(crate) struct TokenSet<'t> {
    finders: Vec<Finder<'t>>,
    /// An empty token is contained in every tag.
    has_empty: bool,
}

impl<'t> TokenSet<'t> {
    pub(crate) fn new<S: AsRef<str>>(tokens: &'t [S]) -> Self {
        let mut has_empty = false;
        let mut finders = Vec::with_capacity(tokens.len());
        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                has_empty = true;
            } else {
                finders.push(Finder::new(token.as_bytes()));
            }
        }
        Self { finders, has_empty }
    }

    /// Whether any token occurs in `lowered_tag`.
    fn matches(&self, lowered_tag: &str) -> bool {
        self.has_empty
            || self
                .finders
                .iter()
                .any(|f| f.find(lowered_tag.as_bytes()).is_some())
    }

    /// Count the tags of `product` that contain at least one token.
    /// `buf` is reused for lowercasing.
    fn score(&self, product: &Product, buf: &mut String) -> usize {
        if !self.has_empty && self.finders.is_empty() {
            return 0;
        }
        product
            .tags
            .iter()
            .filter(|tag| {
                lowercase_into(tag, buf);
                self.matches(buf)
            })
            .count()
    }
}

/// Lowercase `s` into `buf`, reusing the buffer's allocation.
///
/// ASCII input takes a byte-level fast path; anything else goes through
/// full Unicode case mapping.
fn lowercase_into(s: &str, buf: &mut String) {
    buf.clear();
    buf.reserve(s.len());
    if s.is_ascii() {
        buf.extend(s.as_bytes().iter().map(|&b| b.to_ascii_lowercase() as char));
    } else {
        buf.push_str(&s.to_lowercase());
    }
}

/// Whether `tag`, lowercased, contains any of `tokens` as a substring.
///
/// Tokens are compared as given; [`tokenize`](crate::tokenize::tokenize) always
/// produces lowercase ones.
///
/// # Examples
///
/// ```
/// use visual_matcher::ranking::tag_matches;
///
/// assert!(tag_matches("Leather", &["leather"]));
/// assert!(tag_matches("redbag", &["blue", "bag"]));
/// assert!(!tag_matches("shoe", &["red"]));
/// assert!(!tag_matches("shoe", &[] as &[&str]));
/// ```
pub fn tag_matches<S: AsRef<str>>(tag: &str, tokens: &[S]) -> bool {
    let set = TokenSet::new(tokens);
    let mut buf = String::new();
    lowercase_into(tag, &mut buf);
    set.matches(&buf)
}

/// Score a single product: the number of its tags matching any token.
///
/// # Examples
///
/// ```
/// use visual_matcher::Product;
/// use visual_matcher::ranking::score_product;
///
/// // Both tags contain "red"; each counts once.
/// let product = Product::with_tags(1, "Red Bag", &["redbag", "red"]);
/// assert_eq!(score_product(&product, &["red"]), 2);
/// ```
pub fn score_product<S: AsRef<str>>(product: &Product, tokens: &[S]) -> usize {
    let set = TokenSet::new(tokens);
    let mut buf = String::new();
    set.score(product, &mut buf)
}

/// Rank `catalog` against `tokens` with default options.
///
/// Returns only products with a score of at least 1, sorted by score
/// descending. Products with equal scores keep their catalog order. An
/// empty token list yields an empty result.
///
/// # Examples
///
/// ```
/// use visual_matcher::{Product, rank};
///
/// let catalog = vec![
///     Product::with_tags(1, "Red Bag", &["red", "bag"]),
///     Product::with_tags(2, "Blue Shoe", &["blue", "shoe"]),
/// ];
/// let results = rank(&["red"], &catalog);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].product.name, "Red Bag");
/// assert_eq!(results[0].score, 1);
/// ```
pub fn rank<'a, S: AsRef<str>>(tokens: &[S], catalog: &'a [Product]) -> Vec<ScoredProduct<'a>> {
    rank_with_options(tokens, catalog, &MatcherOptions::default())
}

/// Rank `catalog` against `tokens`, applying `options`.
///
/// `min_score` filters before sorting (values below 1 act as 1); `limit`
/// truncates after sorting.
pub fn rank_with_options<'a, S: AsRef<str>>(
    tokens: &[S],
    catalog: &'a [Product],
    options: &MatcherOptions,
) -> Vec<ScoredProduct<'a>> {
    let set = TokenSet::new(tokens);
    let min_score = options.min_score.max(1);
    let mut buf = String::new();

    let mut scored: Vec<ScoredProduct<'a>> = catalog
        .iter()
        .enumerate()
        .filter_map(|(index, product)| {
            let score = set.score(product, &mut buf);
            (score >= min_score).then_some(ScoredProduct {
                product,
                index,
                score,
            })
        })
        .collect();

    sort_scored(&mut scored);

    if let Some(limit) = options.limit {
        scored.truncate(limit);
    }

    debug!(
        tokens = tokens.len(),
        catalog = catalog.len(),
        matched = scored.len(),
        "ranked catalog"
    );
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::with_tags(1, "Red Bag", &["red", "bag"]),
            Product::with_tags(2, "Blue Shoe", &["blue", "shoe"]),
            Product::with_tags(3, "Red Shoe", &["Red", "Shoe", "leather"]),
        ]
    }

    // --- lowercase_into ---

    #[test]
    fn lowercase_ascii_fast_path() {
        let mut buf = String::from("stale");
        lowercase_into("MiXeD", &mut buf);
        assert_eq!(buf, "mixed");
    }

    #[test]
    fn lowercase_unicode_path() {
        let mut buf = String::new();
        lowercase_into("ÉTÉ", &mut buf);
        assert_eq!(buf, "été");
    }

    // --- TokenSet ---

    #[test]
    fn token_set_empty_list_never_matches() {
        let tokens: [&str; 0] = [];
        let set = TokenSet::new(&tokens);
        assert!(!set.matches("anything"));
    }

    #[test]
    fn token_set_empty_token_matches_everything() {
        let set = TokenSet::new(&[""]);
        assert!(set.matches("anything"));
        assert!(set.matches(""));
    }

    #[test]
    fn token_set_substring() {
        let set = TokenSet::new(&["eat"]);
        assert!(set.matches("leather"));
        assert!(!set.matches("lea"));
    }

    // --- scoring ---

    #[test]
    fn score_counts_tags_not_tokens() {
        let product = Product::with_tags(1, "x", &["redbag"]);
        // Two tokens hit the same tag; the tag counts once.
        assert_eq!(score_product(&product, &["red", "bag"]), 1);
    }

    #[test]
    fn score_is_case_insensitive_on_tags() {
        let product = Product::with_tags(1, "x", &["LEATHER", "Bag"]);
        assert_eq!(score_product(&product, &["leather", "bag"]), 2);
    }

    #[test]
    fn uppercase_tokens_are_not_lowercased() {
        let product = Product::with_tags(1, "x", &["leather"]);
        assert_eq!(score_product(&product, &["LEATHER"]), 0);
    }

    #[test]
    fn product_without_tags_scores_zero() {
        let product = Product::with_tags(1, "x", &[]);
        assert_eq!(score_product(&product, &["red"]), 0);
    }

    // --- rank ---

    #[test]
    fn rank_orders_by_score_then_catalog_order() {
        let products = catalog();
        let results = rank(&["red", "shoe"], &products);
        let ids: Vec<usize> = results.iter().map(|r| r.index).collect();
        // Red Shoe matches two tags; Red Bag and Blue Shoe one each.
        assert_eq!(ids, vec![2, 0, 1]);
        assert_eq!(results[0].score, 2);
    }

    #[test]
    fn rank_empty_tokens_is_empty() {
        let products = catalog();
        let tokens: Vec<String> = Vec::new();
        assert!(rank(&tokens, &products).is_empty());
    }

    #[test]
    fn rank_empty_catalog_is_empty() {
        assert!(rank(&["red"], &[]).is_empty());
    }

    #[test]
    fn rank_with_min_score() {
        let products = catalog();
        let opts = MatcherOptions {
            min_score: 2,
            ..Default::default()
        };
        let results = rank_with_options(&["red", "shoe"], &products, &opts);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product.name, "Red Shoe");
    }

    #[test]
    fn rank_min_score_zero_still_excludes_unmatched() {
        let products = catalog();
        let opts = MatcherOptions {
            min_score: 0,
            ..Default::default()
        };
        let results = rank_with_options(&["bag"], &products, &opts);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn rank_with_limit_truncates_after_sort() {
        let products = catalog();
        let opts = MatcherOptions {
            limit: Some(1),
            ..Default::default()
        };
        let results = rank_with_options(&["red", "shoe"], &products, &opts);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product.name, "Red Shoe");
    }

    #[test]
    fn scored_product_serializes_flat() {
        let products = catalog();
        let results = rank(&["bag"], &products);
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Red Bag");
        assert_eq!(json["score"], 1);
        assert!(json.get("index").is_none());
    }
}
