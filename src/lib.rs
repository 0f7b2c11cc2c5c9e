#![warn(missing_docs)]

//! Match an image against a product catalog by its filename.
//!
//! `visual_matcher` turns an image filename (or the last segment of an
//! image URL) into lowercase keyword tokens and ranks catalog products by
//! how many of their tags contain one of those tokens. No pixels are
//! inspected; matching is purely textual.
//!
//! ```
//! use visual_matcher::{Product, rank, tokenize};
//!
//! let catalog = vec![
//!     Product::with_tags(1, "Red Leather Bag", &["red", "leather", "bag"]),
//!     Product::with_tags(2, "Blue Shoe", &["blue", "shoe"]),
//! ];
//! let tokens = tokenize("Red_Leather-Bag_02.png");
//! let results = rank(&tokens, &catalog);
//! assert_eq!(results[0].product.name, "Red Leather Bag");
//! assert_eq!(results[0].score, 3);
//! ```

/// Keyword extraction from filenames and URLs.
pub mod tokenize;

/// Tag scoring and ranking of catalog products.
pub mod ranking;

/// Stable score-descending ordering of ranked products.
pub mod sort;

/// Catalog types, JSON loading and validation.
pub mod catalog;

/// Options that tune ranking output.
pub mod options;

/// Search lifecycle state for interactive front ends.
pub mod session;

// Re-export primary public API types and functions at the crate root.
pub use catalog::{Catalog, CatalogError, Price, Product, ProductId};
pub use options::MatcherOptions;
pub use ranking::{ScoredProduct, rank, rank_with_options, score_product, tag_matches};
pub use session::{SearchError, SearchSession, SearchState};
pub use tokenize::{SearchInput, filename_from_path, filename_from_url, tokenize};
