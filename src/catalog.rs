//! Product catalog types and loading.
//!
//! The catalog is a JSON array of product records, loaded once and treated
//! as read-only by every search. Loading validates the two properties the
//! matcher depends on: every `id` is unique and every product carries a
//! `tags` list.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::ranking::{ScoredProduct, rank};
use crate::tokenize::tokenize;

/// Errors raised while loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid JSON or does not have the expected shape.
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share the same `id`.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A product has no `tags` field, or it is `null`.
    #[error("product {0} has no tags list")]
    MissingTags(ProductId),
}

/// Unique product identifier. Catalog files use either numbers or strings.
///
/// Numeric ids keep the JSON number as written, so negative and fractional
/// ids are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id, e.g. `7`.
    Number(serde_json::Number),
    /// String id, e.g. `"sku-7"`.
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{n}"),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        ProductId::Number(n.into())
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_owned())
    }
}

/// Display price. Passed through as given, never validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    /// Numeric price, e.g. `49.99`.
    Amount(f64),
    /// Preformatted price, e.g. `"$49.99"`.
    Label(String),
    /// `null` or no price field at all.
    #[default]
    Unset,
    /// Any other JSON value, kept verbatim.
    Other(serde_json::Value),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(v) => write!(f, "{v}"),
            Price::Label(s) => f.write_str(s),
            Price::Unset => Ok(()),
            Price::Other(v) => write!(f, "{v}"),
        }
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Display price.
    pub price: Price,
    /// Image reference (URL or path) for display.
    pub image: String,
    /// Descriptive tags, matched case-insensitively.
    pub tags: Vec<String>,
}

impl Product {
    /// Build a product with a numeric id, a placeholder image and a zero
    /// price.
    ///
    /// Mostly useful for tests and examples where only `id` and `tags`
    /// matter.
    ///
    /// ```
    /// use visual_matcher::Product;
    ///
    /// let p = Product::with_tags(1, "Red Bag", &["red", "bag"]);
    /// assert_eq!(p.tags, vec!["red", "bag"]);
    /// ```
    pub fn with_tags(id: u64, name: &str, tags: &[&str]) -> Self {
        Self {
            id: ProductId::from(id),
            name: name.to_owned(),
            price: Price::Amount(0.0),
            image: String::new(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        }
    }
}

/// On-disk shape of a product. `tags` is optional here so that a missing
/// list is reported as [`CatalogError::MissingTags`] instead of a generic
/// parse error. Display fields tolerate `null` and absence.
#[derive(Deserialize)]
struct RawProduct {
    id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default)]
    price: Price,
    #[serde(default, deserialize_with = "null_as_default")]
    image: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

/// Deserialize `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl TryFrom<RawProduct> for Product {
    type Error = CatalogError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let tags = raw.tags.ok_or_else(|| CatalogError::MissingTags(raw.id.clone()))?;
        Ok(Product {
            id: raw.id,
            name: raw.name,
            price: raw.price,
            image: raw.image,
            tags,
        })
    }
}

/// An ordered, validated, immutable collection of products.
///
/// Catalog order is significant: products with equal scores are returned
/// in the order they appear here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already-constructed products.
    ///
    /// # Errors
    ///
    /// [`CatalogError::DuplicateId`] if two products share an `id`.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Parse and validate a catalog from a JSON array.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Parse`] for malformed JSON,
    /// [`CatalogError::MissingTags`] for a product without a tags list and
    /// [`CatalogError::DuplicateId`] for repeated ids.
    ///
    /// # Examples
    ///
    /// ```
    /// use visual_matcher::Catalog;
    ///
    /// let catalog = Catalog::from_json_str(r#"[
    ///     {"id": 1, "name": "Red Bag", "price": "$40", "image": "bag.jpg", "tags": ["red", "bag"]}
    /// ]"#).unwrap();
    /// assert_eq!(catalog.len(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawProduct> = serde_json::from_str(json)?;
        let products = raw
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_products(products)
    }

    /// Read and validate a catalog file.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Io`] if the file cannot be read, otherwise the same
    /// errors as [`from_json_str`](Self::from_json_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content)?;
        info!(path = %path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// `true` if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Tokenize `raw` and rank this catalog against the tokens.
    ///
    /// `raw` must already be reduced to a filename; see
    /// [`SearchInput`](crate::SearchInput) for URL and path handling.
    pub fn search(&self, raw: &str) -> Vec<ScoredProduct<'_>> {
        let tokens = tokenize(raw);
        debug!(?tokens, "searching catalog");
        rank(&tokens, &self.products)
    }
}
