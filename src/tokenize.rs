//! Keyword extraction from image filenames and URLs.
//!
//! A search starts from a raw string: the name of an uploaded file or an
//! image URL. [`tokenize`] turns that string into the ordered list of
//! lowercase keywords that [`rank`](crate::ranking::rank) matches against
//! product tags. [`SearchInput`] reduces file paths and URLs to the bare
//! filename first.

use std::fmt;

/// Reduce a URL to its final path segment.
///
/// Returns the substring after the last `/`, or the whole string when it
/// contains no `/`. Query strings and fragments are kept; the first-`.`
/// truncation in [`tokenize`] drops them for typical image URLs.
///
/// # Examples
///
/// ```
/// use visual_matcher::tokenize::filename_from_url;
///
/// assert_eq!(filename_from_url("https://cdn.shop/img/red-bag.jpg"), "red-bag.jpg");
/// assert_eq!(filename_from_url("red-bag.jpg"), "red-bag.jpg");
/// assert_eq!(filename_from_url("https://cdn.shop/img/"), "");
/// ```
pub fn filename_from_url(url: &str) -> &str {
    match url.rfind('/') {
        Some(pos) => &url[pos + 1..],
        None => url,
    }
}

#[cfg(windows)]
const PATH_SEPARATORS: &[char] = &['/', '\\'];
#[cfg(not(windows))]
const PATH_SEPARATORS: &[char] = &['/'];

/// Reduce a local file path to its final component.
///
/// `/` always separates components; `\` does so only on Windows. Elsewhere
/// a backslash is an ordinary filename character and is left for
/// [`tokenize`] to split on.
///
/// # Examples
///
/// ```
/// use visual_matcher::tokenize::filename_from_path;
///
/// assert_eq!(filename_from_path("/home/me/Pictures/blue_shoe.png"), "blue_shoe.png");
/// assert_eq!(filename_from_path("blue_shoe.png"), "blue_shoe.png");
/// ```
pub fn filename_from_path(path: &str) -> &str {
    match path.rfind(PATH_SEPARATORS) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Drop everything from the first `.` onwards.
fn strip_extension(name: &str) -> &str {
    match memchr::memchr(b'.', name.as_bytes()) {
        Some(pos) => &name[..pos],
        None => name,
    }
}

/// Characters that survive as part of a token. Everything else, including
/// `_` and any non-ASCII character, separates tokens.
fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

/// Split `segment` immediately before every ASCII uppercase letter.
///
/// A leading uppercase letter does not produce an empty leading piece:
/// `"RedBag"` splits into `["Red", "Bag"]`.
pub(crate) fn split_camel_case(segment: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (pos, c) in segment.char_indices() {
        if pos > start && c.is_ascii_uppercase() {
            parts.push(&segment[start..pos]);
            start = pos;
        }
    }
    parts.push(&segment[start..]);
    parts
}

/// Convert a filename into ordered lowercase keyword tokens.
///
/// The steps run in a fixed order:
///
/// 1. truncate at the first `.` (extension and anything after it),
/// 2. lowercase,
/// 3. split on every run of characters outside `[a-z0-9]`,
/// 4. split each piece before uppercase letters,
/// 5. drop empty pieces.
///
/// Step 4 runs after lowercasing, so it never finds a boundary. It is kept
/// in place so the matching behavior stays exactly as deployed.
///
/// The function is total: any input yields a (possibly empty) token list.
///
/// # Examples
///
/// ```
/// use visual_matcher::tokenize;
///
/// assert_eq!(tokenize("Red_Leather-Bag_02.png"), vec!["red", "leather", "bag", "02"]);
/// assert_eq!(tokenize("product.jpg"), vec!["product"]);
/// assert!(tokenize("").is_empty());
/// assert!(tokenize("___.png").is_empty());
/// ```
pub fn tokenize(input: &str) -> Vec<String> {
    let lowered = strip_extension(input).to_lowercase();

    lowered
        .split(|c: char| !is_token_char(c))
        .flat_map(split_camel_case)
        .filter(|piece| !piece.is_empty())
        .map(str::to_owned)
        .collect()
}

/// The raw string a search is triggered with.
///
/// A file search carries the uploaded file's name (a bare name or a full
/// local path); a URL search carries the URL exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInput {
    /// Name or path of a local image file.
    File(String),
    /// Image URL.
    Url(String),
}

impl SearchInput {
    /// The filename portion that gets tokenized.
    ///
    /// ```
    /// use visual_matcher::SearchInput;
    ///
    /// let input = SearchInput::Url("https://x.io/a/blue_shoe.webp?w=200".to_owned());
    /// assert_eq!(input.search_text(), "blue_shoe.webp?w=200");
    /// ```
    pub fn search_text(&self) -> &str {
        match self {
            SearchInput::File(path) => filename_from_path(path),
            SearchInput::Url(url) => filename_from_url(url),
        }
    }

    /// Tokenize [`search_text`](Self::search_text).
    pub fn keywords(&self) -> Vec<String> {
        tokenize(self.search_text())
    }
}

impl fmt::Display for SearchInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchInput::File(path) => write!(f, "file {path}"),
            SearchInput::Url(url) => write!(f, "url {url}"),
        }
    }
}
