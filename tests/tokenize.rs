//! Integration tests for keyword extraction.
//!
//! Covers [`tokenize`] on filenames and the URL/path reductions applied by
//! [`SearchInput`] before tokenizing.

use visual_matcher::{SearchInput, filename_from_url, tokenize};

// ---------------------------------------------------------------------------
// tokenize
// ---------------------------------------------------------------------------

#[test]
fn empty_input_has_no_tokens() {
    assert!(tokenize("").is_empty());
}

#[test]
fn extension_is_dropped() {
    assert_eq!(tokenize("product.jpg"), vec!["product"]);
}

#[test]
fn mixed_separators_and_digits() {
    assert_eq!(
        tokenize("Red_Leather-Bag_02.png"),
        vec!["red", "leather", "bag", "02"]
    );
}

#[test]
fn single_lowercase_word_is_unchanged() {
    assert_eq!(tokenize("sneaker"), vec!["sneaker"]);
    assert_eq!(tokenize(&tokenize("sneaker")[0]), vec!["sneaker"]);
}

#[test]
fn whitespace_separates_tokens() {
    assert_eq!(tokenize("blue running shoes.webp"), vec!["blue", "running", "shoes"]);
}

#[test]
fn no_alphanumeric_content_yields_nothing() {
    assert!(tokenize("-_- !!.png").is_empty());
}

#[test]
fn camel_case_is_lowercased_not_split() {
    assert_eq!(tokenize("BlueShoe.png"), vec!["blueshoe"]);
}

#[test]
fn order_follows_input() {
    assert_eq!(tokenize("shoe-blue-shoe"), vec!["shoe", "blue", "shoe"]);
}

#[test]
fn dotfile_has_no_tokens() {
    assert!(tokenize(".gitignore").is_empty());
}

// ---------------------------------------------------------------------------
// URL and path reduction
// ---------------------------------------------------------------------------

#[test]
fn url_reduces_to_last_segment() {
    assert_eq!(
        filename_from_url("https://cdn.example.com/catalog/red-bag.png"),
        "red-bag.png"
    );
}

#[test]
fn url_host_does_not_leak_into_tokens() {
    let input = SearchInput::Url("https://red.example.com/img/blue_shoe.png".to_owned());
    assert_eq!(input.keywords(), vec!["blue", "shoe"]);
}

#[test]
fn url_query_string_is_cut_by_first_dot() {
    let input = SearchInput::Url("https://x.io/p/red_bag.jpg?size=large".to_owned());
    assert_eq!(input.keywords(), vec!["red", "bag"]);
}

#[test]
fn url_without_extension_keeps_query_tokens() {
    let input = SearchInput::Url("https://x.io/p/red_bag?size=large".to_owned());
    assert_eq!(input.keywords(), vec!["red", "bag", "size", "large"]);
}

#[test]
fn url_without_slash_is_used_whole() {
    let input = SearchInput::Url("green_hat.png".to_owned());
    assert_eq!(input.keywords(), vec!["green", "hat"]);
}

#[test]
fn file_path_directories_are_ignored() {
    let input = SearchInput::File("/home/shop/leather/brown_boot.jpeg".to_owned());
    assert_eq!(input.search_text(), "brown_boot.jpeg");
    assert_eq!(input.keywords(), vec!["brown", "boot"]);
}
