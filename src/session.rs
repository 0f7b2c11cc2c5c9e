//! Search lifecycle for an interactive front end.
//!
//! A [`SearchSession`] owns the state a front end needs between searches:
//! the currently selected file and the outcome of the last search. The
//! matching itself stays in the pure [`tokenize`](crate::tokenize::tokenize)
//! and [`rank`](crate::ranking::rank) functions; the session only decides
//! when to call them and remembers what they returned.
//!
//! ```text
//!          select_file
//!   ┌─────────────────────────┐
//!   ▼                         │
//! Idle ──search──▶ Displayed | Empty ◀──search──┐
//!                        │                      │
//!                        └──────────────────────┘
//! ```
//!
//! Matching is synchronous, so a search in progress is never observable
//! from outside: `search_*` returns only once the new state is set.

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::options::MatcherOptions;
use crate::ranking::{ScoredProduct, rank_with_options};
use crate::tokenize::SearchInput;

/// Reasons a search trigger is rejected before any matching runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A file search was triggered with no file selected.
    #[error("no image file selected")]
    NoFileSelected,

    /// A URL search was triggered with a blank URL.
    #[error("image URL is empty")]
    EmptyUrl,
}

/// Where a [`SearchSession`] is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState<'a> {
    /// No search has completed since the session started or since the
    /// last file selection.
    Idle,
    /// The last search matched at least one product.
    Displayed(Vec<ScoredProduct<'a>>),
    /// The last search completed and matched nothing.
    Empty,
}

/// Stateful driver around the matcher for one user.
///
/// # Examples
///
/// ```
/// use visual_matcher::{Catalog, Product, SearchSession};
///
/// let catalog = Catalog::from_products(vec![
///     Product::with_tags(1, "Red Bag", &["red", "bag"]),
/// ]).unwrap();
/// let mut session = SearchSession::new(&catalog);
/// assert!(!session.has_searched());
///
/// let results = session.search_url("https://img.example/red_bag.jpg").unwrap();
/// assert_eq!(results.len(), 1);
/// assert!(session.has_searched());
/// ```
#[derive(Debug)]
pub struct SearchSession<'a> {
    catalog: &'a Catalog,
    options: MatcherOptions,
    selected_file: Option<String>,
    state: SearchState<'a>,
}

impl<'a> SearchSession<'a> {
    /// Start an idle session over `catalog` with default options.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_options(catalog, MatcherOptions::default())
    }

    /// Start an idle session over `catalog` with the given options.
    pub fn with_options(catalog: &'a Catalog, options: MatcherOptions) -> Self {
        Self {
            catalog,
            options,
            selected_file: None,
            state: SearchState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SearchState<'a> {
        &self.state
    }

    /// `true` once a search has completed, whether or not it matched.
    ///
    /// This is what separates "no matches" from "nothing searched yet";
    /// an empty result list alone cannot tell the two apart.
    pub fn has_searched(&self) -> bool {
        matches!(self.state, SearchState::Displayed(_) | SearchState::Empty)
    }

    /// Results of the last completed search; empty when idle or when the
    /// search matched nothing.
    pub fn results(&self) -> &[ScoredProduct<'a>] {
        match &self.state {
            SearchState::Displayed(results) => results.as_slice(),
            _ => &[],
        }
    }

    /// The file chosen by the last [`select_file`](Self::select_file).
    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    /// Choose a file for the next [`search_file`](Self::search_file).
    ///
    /// Clears the previous results and returns the session to
    /// [`SearchState::Idle`].
    pub fn select_file(&mut self, name: impl Into<String>) {
        let name = name.into();
        debug!(file = %name, "file selected");
        self.selected_file = Some(name);
        self.state = SearchState::Idle;
    }

    /// Search with the selected file's name.
    ///
    /// # Errors
    ///
    /// [`SearchError::NoFileSelected`] if no file has been selected. The
    /// session state is left untouched.
    pub fn search_file(&mut self) -> Result<&[ScoredProduct<'a>], SearchError> {
        let Some(name) = self.selected_file.clone() else {
            warn!("file search triggered without a selected file");
            return Err(SearchError::NoFileSelected);
        };
        Ok(self.run(&SearchInput::File(name)))
    }

    /// Search with an image URL.
    ///
    /// Only the part after the last `/` is tokenized. The selected file, if
    /// any, is kept.
    ///
    /// # Errors
    ///
    /// [`SearchError::EmptyUrl`] if `url` is empty or whitespace. The
    /// session state is left untouched.
    pub fn search_url(&mut self, url: &str) -> Result<&[ScoredProduct<'a>], SearchError> {
        if url.trim().is_empty() {
            warn!("url search triggered with an empty url");
            return Err(SearchError::EmptyUrl);
        }
        Ok(self.run(&SearchInput::Url(url.to_owned())))
    }

    fn run(&mut self, input: &SearchInput) -> &[ScoredProduct<'a>] {
        let keywords = input.keywords();
        debug!(%input, ?keywords, "searching");

        let results = rank_with_options(&keywords, self.catalog.products(), &self.options);
        self.state = if results.is_empty() {
            SearchState::Empty
        } else {
            SearchState::Displayed(results)
        };
        debug!(matched = self.results().len(), "search complete");
        self.results()
    }
}
