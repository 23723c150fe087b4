//! Genre filter and title search over the catalog.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, Item};
use crate::types::{Genre, UnknownGenre};

/// Errors from parsing filter input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown genre filter: {0}")]
    UnknownGenre(String),
}

impl From<UnknownGenre> for FilterError {
    fn from(err: UnknownGenre) -> Self {
        Self::UnknownGenre(err.0)
    }
}

/// Genre selector: everything, or a single genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GenreFilter {
    #[default]
    All,
    Only(Genre),
}

impl GenreFilter {
    #[must_use]
    pub fn accepts(self, genre: Genre) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == genre,
        }
    }
}

impl FromStr for GenreFilter {
    type Err = FilterError;

    /// `"all"` (any case) selects everything; anything else must name a genre.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Ok(Self::Only(s.parse()?))
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(genre) => write!(f, "{genre}"),
        }
    }
}

/// Transient view state: active genre and search term. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub genre: GenreFilter,
    search: String,
}

impl FilterState {
    #[must_use]
    pub fn new(genre: GenreFilter, search: impl Into<String>) -> Self {
        let mut state = Self {
            genre,
            search: String::new(),
        };
        state.set_search(search);
        state
    }

    /// Replace the search term. Matching ignores case, so the term is stored
    /// lowercased.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into().to_lowercase();
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Whether any narrowing is in effect.
    ///
    /// Lets a renderer tell "nothing matches" apart from "nothing filtered".
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.genre != GenreFilter::All || !self.search.is_empty()
    }

    /// Whether `item` passes both the genre and the search predicate.
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        self.genre.accepts(item.genre) && item.title.to_lowercase().contains(&self.search)
    }
}

/// Items passing `filter`, in catalog order.
///
/// An empty result means nothing matched; the renderer shows its empty-state
/// message in that case.
#[must_use]
pub fn visible_items<'a>(catalog: &'a Catalog, filter: &FilterState) -> Vec<&'a Item> {
    catalog
        .list_all()
        .iter()
        .filter(|item| filter.matches(item))
        .collect()
}
