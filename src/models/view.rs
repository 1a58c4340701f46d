use serde::Serialize;

use super::{Movie, WatchlistItem};

/// A movie shaped for display, carrying its resolved image
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieView {
    pub id: i64,
    pub title: String,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub external_artwork_id: Option<i64>,
    pub poster_url: Option<String>,
}

impl MovieView {
    pub fn new(movie: &Movie, poster_url: Option<String>) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.year,
            genre: movie.genre.clone(),
            description: movie.description.clone(),
            external_artwork_id: movie.external_artwork_id,
            poster_url,
        }
    }
}

/// A watchlist row shaped for display
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WatchlistItemView {
    pub id: i64,
    pub movie: MovieView,
    pub user_notes: Option<String>,
    pub watched: bool,
}

impl WatchlistItemView {
    pub fn new(item: &WatchlistItem, movie: MovieView) -> Self {
        Self {
            id: item.entry.id,
            movie,
            user_notes: item.entry.user_notes.clone(),
            watched: item.entry.watched,
        }
    }
}

/// One page of the browsable catalog
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogPage {
    pub movies: Vec<MovieView>,
    /// Every genre in the catalog, independent of the active filters
    pub genres: Vec<String>,
}

/// Everything a movie detail page needs
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieDetail {
    pub movie: MovieView,
    pub watchlist_entry: Option<super::WatchlistEntry>,
}

impl MovieDetail {
    pub fn in_watchlist(&self) -> bool {
        self.watchlist_entry.is_some()
    }
}
