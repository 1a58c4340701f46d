use serde::{Deserialize, Serialize};

use super::Movie;

/// A movie saved to the shared watchlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct WatchlistEntry {
    pub id: i64,
    pub movie_id: i64,
    pub user_notes: Option<String>,
    pub watched: bool,
}

/// A watchlist entry joined with the movie it references
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WatchlistItem {
    pub entry: WatchlistEntry,
    pub movie: Movie,
}
