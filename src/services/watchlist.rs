use sqlx::SqliteConnection;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{WatchlistEntry, WatchlistItem},
    services::MovieCatalog,
};

const ENTRY_COLUMNS: &str = "id, movie_id, user_notes, watched";

/// Service owning the shared watchlist
///
/// Every movie appears at most once. Units of work hold the write lock from `BEGIN`, so two
/// adds for one movie run one after the other and the later one fails the existence check
/// with `Conflict`. The UNIQUE constraint on `watchlist.movie_id` is mapped the same way.
#[derive(Debug, Clone, Copy, Default)]
pub struct WatchlistManager {
    catalog: MovieCatalog,
}

impl WatchlistManager {
    pub fn new(catalog: MovieCatalog) -> Self {
        Self { catalog }
    }

    /// Adds a movie to the watchlist as unwatched
    ///
    /// Fails with `NotFound` when the movie does not exist and with `Conflict` when the
    /// movie is already on the watchlist.
    #[instrument(skip(self, conn, notes))]
    pub async fn add(
        &self,
        conn: &mut SqliteConnection,
        movie_id: i64,
        notes: Option<String>,
    ) -> AppResult<WatchlistEntry> {
        if self.catalog.find_by_id(conn, movie_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Movie {} not found", movie_id)));
        }

        if self.find_by_movie(conn, movie_id).await?.is_some() {
            return Err(already_listed(movie_id));
        }

        let entry = sqlx::query_as::<_, WatchlistEntry>(&format!(
            "INSERT INTO watchlist (movie_id, user_notes, watched) VALUES (?, ?, 0) \
             RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(movie_id)
        .bind(&notes)
        .fetch_one(&mut *conn)
        .await
        .map_err(AppError::from)
        .map_err(|e| {
            if e.is_unique_violation() {
                already_listed(movie_id)
            } else {
                e
            }
        })?;

        tracing::info!(entry_id = entry.id, movie_id, "Movie added to watchlist");

        Ok(entry)
    }

    /// Removes an entry, returning whether it existed
    #[instrument(skip(self, conn))]
    pub async fn remove(&self, conn: &mut SqliteConnection, entry_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM watchlist WHERE id = ?")
            .bind(entry_id)
            .execute(&mut *conn)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            tracing::info!(entry_id, "Entry removed from watchlist");
        }

        Ok(removed)
    }

    /// Removes the entry for a movie, if any
    pub async fn remove_for_movie(
        &self,
        conn: &mut SqliteConnection,
        movie_id: i64,
    ) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM watchlist WHERE movie_id = ?")
            .bind(movie_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Flips the watched flag of an entry
    #[instrument(skip(self, conn))]
    pub async fn toggle_watched(
        &self,
        conn: &mut SqliteConnection,
        entry_id: i64,
    ) -> AppResult<WatchlistEntry> {
        let entry = sqlx::query_as::<_, WatchlistEntry>(&format!(
            "UPDATE watchlist SET watched = NOT watched WHERE id = ? RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(entry_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| entry_not_found(entry_id))?;

        tracing::debug!(entry_id, watched = entry.watched, "Watched flag toggled");

        Ok(entry)
    }

    /// Replaces the notes of an entry verbatim
    ///
    /// `Some("")` stores an empty string; `None` clears the notes.
    pub async fn update_notes(
        &self,
        conn: &mut SqliteConnection,
        entry_id: i64,
        notes: Option<String>,
    ) -> AppResult<WatchlistEntry> {
        sqlx::query_as::<_, WatchlistEntry>(&format!(
            "UPDATE watchlist SET user_notes = ? WHERE id = ? RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(&notes)
        .bind(entry_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| entry_not_found(entry_id))
    }

    /// Returns the entry for a movie, if the movie is on the watchlist
    pub async fn find_by_movie(
        &self,
        conn: &mut SqliteConnection,
        movie_id: i64,
    ) -> AppResult<Option<WatchlistEntry>> {
        let entry = sqlx::query_as::<_, WatchlistEntry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM watchlist WHERE movie_id = ?"
        ))
        .bind(movie_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(entry)
    }

    /// Lists entries in insertion order, each joined with its movie
    ///
    /// Entries whose movie no longer exists are skipped and logged.
    pub async fn list(&self, conn: &mut SqliteConnection) -> AppResult<Vec<WatchlistItem>> {
        let entries = sqlx::query_as::<_, WatchlistEntry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM watchlist ORDER BY id"
        ))
        .fetch_all(&mut *conn)
        .await?;

        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            match self.catalog.find_by_id(conn, entry.movie_id).await? {
                Some(movie) => items.push(WatchlistItem { entry, movie }),
                None => {
                    tracing::warn!(
                        entry_id = entry.id,
                        movie_id = entry.movie_id,
                        "Skipping orphaned watchlist entry"
                    );
                }
            }
        }

        Ok(items)
    }
}

fn already_listed(movie_id: i64) -> AppError {
    AppError::Conflict(format!("Movie {} is already on the watchlist", movie_id))
}

fn entry_not_found(entry_id: i64) -> AppError {
    AppError::NotFound(format!("Watchlist entry {} not found", entry_id))
}
