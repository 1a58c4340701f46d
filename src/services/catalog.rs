use sqlx::SqliteConnection;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, NewMovie},
};

const MOVIE_COLUMNS: &str = "id, title, description, year, genre, external_artwork_id";

/// Service owning the movie catalog
///
/// Stateless: every call runs on the unit of work supplied by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovieCatalog;

impl MovieCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Adds a movie to the catalog
    ///
    /// Fails with `Validation` when the title is empty or whitespace.
    #[instrument(skip(self, conn, movie), fields(title = %movie.title))]
    pub async fn add(&self, conn: &mut SqliteConnection, movie: NewMovie) -> AppResult<Movie> {
        movie.validate()?;

        let created = sqlx::query_as::<_, Movie>(&format!(
            "INSERT INTO movies (title, description, year, genre, external_artwork_id) \
             VALUES (?, ?, ?, ?, ?) RETURNING {MOVIE_COLUMNS}"
        ))
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(movie.year)
        .bind(&movie.genre)
        .bind(movie.external_artwork_id)
        .fetch_one(&mut *conn)
        .await?;

        tracing::info!(movie_id = created.id, "Movie added to catalog");

        Ok(created)
    }

    /// Lists every movie in insertion order
    pub async fn list(&self, conn: &mut SqliteConnection) -> AppResult<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY id"
        ))
        .fetch_all(&mut *conn)
        .await?;

        Ok(movies)
    }

    /// Looks up a movie, returning `None` when it does not exist
    pub async fn find_by_id(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(movie)
    }

    /// Looks up a movie, failing with `NotFound` when it does not exist
    pub async fn get_by_id(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<Movie> {
        self.find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", id)))
    }

    /// Deletes a movie, returning whether it existed
    ///
    /// Watchlist entries referencing the movie are left untouched.
    #[instrument(skip(self, conn))]
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(movie_id = id, "Movie deleted from catalog");
        }

        Ok(deleted)
    }
}
