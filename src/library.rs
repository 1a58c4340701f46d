use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    config::Config,
    db::{self, UnitOfWork},
    error::AppResult,
    models::{CatalogPage, MovieDetail, WatchlistItemView},
    services::{enrichment, query, ArtworkResolver, MovieCatalog, MovieQuery, WatchlistManager},
};

/// Shared entry point for a presentation layer
///
/// Holds the connection pool, the catalog and watchlist services and the artwork resolver.
/// Cheap to clone; clones share the pool and the artwork cache.
#[derive(Clone)]
pub struct Library {
    pool: SqlitePool,
    catalog: MovieCatalog,
    watchlist: WatchlistManager,
    artwork: Arc<ArtworkResolver>,
}

impl Library {
    pub fn new(pool: SqlitePool, artwork: Arc<ArtworkResolver>) -> Self {
        let catalog = MovieCatalog::new();
        Self {
            pool,
            catalog,
            watchlist: WatchlistManager::new(catalog),
            artwork,
        }
    }

    /// Opens the database, applies migrations and builds the fanart.tv resolver
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
        db::run_migrations(&pool).await?;
        let artwork = ArtworkResolver::from_config(config)?;

        tracing::info!(
            database_url = %config.database_url,
            artwork_cache_capacity = config.artwork_cache_capacity,
            "Library ready"
        );

        Ok(Self::new(pool, Arc::new(artwork)))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn catalog(&self) -> &MovieCatalog {
        &self.catalog
    }

    pub fn watchlist(&self) -> &WatchlistManager {
        &self.watchlist
    }

    pub fn artwork(&self) -> &ArtworkResolver {
        &self.artwork
    }

    /// Opens a unit of work; callers commit it explicitly
    pub async fn begin(&self) -> AppResult<UnitOfWork> {
        db::begin(&self.pool).await
    }

    /// Searches, filters and sorts the catalog and attaches grid images
    ///
    /// `genres` always covers the whole catalog so filter choices stay stable.
    pub async fn browse(&self, movie_query: &MovieQuery) -> AppResult<CatalogPage> {
        let mut tx = self.begin().await?;
        let movies = self.catalog.list(&mut tx).await?;
        tx.commit().await?;

        let genres = query::genres(&movies);
        let matching = query::apply(&movies, movie_query);
        let movies = enrichment::enrich_movies(&self.artwork, &matching).await;

        Ok(CatalogPage { movies, genres })
    }

    /// Loads a movie with its detail image and watchlist status
    pub async fn movie_detail(&self, movie_id: i64) -> AppResult<MovieDetail> {
        let mut tx = self.begin().await?;
        let movie = self.catalog.get_by_id(&mut tx, movie_id).await?;
        let watchlist_entry = self.watchlist.find_by_movie(&mut tx, movie_id).await?;
        tx.commit().await?;

        let movie = enrichment::enrich_movie_detail(&self.artwork, &movie).await;

        Ok(MovieDetail {
            movie,
            watchlist_entry,
        })
    }

    /// Lists the watchlist with grid images
    pub async fn watchlist_page(&self) -> AppResult<Vec<WatchlistItemView>> {
        let mut tx = self.begin().await?;
        let items = self.watchlist.list(&mut tx).await?;
        tx.commit().await?;

        Ok(enrichment::enrich_watchlist(&self.artwork, &items).await)
    }

    /// Deletes a movie together with its watchlist entry
    ///
    /// Both removals share one unit of work, so either both happen or neither does.
    pub async fn delete_movie(&self, movie_id: i64) -> AppResult<bool> {
        let mut tx = self.begin().await?;
        self.watchlist.remove_for_movie(&mut tx, movie_id).await?;
        let deleted = self.catalog.delete(&mut tx, movie_id).await?;
        tx.commit().await?;

        Ok(deleted)
    }
}
