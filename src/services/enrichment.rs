use crate::{
    models::{Movie, MovieView, WatchlistItem, WatchlistItemView},
    services::ArtworkResolver,
};

/// Shapes a movie for grid display: thumbnail first, then the best poster
pub async fn enrich_movie(resolver: &ArtworkResolver, movie: &Movie) -> MovieView {
    let urls = resolver.resolve_all(movie.external_artwork_id).await;
    MovieView::new(movie, urls.thumbnail.or(urls.poster))
}

/// Shapes a movie for its detail page: best poster first, then the thumbnail
pub async fn enrich_movie_detail(resolver: &ArtworkResolver, movie: &Movie) -> MovieView {
    let urls = resolver.resolve_all(movie.external_artwork_id).await;
    MovieView::new(movie, urls.poster.or(urls.thumbnail))
}

pub async fn enrich_movies(resolver: &ArtworkResolver, movies: &[Movie]) -> Vec<MovieView> {
    let mut views = Vec::with_capacity(movies.len());
    for movie in movies {
        views.push(enrich_movie(resolver, movie).await);
    }
    views
}

pub async fn enrich_watchlist(
    resolver: &ArtworkResolver,
    items: &[WatchlistItem],
) -> Vec<WatchlistItemView> {
    let mut views = Vec::with_capacity(items.len());
    for item in items {
        let movie = enrich_movie(resolver, &item.movie).await;
        views.push(WatchlistItemView::new(item, movie));
    }
    views
}
