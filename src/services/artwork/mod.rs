use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::Mutex;

use crate::{
    config::Config,
    error::AppResult,
    models::{ArtworkDocument, ArtworkUrls},
};

pub mod fanart;

pub use fanart::FanartClient;

/// Trait for external artwork sources
///
/// A source performs exactly one outbound lookup per call and reports every failure
/// (network error, timeout, error status, malformed body) as an error. Caching is the
/// resolver's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ArtworkSource: Send + Sync {
    /// Fetch the artwork document for an external artwork id
    async fn fetch_artwork(&self, external_id: i64) -> AppResult<ArtworkDocument>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Resolves display images for movies, caching artwork documents per external id
///
/// Only successful lookups are cached. A failed lookup returns `None` and the next call for
/// the same id goes back to the source. Concurrent misses on the same id may each hit the
/// source.
pub struct ArtworkResolver {
    source: Arc<dyn ArtworkSource>,
    cache: Mutex<LruCache<i64, ArtworkDocument>>,
}

impl ArtworkResolver {
    /// Creates a resolver caching at most `capacity` documents (minimum 1)
    pub fn new(source: Arc<dyn ArtworkSource>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        tracing::debug!(
            source = source.name(),
            capacity = capacity.get(),
            "Artwork resolver created"
        );

        Self {
            source,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Builds a resolver backed by fanart.tv
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = FanartClient::new(
            config.fanart_api_key.clone(),
            config.fanart_api_url.clone(),
            config.artwork_timeout(),
        )?;

        Ok(Self::new(Arc::new(client), config.artwork_cache_capacity))
    }

    /// Returns the artwork document for an id, from cache when possible
    ///
    /// Never fails: a missing or non-positive id, or any failure while fetching, yields
    /// `None`.
    pub async fn get_artwork(&self, external_id: Option<i64>) -> Option<ArtworkDocument> {
        let external_id = external_id.filter(|id| *id > 0)?;

        let cached = self.cache.lock().await.get(&external_id).cloned();
        if let Some(document) = cached {
            tracing::debug!(external_id, "Artwork cache hit");
            return Some(document);
        }

        tracing::debug!(external_id, "Artwork cache miss");

        match self.source.fetch_artwork(external_id).await {
            Ok(document) => {
                self.cache
                    .lock()
                    .await
                    .put(external_id, document.clone());
                Some(document)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    external_id,
                    source = self.source.name(),
                    "Artwork lookup failed"
                );
                None
            }
        }
    }

    /// Best poster: official poster, HD logo, thumbnail, then background
    pub async fn resolve_poster(&self, external_id: Option<i64>) -> Option<String> {
        self.get_artwork(external_id).await?.poster_url()
    }

    /// Compact grid image: thumbnail, then poster
    pub async fn resolve_thumbnail(&self, external_id: Option<i64>) -> Option<String> {
        self.get_artwork(external_id).await?.thumbnail_url()
    }

    pub async fn resolve_background(&self, external_id: Option<i64>) -> Option<String> {
        self.get_artwork(external_id).await?.background_url()
    }

    /// Resolves poster, thumbnail and background from a single lookup
    pub async fn resolve_all(&self, external_id: Option<i64>) -> ArtworkUrls {
        self.get_artwork(external_id)
            .await
            .map(|document| document.urls())
            .unwrap_or_default()
    }

    /// Number of documents currently cached
    pub async fn cached_len(&self) -> usize {
        self.cache.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::ArtworkImage;

    fn document(posters: &[&str], backgrounds: &[&str]) -> ArtworkDocument {
        ArtworkDocument {
            posters: posters.iter().map(|u| ArtworkImage::with_url(*u)).collect(),
            backgrounds: backgrounds.iter().map(|u| ArtworkImage::with_url(*u)).collect(),
            ..Default::default()
        }
    }

    fn mock_source() -> MockArtworkSource {
        let mut source = MockArtworkSource::new();
        source.expect_name().return_const("mock");
        source
    }

    fn resolver(source: MockArtworkSource, capacity: usize) -> ArtworkResolver {
        ArtworkResolver::new(Arc::new(source), capacity)
    }

    #[tokio::test]
    async fn test_missing_id_skips_source() {
        let mut source = mock_source();
        source.expect_fetch_artwork().never();

        let resolver = resolver(source, 10);

        assert_eq!(resolver.get_artwork(None).await, None);
        assert_eq!(resolver.resolve_poster(None).await, None);
        assert_eq!(resolver.resolve_all(None).await, ArtworkUrls::default());
        assert_eq!(resolver.get_artwork(Some(0)).await, None);
        assert_eq!(resolver.resolve_poster(Some(-3)).await, None);
    }

    #[tokio::test]
    async fn test_zero_capacity_still_caches_one_document() {
        let mut source = mock_source();
        source
            .expect_fetch_artwork()
            .times(1)
            .returning(|_| Ok(document(&["poster.jpg"], &[])));

        let resolver = resolver(source, 0);

        resolver.get_artwork(Some(5)).await;
        resolver.get_artwork(Some(5)).await;
        assert_eq!(resolver.cached_len().await, 1);
    }

    #[tokio::test]
    async fn test_success_is_cached() {
        let mut source = mock_source();
        source
            .expect_fetch_artwork()
            .withf(|id| *id == 27205)
            .times(1)
            .returning(|_| Ok(document(&["poster.jpg"], &["bg.jpg"])));

        let resolver = resolver(source, 10);

        let first = resolver.get_artwork(Some(27205)).await;
        let second = resolver.get_artwork(Some(27205)).await;

        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(resolver.cached_len().await, 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached_and_retried() {
        let mut source = mock_source();
        let mut calls = 0;
        source
            .expect_fetch_artwork()
            .times(2)
            .returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Err(AppError::ExternalUnavailable("timed out".to_string()))
                } else {
                    Ok(document(&["poster.jpg"], &[]))
                }
            });

        let resolver = resolver(source, 10);

        assert_eq!(resolver.get_artwork(Some(42)).await, None);
        assert_eq!(resolver.cached_len().await, 0);

        assert_eq!(
            resolver.resolve_poster(Some(42)).await.as_deref(),
            Some("poster.jpg")
        );
        assert_eq!(resolver.cached_len().await, 1);
    }

    #[tokio::test]
    async fn test_resolvers_share_one_fetch() {
        let mut source = mock_source();
        source
            .expect_fetch_artwork()
            .times(1)
            .returning(|_| Ok(document(&[], &["bg.jpg"])));

        let resolver = resolver(source, 10);

        assert_eq!(
            resolver.resolve_poster(Some(7)).await.as_deref(),
            Some("bg.jpg")
        );
        assert_eq!(resolver.resolve_thumbnail(Some(7)).await, None);
        assert_eq!(
            resolver.resolve_background(Some(7)).await.as_deref(),
            Some("bg.jpg")
        );
        assert_eq!(
            resolver.resolve_all(Some(7)).await,
            ArtworkUrls {
                poster: Some("bg.jpg".to_string()),
                thumbnail: None,
                background: Some("bg.jpg".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_failure_resolves_to_none() {
        let mut source = mock_source();
        source
            .expect_fetch_artwork()
            .returning(|_| Err(AppError::ExternalUnavailable("boom".to_string())));

        let resolver = resolver(source, 10);

        assert_eq!(resolver.resolve_poster(Some(1)).await, None);
        assert_eq!(resolver.resolve_thumbnail(Some(1)).await, None);
        assert_eq!(resolver.resolve_background(Some(1)).await, None);
        assert_eq!(resolver.resolve_all(Some(1)).await, ArtworkUrls::default());
    }

    #[tokio::test]
    async fn test_least_recently_used_document_evicted() {
        let mut source = mock_source();
        // 1 and 2 are cached, 3 evicts 2 (1 was touched), then 2 is fetched again
        source
            .expect_fetch_artwork()
            .times(4)
            .returning(|id| {
                let url = format!("poster-{}.jpg", id);
                Ok(document(&[url.as_str()], &[]))
            });

        let resolver = resolver(source, 2);

        resolver.get_artwork(Some(1)).await;
        resolver.get_artwork(Some(2)).await;
        resolver.get_artwork(Some(1)).await;
        resolver.get_artwork(Some(3)).await;
        assert_eq!(resolver.cached_len().await, 2);

        assert_eq!(
            resolver.resolve_poster(Some(2)).await.as_deref(),
            Some("poster-2.jpg")
        );
    }
}
