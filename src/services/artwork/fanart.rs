//! fanart.tv artwork source
//!
//! Looks up movie artwork by TMDB id via GET /movies/{id}. The response is a JSON object
//! keyed by category (movieposter, hdmovielogo, moviethumb, moviebackground), each an ordered
//! list of images.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::ArtworkDocument,
    services::artwork::ArtworkSource,
};

#[derive(Clone)]
pub struct FanartClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl FanartClient {
    /// Creates a client whose requests are abandoned after `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

fn unavailable(external_id: i64, e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::ExternalUnavailable(format!("fanart.tv request for {} timed out", external_id))
    } else {
        AppError::ExternalUnavailable(format!("fanart.tv request for {} failed: {}", external_id, e))
    }
}

#[async_trait::async_trait]
impl ArtworkSource for FanartClient {
    async fn fetch_artwork(&self, external_id: i64) -> AppResult<ArtworkDocument> {
        let url = format!("{}/movies/{}", self.api_url, external_id);

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| unavailable(external_id, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalUnavailable(format!(
                "fanart.tv returned status {}: {}",
                status, body
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| unavailable(external_id, e))?;
        tracing::debug!(response = %response_text, "Raw fanart.tv response");

        let document: ArtworkDocument = serde_json::from_str(&response_text).map_err(|e| {
            AppError::ExternalUnavailable(format!("Failed to parse fanart.tv response: {}", e))
        })?;

        tracing::info!(
            external_id,
            posters = document.posters.len(),
            thumbnails = document.thumbnails.len(),
            backgrounds = document.backgrounds.len(),
            provider = "fanart",
            "Artwork fetched"
        );

        Ok(document)
    }

    fn name(&self) -> &'static str {
        "fanart"
    }
}
