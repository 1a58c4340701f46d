use serde::{Deserialize, Deserializer, Serialize};

/// Artwork categories offered by the external source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkCategory {
    /// Official movie posters
    Poster,
    /// HD transparent logos
    HdLogo,
    /// Landscape thumbnails
    Thumbnail,
    /// Full-size backgrounds
    Background,
}

/// Poster lookup: official poster, then HD logo, then thumbnail, then background
pub const POSTER_FALLBACK: &[ArtworkCategory] = &[
    ArtworkCategory::Poster,
    ArtworkCategory::HdLogo,
    ArtworkCategory::Thumbnail,
    ArtworkCategory::Background,
];

/// Compact grid lookup: thumbnail, then poster
pub const THUMBNAIL_FALLBACK: &[ArtworkCategory] =
    &[ArtworkCategory::Thumbnail, ArtworkCategory::Poster];

pub const BACKGROUND_FALLBACK: &[ArtworkCategory] = &[ArtworkCategory::Background];

/// A single image entry within a category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ArtworkImage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub likes: Option<String>,
}

impl ArtworkImage {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }
}

/// Artwork metadata for one movie, as returned by GET /movies/{id}
///
/// Categories absent from the response, or sent as `null`, deserialize as empty lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArtworkDocument {
    #[serde(rename = "movieposter", default, deserialize_with = "null_as_empty")]
    pub posters: Vec<ArtworkImage>,
    #[serde(rename = "hdmovielogo", default, deserialize_with = "null_as_empty")]
    pub hd_logos: Vec<ArtworkImage>,
    #[serde(rename = "moviethumb", default, deserialize_with = "null_as_empty")]
    pub thumbnails: Vec<ArtworkImage>,
    #[serde(rename = "moviebackground", default, deserialize_with = "null_as_empty")]
    pub backgrounds: Vec<ArtworkImage>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ArtworkImage>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ArtworkImage>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ArtworkDocument {
    pub fn images(&self, category: ArtworkCategory) -> &[ArtworkImage] {
        match category {
            ArtworkCategory::Poster => &self.posters,
            ArtworkCategory::HdLogo => &self.hd_logos,
            ArtworkCategory::Thumbnail => &self.thumbnails,
            ArtworkCategory::Background => &self.backgrounds,
        }
    }

    /// Walks a fallback chain and returns the URL of the first entry in the first
    /// non-empty category.
    ///
    /// The first entry of the chosen category is authoritative: if it carries no URL the
    /// result is `None` and later categories are not consulted.
    pub fn first_url(&self, chain: &[ArtworkCategory]) -> Option<String> {
        chain
            .iter()
            .map(|category| self.images(*category))
            .find(|images| !images.is_empty())
            .and_then(|images| images[0].url.clone())
    }

    pub fn poster_url(&self) -> Option<String> {
        self.first_url(POSTER_FALLBACK)
    }

    pub fn thumbnail_url(&self) -> Option<String> {
        self.first_url(THUMBNAIL_FALLBACK)
    }

    pub fn background_url(&self) -> Option<String> {
        self.first_url(BACKGROUND_FALLBACK)
    }

    /// Resolves every image kind from this one document
    pub fn urls(&self) -> ArtworkUrls {
        ArtworkUrls {
            poster: self.poster_url(),
            thumbnail: self.thumbnail_url(),
            background: self.background_url(),
        }
    }
}

/// Best-available image URLs for a movie
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ArtworkUrls {
    pub poster: Option<String>,
    pub thumbnail: Option<String>,
    pub background: Option<String>,
}
