use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A movie in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Movie {
    /// Store-generated identifier, increasing in insertion order
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    /// Key into the external artwork source
    pub external_artwork_id: Option<i64>,
}

/// Fields supplied when adding a movie to the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub external_artwork_id: Option<i64>,
}

impl NewMovie {
    /// Creates a new movie request with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_external_artwork_id(mut self, external_artwork_id: i64) -> Self {
        self.external_artwork_id = Some(external_artwork_id);
        self
    }

    /// Rejects requests whose title is empty or whitespace
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("Movie title cannot be empty".to_string()));
        }
        Ok(())
    }
}
