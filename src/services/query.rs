use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Movie;

/// Sort keys accepted by the catalog query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Title,
    TitleDesc,
    Year,
    YearDesc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortOrder::Title),
            "title_desc" => Ok(SortOrder::TitleDesc),
            "year" => Ok(SortOrder::Year),
            "year_desc" => Ok(SortOrder::YearDesc),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// Search, filter and sort parameters for the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieQuery {
    /// Case-insensitive substring of the title
    pub search: Option<String>,
    /// Case-insensitive exact genre
    pub genre: Option<String>,
    pub sort: Option<SortOrder>,
}

impl MovieQuery {
    /// Builds a query from raw parameter strings; unknown sort keys mean "no sort"
    pub fn from_params(search: Option<&str>, genre: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            search: search.map(str::to_string),
            genre: genre.map(str::to_string),
            sort: sort.and_then(|s| s.parse().ok()),
        }
    }
}

/// Applies a query to a movie collection
///
/// Filters are combined with AND. Sorting is stable, so movies that compare equal keep
/// their relative input order in both ascending and descending sorts. Movies without a
/// year sort as year 0.
pub fn apply(movies: &[Movie], query: &MovieQuery) -> Vec<Movie> {
    let search = non_empty_lowercase(query.search.as_deref());
    let genre = non_empty_lowercase(query.genre.as_deref());

    let mut results: Vec<Movie> = movies
        .iter()
        .filter(|movie| matches(movie, search.as_deref(), genre.as_deref()))
        .cloned()
        .collect();

    if let Some(sort) = query.sort {
        // `sort_by` is stable; reversing the comparator keeps ties in input order
        results.sort_by(|a, b| match sort {
            SortOrder::Title => compare_titles(a, b),
            SortOrder::TitleDesc => compare_titles(b, a),
            SortOrder::Year => compare_years(a, b),
            SortOrder::YearDesc => compare_years(b, a),
        });
    }

    results
}

/// Distinct, alphabetically sorted genres across the whole catalog
pub fn genres(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .filter_map(|movie| movie.genre.as_deref())
        .filter(|genre| !genre.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn matches(movie: &Movie, search: Option<&str>, genre: Option<&str>) -> bool {
    let title_matches =
        search.map_or(true, |needle| movie.title.to_lowercase().contains(needle));
    let genre_matches = genre.map_or(true, |wanted| {
        movie
            .genre
            .as_deref()
            .is_some_and(|g| g.to_lowercase() == wanted)
    });
    title_matches && genre_matches
}

fn non_empty_lowercase(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_lowercase)
}

fn compare_titles(a: &Movie, b: &Movie) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

fn compare_years(a: &Movie, b: &Movie) -> Ordering {
    a.year.unwrap_or(0).cmp(&b.year.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str, year: Option<i32>, genre: Option<&str>) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            description: None,
            year,
            genre: genre.map(str::to_string),
            external_artwork_id: None,
        }
    }

    fn catalog() -> Vec<Movie> {
        vec![
            movie(1, "The Matrix", Some(1999), Some("Sci-Fi")),
            movie(2, "heat", Some(1995), Some("Crime")),
            movie(3, "Alien", Some(1979), Some("sci-fi")),
            movie(4, "Untitled Project", None, None),
            movie(5, "The Matrix Reloaded", Some(2003), Some("Sci-Fi")),
        ]
    }

    fn ids(movies: &[Movie]) -> Vec<i64> {
        movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_no_parameters_returns_input_unchanged() {
        let movies = catalog();
        assert_eq!(apply(&movies, &MovieQuery::default()), movies);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let query = MovieQuery {
            search: Some("MATRIX".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&catalog(), &query)), vec![1, 5]);
    }

    #[test]
    fn test_empty_search_does_not_filter() {
        let query = MovieQuery {
            search: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(apply(&catalog(), &query).len(), 5);
    }

    #[test]
    fn test_genre_is_case_insensitive_exact_match() {
        let query = MovieQuery {
            genre: Some("SCI-FI".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&catalog(), &query)), vec![1, 3, 5]);

        let partial = MovieQuery {
            genre: Some("sci".to_string()),
            ..Default::default()
        };
        assert!(apply(&catalog(), &partial).is_empty());
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let query = MovieQuery {
            search: Some("reloaded".to_string()),
            genre: Some("sci-fi".to_string()),
            sort: None,
        };
        assert_eq!(ids(&apply(&catalog(), &query)), vec![5]);

        let mismatch = MovieQuery {
            search: Some("heat".to_string()),
            genre: Some("sci-fi".to_string()),
            sort: None,
        };
        assert!(apply(&catalog(), &mismatch).is_empty());
    }

    #[test]
    fn test_sort_by_year_treats_missing_as_zero() {
        let movies = vec![
            movie(1, "Inception", Some(2010), None),
            movie(2, "Unknown", None, None),
            movie(3, "Pulp Fiction", Some(1994), None),
        ];
        let query = MovieQuery {
            sort: Some(SortOrder::Year),
            ..Default::default()
        };

        let sorted = apply(&movies, &query);
        assert_eq!(ids(&sorted), vec![2, 3, 1]);
        assert_eq!(sorted[0].year, None);
    }

    #[test]
    fn test_sort_by_year_desc() {
        let query = MovieQuery {
            sort: Some(SortOrder::YearDesc),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&catalog(), &query)), vec![5, 1, 2, 3, 4]);
    }

    #[test]
    fn test_sort_by_title_is_case_insensitive() {
        let query = MovieQuery {
            sort: Some(SortOrder::Title),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&catalog(), &query)), vec![3, 2, 1, 5, 4]);

        let desc = MovieQuery {
            sort: Some(SortOrder::TitleDesc),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&catalog(), &desc)), vec![4, 5, 1, 2, 3]);
    }

    #[test]
    fn test_sort_is_stable() {
        let movies = vec![
            movie(1, "B", Some(2000), None),
            movie(2, "a", Some(1990), None),
            movie(3, "b", Some(2000), None),
            movie(4, "A", None, None),
            movie(5, "C", Some(0), None),
        ];

        let by_year = MovieQuery {
            sort: Some(SortOrder::Year),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&movies, &by_year)), vec![4, 5, 2, 1, 3]);

        let by_year_desc = MovieQuery {
            sort: Some(SortOrder::YearDesc),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&movies, &by_year_desc)), vec![1, 3, 2, 4, 5]);

        let by_title_desc = MovieQuery {
            sort: Some(SortOrder::TitleDesc),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&movies, &by_title_desc)), vec![5, 1, 3, 2, 4]);
    }

    #[test]
    fn test_genres_are_distinct_and_sorted() {
        let movies = catalog();
        assert_eq!(genres(&movies), vec!["Crime", "Sci-Fi", "sci-fi"]);
        assert!(genres(&[]).is_empty());
    }

    #[test]
    fn test_genres_skip_blank_values() {
        let movies = vec![
            movie(1, "Heat", None, Some("Drama")),
            movie(2, "Alien", None, Some("")),
            movie(3, "Brazil", None, None),
        ];
        assert_eq!(genres(&movies), vec!["Drama"]);
    }

    #[test]
    fn test_from_params() {
        let query = MovieQuery::from_params(Some("alien"), None, Some("year_desc"));
        assert_eq!(query.search.as_deref(), Some("alien"));
        assert_eq!(query.sort, Some(SortOrder::YearDesc));

        let unknown = MovieQuery::from_params(None, Some("Drama"), Some("rating"));
        assert_eq!(unknown.sort, None);
        assert_eq!(unknown.genre.as_deref(), Some("Drama"));
    }

    #[test]
    fn test_sort_order_deserialization() {
        let order: SortOrder = serde_json::from_str(r#""title_desc""#).unwrap();
        assert_eq!(order, SortOrder::TitleDesc);
    }
}
