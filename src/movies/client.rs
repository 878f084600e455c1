use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Base URL for TMDB poster/profile images.
pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Search results are capped at this many candidates.
pub const SEARCH_RESULT_LIMIT: usize = 5;

/// The cast list in a details response is truncated to this many entries.
pub const CAST_LIMIT: usize = 6;

/// Shown when no crew member carries the Director job.
pub const DIRECTOR_FALLBACK: &str = "N/A";

/// One candidate movie returned by a title search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieSummary {
    /// Release year, or an empty string when the release date is unknown.
    pub fn release_year(&self) -> &str {
        self.release_date.split('-').next().unwrap_or("")
    }

    /// Full image URL for the given TMDB size (e.g. `w92`, `w500`).
    pub fn poster_url(&self, size: &str) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|path| format!("{}/{}{}", TMDB_IMAGE_BASE, size, path))
    }
}

/// Detailed movie information for the details overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub overview: String,
    pub cast: Vec<CastMember>,
    pub director: String,
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Trait for movie metadata lookups, enabling stub implementations in tests.
///
/// No retry or backoff: a failed call surfaces as `AppError::Lookup` and
/// the caller decides how to degrade.
#[async_trait]
pub trait MovieLookup: Send + Sync {
    /// Search movies by (partial) title. At most [`SEARCH_RESULT_LIMIT`]
    /// candidates are returned.
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, AppError>;

    /// Fetch synopsis, truncated cast, director and genres for a movie.
    async fn details(&self, id: i64) -> Result<MovieDetails, AppError>;
}

// -- Wire types --

#[cfg(any(feature = "ssr", test))]
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<MovieSummary>,
}

#[cfg(any(feature = "ssr", test))]
#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    overview: String,
    #[serde(default)]
    genres: Vec<Genre>,
    #[serde(default)]
    credits: Credits,
}

#[cfg(any(feature = "ssr", test))]
#[derive(Debug, Default, Deserialize)]
struct Credits {
    #[serde(default)]
    cast: Vec<CastMember>,
    #[serde(default)]
    crew: Vec<CrewMember>,
}

#[cfg(any(feature = "ssr", test))]
#[derive(Debug, Deserialize)]
struct CrewMember {
    name: String,
    #[serde(default)]
    job: String,
}

#[cfg(any(feature = "ssr", test))]
fn map_search(response: SearchResponse) -> Vec<MovieSummary> {
    let mut results = response.results;
    results.truncate(SEARCH_RESULT_LIMIT);
    results
}

#[cfg(any(feature = "ssr", test))]
fn map_details(response: DetailsResponse) -> MovieDetails {
    let director = response
        .credits
        .crew
        .iter()
        .find(|person| person.job == "Director")
        .map(|person| person.name.clone())
        .unwrap_or_else(|| DIRECTOR_FALLBACK.to_string());

    let mut cast = response.credits.cast;
    cast.truncate(CAST_LIMIT);

    MovieDetails {
        overview: response.overview,
        cast,
        director,
        genres: response.genres,
    }
}

/// TMDB implementation of MovieLookup.
///
/// Only available when the `ssr` feature is enabled; the browser never
/// talks to TMDB directly, so the API key stays server-side.
#[cfg(feature = "ssr")]
pub struct TmdbClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[cfg(feature = "ssr")]
impl TmdbClient {
    /// Create a new TMDB client.
    ///
    /// Configuration is read from environment variables:
    /// - `TMDB_API_KEY` — the API key, carried as a query parameter
    /// - `TMDB_BASE_URL` (optional) — override for tests
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = std::env::var("TMDB_API_KEY")
            .map_err(|_| AppError::Lookup("TMDB_API_KEY not set".into()))?;
        let base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());

        Self::new(api_key, base_url)
    }

    /// Create with explicit values (useful for testing / DI).
    pub fn new(api_key: String, base_url: String) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Lookup(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            base_url,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);

        let response = self
            .http
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Lookup(format!("Request to TMDB failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Lookup(format!(
                "TMDB responded with status {}",
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Lookup(format!("Failed to parse TMDB response: {}", e)))
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl MovieLookup for TmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, AppError> {
        let response: SearchResponse = self
            .get_json("/search/movie", &[("query", query)])
            .await?;

        Ok(map_search(response))
    }

    async fn details(&self, id: i64) -> Result<MovieDetails, AppError> {
        let response: DetailsResponse = self
            .get_json(
                &format!("/movie/{}", id),
                &[("append_to_response", "credits")],
            )
            .await?;

        Ok(map_details(response))
    }
}
