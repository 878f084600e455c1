use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post stored in the `posts` collection.
///
/// Field names on the wire are camelCase (`bannerUrl`, `createdAt`, ...)
/// to match the collection layout. The movie fields are a denormalized
/// snapshot taken at creation time, not a reference into the movie API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// MongoDB-assigned identifier.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Human-readable title.
    pub title: String,
    /// URL-safe identifier derived from the title. Not unique: two posts
    /// with the same derived title share a slug (see derive_slug).
    pub slug: String,
    /// Post body as produced by the editor (HTML), or markdown.
    pub content: String,
    /// Public URL of the banner image, empty when no banner was uploaded.
    pub banner_url: String,
    /// Creation timestamp, serialized as an ISO-8601 string.
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_api_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_release_date: Option<String>,
}

impl Post {
    /// The movie snapshot embedded in this post, if one was linked.
    pub fn movie(&self) -> Option<MovieSnapshot> {
        self.movie_api_id.map(|api_id| MovieSnapshot {
            api_id,
            title: self.movie_title.clone().unwrap_or_default(),
            poster_url: self.movie_poster_url.clone().unwrap_or_default(),
            release_date: self.movie_release_date.clone().unwrap_or_default(),
        })
    }
}

/// Denormalized movie metadata copied into a post at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSnapshot {
    pub api_id: i64,
    pub title: String,
    pub poster_url: String,
    pub release_date: String,
}

/// Derive the URL slug for a title: lowercase, each whitespace run becomes
/// a single hyphen, everything outside `[a-z0-9_-]` is stripped.
///
/// Pure and deterministic. Intentionally performs no uniqueness check
/// against existing posts.
pub fn derive_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_whitespace = false;
    for c in title.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
        } else {
            in_whitespace = false;
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                slug.push(c);
            }
        }
    }
    slug
}
