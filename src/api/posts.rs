use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cache::ListingCache;
use crate::db::models::{derive_slug, MovieSnapshot, Post};
use crate::db::repository::PostRepository;
use crate::error::AppError;
use crate::storage::client::StorageClient;

/// Minimum accepted title length, in characters.
pub const MIN_TITLE_CHARS: usize = 3;
/// Minimum accepted content length, in characters.
pub const MIN_CONTENT_CHARS: usize = 50;
/// Banner files at or above this size are rejected.
pub const MAX_BANNER_BYTES: usize = 4 * 1024 * 1024;

/// Object-store prefix for banner images.
pub const BANNER_PREFIX: &str = "blog-banners";

const TITLE_TOO_SHORT: &str = "Title must be at least 3 characters long.";
const CONTENT_TOO_SHORT: &str = "Content must be at least 50 characters long.";
const BANNER_TOO_LARGE: &str = "Max image size is 4MB.";

/// Overall status message when field validation fails.
pub const INVALID_FIELDS_MESSAGE: &str = "Missing or invalid fields. Failed to create post.";
/// Status message when the banner upload fails.
pub const STORAGE_FAILURE_MESSAGE: &str = "Storage Error: Failed to upload banner image.";
/// Status message when the document insert fails.
pub const DATABASE_FAILURE_MESSAGE: &str = "Database Error: Failed to create post.";

/// Per-field validation messages for one submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldErrors {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub title: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub banner: Vec<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty() && self.banner.is_empty()
    }
}

/// A banner file as submitted with the form.
#[derive(Debug, Clone)]
pub struct BannerUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Validated-input shape of one creation request, independent of transport.
#[derive(Debug, Clone, Default)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub banner: Option<BannerUpload>,
    pub movie: Option<MovieSnapshot>,
}

/// Result of a creation attempt that ran to a decision.
///
/// Infrastructure failures (upload, insert) are not outcomes; they surface
/// as `Err(AppError)` from [`process_create_post`].
#[derive(Debug)]
pub enum CreatePostOutcome {
    Created { slug: String },
    Rejected { errors: FieldErrors, message: String },
}

/// Wire envelope for `POST /api/v1/posts`, mirrored by the form page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

/// Field-level validation. Produces messages, never side effects.
pub fn validate(input: &CreatePostInput) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if input.title.chars().count() < MIN_TITLE_CHARS {
        errors.title.push(TITLE_TOO_SHORT.to_string());
    }
    if input.content.chars().count() < MIN_CONTENT_CHARS {
        errors.content.push(CONTENT_TOO_SHORT.to_string());
    }
    if let Some(banner) = &input.banner {
        if banner.bytes.len() >= MAX_BANNER_BYTES {
            errors.banner.push(BANNER_TOO_LARGE.to_string());
        }
    }

    errors
}

/// Replace anything outside `[A-Za-z0-9._-]` in an uploaded filename.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Object key for a banner: `blog-banners/<epoch-millis>-<sanitized-name>`.
pub fn banner_key(file_name: &str) -> String {
    format!(
        "{}/{}-{}",
        BANNER_PREFIX,
        Utc::now().timestamp_millis(),
        sanitize_file_name(file_name)
    )
}

/// The address of a post page.
pub fn post_address(slug: &str) -> String {
    format!("/blog/{}", slug)
}

/// Core creation logic — separated from the HTTP layer for testability.
///
/// Validates the submission, uploads the banner (if any), derives the
/// slug, persists the post document, and invalidates the listing cache.
/// The two side effects are not transactional: an insert failure after a
/// successful upload leaves an orphaned banner object behind.
pub async fn process_create_post(
    repo: &dyn PostRepository,
    storage: &dyn StorageClient,
    listing_cache: &ListingCache,
    input: CreatePostInput,
) -> Result<CreatePostOutcome, AppError> {
    // 1. Validate; abort before any side effect on failure
    let errors = validate(&input);
    if !errors.is_empty() {
        return Ok(CreatePostOutcome::Rejected {
            errors,
            message: INVALID_FIELDS_MESSAGE.to_string(),
        });
    }

    // 2. Upload the banner, if one was attached
    let banner_url = match &input.banner {
        Some(banner) => {
            let key = banner_key(&banner.file_name);
            storage
                .put_object(&key, banner.bytes.clone(), &banner.content_type)
                .await?;
            storage.public_url(&key)
        }
        None => String::new(),
    };

    // 3. Derive the slug. Deliberately no uniqueness check: identical
    // titles produce posts sharing one slug.
    let slug = derive_slug(&input.title);

    // 4. Persist the document
    let movie = input.movie.as_ref();
    let post = Post {
        id: None,
        title: input.title.clone(),
        slug: slug.clone(),
        content: input.content.clone(),
        banner_url,
        created_at: Utc::now(),
        movie_api_id: movie.map(|m| m.api_id),
        movie_title: movie.map(|m| m.title.clone()).filter(|t| !t.is_empty()),
        movie_poster_url: movie
            .map(|m| m.poster_url.clone())
            .filter(|u| !u.is_empty()),
        movie_release_date: movie
            .map(|m| m.release_date.clone())
            .filter(|d| !d.is_empty()),
    };

    repo.insert(post).await?;

    // 5. The listing page must pick up the new post on its next read
    listing_cache.invalidate();

    Ok(CreatePostOutcome::Created { slug })
}

/// Axum handler for `POST /api/v1/posts`.
///
/// Accepts the creation form as multipart: `title`, `content`, optional
/// `banner` file, optional `movieApiId`/`movieTitle`/`moviePosterUrl`/
/// `movieReleaseDate` hidden fields.
#[cfg(feature = "ssr")]
pub async fn create_post_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    multipart: axum::extract::Multipart,
) -> axum::response::Response {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    let input = match read_multipart_input(multipart).await {
        Ok(input) => input,
        Err(e) => return e.into_response(),
    };

    let result = process_create_post(
        state.post_repo.as_ref(),
        state.storage_client.as_ref(),
        state.listing_cache.as_ref(),
        input,
    )
    .await;

    match result {
        Ok(CreatePostOutcome::Created { slug }) => (
            StatusCode::CREATED,
            axum::Json(CreatePostResponse {
                redirect: Some(post_address(&slug)),
                ..Default::default()
            }),
        )
            .into_response(),
        Ok(CreatePostOutcome::Rejected { errors, message }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(CreatePostResponse {
                message: Some(message),
                errors: Some(errors),
                ..Default::default()
            }),
        )
            .into_response(),
        Err(AppError::Storage(e)) => {
            tracing::error!("Banner upload failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(CreatePostResponse {
                    message: Some(STORAGE_FAILURE_MESSAGE.to_string()),
                    ..Default::default()
                }),
            )
                .into_response()
        }
        Err(AppError::Database(e)) => {
            tracing::error!("Post insert failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(CreatePostResponse {
                    message: Some(DATABASE_FAILURE_MESSAGE.to_string()),
                    ..Default::default()
                }),
            )
                .into_response()
        }
        Err(other) => other.into_response(),
    }
}

/// Collect the multipart form fields into a [`CreatePostInput`].
#[cfg(feature = "ssr")]
async fn read_multipart_input(
    mut multipart: axum::extract::Multipart,
) -> Result<CreatePostInput, AppError> {
    let mut title = String::new();
    let mut content = String::new();
    let mut banner = None;
    let mut movie_api_id: Option<i64> = None;
    let mut movie_title = String::new();
    let mut movie_poster_url = String::new();
    let mut movie_release_date = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => title = read_text(field).await?,
            "content" => content = read_text(field).await?,
            "banner" => {
                let file_name = field.file_name().unwrap_or("banner.bin").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read banner: {e}")))?;

                // Browsers submit an empty part when no file was picked
                if !bytes.is_empty() {
                    banner = Some(BannerUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            "movieApiId" => movie_api_id = read_text(field).await?.trim().parse().ok(),
            "movieTitle" => movie_title = read_text(field).await?,
            "moviePosterUrl" => movie_poster_url = read_text(field).await?,
            "movieReleaseDate" => movie_release_date = read_text(field).await?,
            _ => {}
        }
    }

    let movie = movie_api_id.map(|api_id| MovieSnapshot {
        api_id,
        title: movie_title,
        poster_url: movie_poster_url,
        release_date: movie_release_date,
    });

    Ok(CreatePostInput {
        title,
        content,
        banner,
        movie,
    })
}

#[cfg(feature = "ssr")]
async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read field: {e}")))
}
