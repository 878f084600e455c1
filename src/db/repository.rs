use async_trait::async_trait;

use crate::db::models::Post;
use crate::error::AppError;

/// Repository trait for post operations.
///
/// This trait allows mocking the database layer in tests.
///
/// Backend failures surface as `AppError::Database` so callers can tell
/// "no such post" apart from "store unreachable"; the page layer decides
/// how softly to degrade.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post. No slug-uniqueness check is performed.
    async fn insert(&self, post: Post) -> Result<(), AppError>;

    /// Find one post whose slug equals the input.
    ///
    /// When several posts share a slug, which one is returned is
    /// unspecified (first match).
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, AppError>;

    /// List all posts, newest first (by creation timestamp).
    async fn list_recent(&self) -> Result<Vec<Post>, AppError>;
}

/// MongoDB implementation of the PostRepository.
///
/// This is only available when the `ssr` feature is enabled (i.e., server-side).
#[cfg(feature = "ssr")]
pub struct MongoPostRepository {
    collection: mongodb::Collection<Post>,
}

#[cfg(feature = "ssr")]
impl MongoPostRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("posts"),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn insert(&self, post: Post) -> Result<(), AppError> {
        self.collection
            .insert_one(post)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "slug": slug })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_recent(&self) -> Result<Vec<Post>, AppError> {
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        // createdAt is stored as an ISO-8601 string, so a lexicographic
        // descending sort is a chronological descending sort.
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();

        let mut cursor = self
            .collection
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut posts = Vec::new();
        use futures::TryStreamExt;
        while let Some(post) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            posts.push(post);
        }

        Ok(posts)
    }
}
