use std::sync::{Arc, RwLock};

use crate::db::models::Post;

/// In-process cache for the blog-listing read.
///
/// The listing page is the only cached render in the application: the
/// listing query populates it, and the post-creation workflow invalidates
/// it so a freshly published post shows up on the next listing request.
/// The lock is never held across an await point.
#[derive(Default)]
pub struct ListingCache {
    entry: RwLock<Option<Arc<Vec<Post>>>>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached listing, if one is present.
    pub fn get(&self) -> Option<Arc<Vec<Post>>> {
        self.entry.read().expect("listing cache lock poisoned").clone()
    }

    /// Cache a freshly fetched listing and return the shared handle.
    pub fn store(&self, posts: Vec<Post>) -> Arc<Vec<Post>> {
        let posts = Arc::new(posts);
        *self.entry.write().expect("listing cache lock poisoned") = Some(posts.clone());
        posts
    }

    /// Drop the cached listing. Called after a post is created.
    pub fn invalidate(&self) {
        *self.entry.write().expect("listing cache lock poisoned") = None;
    }
}
