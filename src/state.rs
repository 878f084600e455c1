use std::sync::Arc;

use crate::cache::ListingCache;
use crate::db::repository::PostRepository;
use crate::movies::client::MovieLookup;
use crate::storage::client::StorageClient;

/// Process-lifetime application state.
///
/// Every collaborator is constructed exactly once in `main` and injected
/// here as a trait object, so tests can substitute fakes and no component
/// reaches for a hidden global client.
#[derive(Clone)]
pub struct AppState {
    pub post_repo: Arc<dyn PostRepository>,
    pub storage_client: Arc<dyn StorageClient>,
    pub movie_lookup: Arc<dyn MovieLookup>,
    pub listing_cache: Arc<ListingCache>,
    pub leptos_options: leptos::prelude::LeptosOptions,
}

impl axum::extract::FromRef<AppState> for leptos::prelude::LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}
