use leptos::prelude::*;
use serde::{Deserialize, Serialize};

/// Listing-page projection of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub title: String,
    pub slug: String,
    pub banner_url: String,
    pub published: String,
    pub preview: String,
}

/// Server function backing the blog index.
///
/// Serves from the listing cache when possible. A store failure degrades
/// to an empty listing (logged) so the page still renders; the result of
/// a failed read is never cached.
#[server(ListPosts, "/api")]
pub async fn list_posts() -> Result<Vec<PostSummary>, ServerFnError> {
    use std::sync::Arc;

    use crate::rendering::content::content_preview;

    let state = expect_context::<crate::state::AppState>();

    let posts = match state.listing_cache.get() {
        Some(cached) => cached,
        None => match state.post_repo.list_recent().await {
            Ok(fetched) => state.listing_cache.store(fetched),
            Err(e) => {
                tracing::warn!("Failed to fetch post listing, rendering empty: {e}");
                Arc::new(Vec::new())
            }
        },
    };

    Ok(posts
        .iter()
        .map(|post| PostSummary {
            title: post.title.clone(),
            slug: post.slug.clone(),
            banner_url: post.banner_url.clone(),
            published: post.created_at.format("%B %-d, %Y").to_string(),
            preview: content_preview(&post.content, 150),
        })
        .collect())
}

#[component]
fn PostListItem(post: PostSummary) -> impl IntoView {
    view! {
        <a
            href=format!("/blog/{}", post.slug)
            class="group flex flex-col gap-6 rounded-xl border border-base-300 bg-base-100 p-6 shadow-sm transition hover:shadow-lg sm:flex-row sm:items-center"
        >
            <div class="relative h-32 w-full shrink-0 overflow-hidden rounded-lg sm:w-48">
                {if post.banner_url.is_empty() {
                    view! {
                        <div class="flex h-full w-full items-center justify-center bg-base-200 text-3xl opacity-50">
                            "🎞"
                        </div>
                    }
                        .into_any()
                } else {
                    view! {
                        <img
                            src=post.banner_url.clone()
                            alt=format!("Banner for {}", post.title)
                            class="h-full w-full object-cover transition group-hover:scale-105"
                        />
                    }
                        .into_any()
                }}
            </div>

            <div class="grow">
                <h2 class="text-xl font-semibold group-hover:text-primary">{post.title.clone()}</h2>
                <p class="mt-2 opacity-80">{post.preview.clone()}</p>
                <div class="mt-4 flex items-center justify-between text-sm opacity-70">
                    <p>
                        "By " <span class="font-medium">{crate::app::AUTHOR_NAME}</span> " on "
                        {post.published.clone()}
                    </p>
                    <span class="group-hover:text-primary">"Read post →"</span>
                </div>
            </div>
        </a>
    }
}

/// The blog index page.
#[component]
pub fn BlogListPage() -> impl IntoView {
    let posts = Resource::new(|| (), |_| list_posts());

    view! {
        <div class="mx-auto max-w-4xl px-4 py-12">
            <div class="flex items-center justify-between border-b border-base-300 pb-8">
                <div>
                    <h1 class="text-4xl font-bold tracking-tight">"The Blog"</h1>
                    <p class="mt-2 text-lg opacity-70">
                        "Thoughts, stories, and movie reviews from " {crate::app::AUTHOR_NAME} "."
                    </p>
                </div>
                <a href="/blog/create" class="btn btn-primary">
                    "Create Post"
                </a>
            </div>

            <div class="mt-12 space-y-8">
                <Suspense fallback=|| view! {
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg"></span>
                    </div>
                }>
                    {move || posts.get().map(|result| match result {
                        Ok(posts) if posts.is_empty() => view! {
                            <div class="rounded-lg border-2 border-dashed border-base-300 py-16 text-center">
                                <h3 class="text-xl font-semibold">"No Posts Yet"</h3>
                                <p class="mt-2 opacity-70">
                                    "Looks like there's nothing here. Be the first to create a post!"
                                </p>
                            </div>
                        }.into_any(),
                        Ok(posts) => posts
                            .into_iter()
                            .map(|post| view! { <PostListItem post=post/> })
                            .collect_view()
                            .into_any(),
                        Err(e) => view! {
                            <div class="alert alert-error">
                                <span>{format!("Error loading posts: {e}")}</span>
                            </div>
                        }.into_any(),
                    })}
                </Suspense>
            </div>
        </div>
    }
}
