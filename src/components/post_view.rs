use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use serde::{Deserialize, Serialize};

use crate::components::breadcrumbs::{Breadcrumbs, Crumb};
use crate::components::movie_card::MovieInfoCard;
use crate::db::models::MovieSnapshot;

/// Post-page projection of a post, with the body already rendered to
/// sanitized HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub title: String,
    pub slug: String,
    pub content_html: String,
    pub banner_url: String,
    pub published: String,
    pub movie: Option<MovieSnapshot>,
}

/// Server function backing the post page.
///
/// `Ok(None)` means no post carries this slug; a store failure is a real
/// error, so the page can tell "missing" apart from "store down".
#[server(GetPost, "/api")]
pub async fn get_post(slug: String) -> Result<Option<PostView>, ServerFnError> {
    use crate::rendering::content::render_content;

    let state = expect_context::<crate::state::AppState>();

    let post = state
        .post_repo
        .find_by_slug(&slug)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(post.map(|post| PostView {
        title: post.title.clone(),
        slug: post.slug.clone(),
        content_html: render_content(&post.content),
        banner_url: post.banner_url.clone(),
        published: post.created_at.format("%B %-d, %Y").to_string(),
        movie: post.movie(),
    }))
}

/// The single-post page, addressed by slug.
#[component]
pub fn BlogPostPage() -> impl IntoView {
    let params = use_params_map();
    let slug = Memo::new(move |_| params.read().get("slug").unwrap_or_default());

    let post = Resource::new(move || slug.get(), get_post);

    view! {
        <div class="w-full px-4 py-8">
            <article class="mx-auto max-w-3xl">
                <Suspense fallback=|| view! {
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg"></span>
                    </div>
                }>
                    {move || post.get().map(|result| match result {
                        Ok(Some(post)) => view! {
                            <Breadcrumbs trail=vec![
                                Crumb::link("Blog", "/blog"),
                                Crumb::active(post.title.clone(), format!("/blog/{}", post.slug)),
                            ]/>

                            <header class="mb-8 mt-6">
                                <h1 class="text-4xl font-bold leading-tight tracking-tight md:text-5xl">
                                    {post.title.clone()}
                                </h1>
                                <div class="mt-4 flex items-center gap-3">
                                    <div class="flex h-10 w-10 items-center justify-center rounded-full bg-base-200 font-bold opacity-70">
                                        {crate::app::AUTHOR_NAME.chars().next().map(String::from).unwrap_or_default()}
                                    </div>
                                    <div>
                                        <p class="font-semibold">{crate::app::AUTHOR_NAME}</p>
                                        <p class="text-sm opacity-70">"Published on " {post.published.clone()}</p>
                                    </div>
                                </div>
                            </header>

                            {(!post.banner_url.is_empty()).then(|| view! {
                                <img
                                    src=post.banner_url.clone()
                                    alt=format!("Banner image for {}", post.title)
                                    class="mb-8 h-64 w-full rounded-lg object-cover shadow-lg md:h-96"
                                />
                            })}

                            {post.movie.clone().map(|movie| view! {
                                <MovieInfoCard movie=movie/>
                            })}

                            <div class="prose prose-lg max-w-none" inner_html=post.content_html.clone()></div>

                            <section class="mt-12 border-t border-base-300 pt-8">
                                <h2 class="text-2xl font-bold">"Comments"</h2>
                                <div class="mt-6 rounded-lg bg-base-200 p-4 text-center">
                                    <p class="text-sm opacity-70">"Comments feature coming soon!"</p>
                                </div>
                            </section>
                        }.into_any(),
                        Ok(None) => view! {
                            <div class="py-16 text-center">
                                <h1 class="text-3xl font-bold">"Post not found"</h1>
                                <p class="mt-4 opacity-70">"There is no post at this address."</p>
                                <a href="/blog" class="btn btn-primary mt-6">"Back to the blog"</a>
                            </div>
                        }.into_any(),
                        Err(e) => view! {
                            <div class="alert alert-error mt-8">
                                <span>{format!("Error loading post: {e}")}</span>
                            </div>
                        }.into_any(),
                    })}
                </Suspense>
            </article>
        </div>
    }
}
