use leptos::prelude::*;

use crate::api::posts::{CreatePostResponse, FieldErrors};
use crate::components::breadcrumbs::{Breadcrumbs, Crumb};
use crate::components::editor::PostEditor;
use crate::components::movie_search::MovieSearchBox;
use crate::movies::client::MovieSummary;

/// The post creation form.
///
/// The form is submitted from the hydrated client as multipart form data
/// to `POST /api/v1/posts` (the banner file rules out a plain server-fn
/// call), and the structured result is applied in place: navigate on
/// success, inline field errors otherwise.
#[component]
#[allow(unused_variables)] // parts of the submit path only exist in the hydrated client
pub fn CreatePostPage() -> impl IntoView {
    let content = RwSignal::new(String::new());
    let selected_movie: RwSignal<Option<MovieSummary>> = RwSignal::new(None);

    let (errors, set_errors) = signal(FieldErrors::default());
    let (message, set_message) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);

    let form_ref = NodeRef::<leptos::html::Form>::new();
    let navigate = leptos_router::hooks::use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        #[cfg(feature = "hydrate")]
        {
            let Some(form) = form_ref.get() else {
                return;
            };
            let Ok(form_data) = web_sys::FormData::new_with_form(&form) else {
                return;
            };

            set_submitting.set(true);
            set_message.set(None);
            set_errors.set(FieldErrors::default());

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let submitted = async {
                    let response = gloo_net::http::Request::post("/api/v1/posts")
                        .body(form_data)?
                        .send()
                        .await?;
                    response.json::<CreatePostResponse>().await
                }
                .await;

                match submitted {
                    Ok(outcome) => {
                        if let Some(redirect) = outcome.redirect {
                            navigate(&redirect, Default::default());
                        } else {
                            if let Some(field_errors) = outcome.errors {
                                set_errors.set(field_errors);
                            }
                            set_message.set(outcome.message);
                        }
                    }
                    Err(e) => {
                        leptos::logging::warn!("Post submission failed: {e}");
                        set_message.set(Some(
                            "Failed to submit the post. Please try again.".to_string(),
                        ));
                    }
                }
                set_submitting.set(false);
            });
        }
    };

    view! {
        <div class="w-full px-4 py-8">
            <div class="mx-auto max-w-5xl">
                <Breadcrumbs trail=vec![
                    Crumb::link("Blog", "/blog"),
                    Crumb::active("Create Post", "/blog/create"),
                ]/>

                <div class="mb-8 mt-6">
                    <h1 class="text-3xl font-bold tracking-tight">"Create a New Blog Post"</h1>
                    <p class="mt-2 opacity-70">
                        "Craft your next masterpiece. Link a movie, write your content, and publish."
                    </p>
                </div>

                <form node_ref=form_ref on:submit=on_submit>
                    <div class="grid grid-cols-1 gap-8 lg:grid-cols-3">
                        <div class="space-y-6 lg:col-span-2">
                            <div>
                                <label for="title" class="mb-2 block text-sm font-medium">
                                    "Post Title"
                                </label>
                                <input
                                    id="title"
                                    name="title"
                                    type="text"
                                    required=true
                                    placeholder="e.g., An Analysis of Interstellar's Cinematography"
                                    class="input input-bordered w-full"
                                />
                                {move || errors.get().title.first().cloned().map(|e| view! {
                                    <p class="mt-2 text-xs text-error">{e}</p>
                                })}
                            </div>

                            <div>
                                <label class="mb-2 block text-sm font-medium">"Your Content"</label>
                                <PostEditor value=content/>
                                <input type="hidden" name="content" prop:value=content/>
                                {move || errors.get().content.first().cloned().map(|e| view! {
                                    <p class="mt-2 text-xs text-error">{e}</p>
                                })}
                            </div>
                        </div>

                        <div class="space-y-6 lg:col-span-1">
                            <MovieSearchBox selected=selected_movie/>

                            <div class="card bg-base-100 border border-base-300 p-4">
                                <h2 class="text-base font-semibold">"Banner Image (Optional)"</h2>
                                <div class="mt-4">
                                    <input
                                        id="banner"
                                        name="banner"
                                        type="file"
                                        accept="image/png, image/jpeg, image/webp"
                                        class="file-input file-input-bordered w-full"
                                    />
                                    {move || errors.get().banner.first().cloned().map(|e| view! {
                                        <p class="mt-2 text-xs text-error">{e}</p>
                                    })}
                                </div>
                            </div>
                        </div>
                    </div>

                    <div class="mt-8 flex items-center justify-end gap-4 border-t border-base-300 pt-6">
                        {move || message.get().map(|m| view! {
                            <p class="mr-auto text-sm text-error">{m}</p>
                        })}
                        <a href="/blog" class="btn btn-ghost">
                            "Cancel"
                        </a>
                        <button type="submit" class="btn btn-primary" prop:disabled=submitting>
                            {move || if submitting.get() { "Publishing..." } else { "Publish Post" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
