use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::db::models::MovieSnapshot;
use crate::movies::client::{MovieDetails, TMDB_IMAGE_BASE};

/// Server function fetching the details overlay content for a linked movie.
///
/// Unlike search, failures propagate: the caller must close the overlay.
#[server(GetMovieDetails, "/api")]
pub async fn get_movie_details(movie_api_id: i64) -> Result<MovieDetails, ServerFnError> {
    let state = expect_context::<crate::state::AppState>();

    state
        .movie_lookup
        .details(movie_api_id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Card shown on a post page for its linked movie.
///
/// Clicking the card opens an overlay; the details are fetched lazily on
/// first open and kept for subsequent opens. A failed fetch closes the
/// overlay again.
#[component]
pub fn MovieInfoCard(movie: MovieSnapshot) -> impl IntoView {
    let (open, set_open) = signal(false);
    let (loading, set_loading) = signal(false);
    let details: RwSignal<Option<MovieDetails>> = RwSignal::new(None);

    let movie = StoredValue::new(movie);

    let open_overlay = move |_| {
        set_open.set(true);
        if details.get_untracked().is_some() || loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        let api_id = movie.with_value(|m| m.api_id);
        spawn_local(async move {
            match get_movie_details(api_id).await {
                Ok(fetched) => details.set(Some(fetched)),
                Err(e) => {
                    leptos::logging::warn!("Failed to load movie details: {e}");
                    set_open.set(false);
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <button
            type="button"
            class="group my-8 flex w-full gap-6 rounded-2xl border border-base-300 bg-base-100 p-6 text-left shadow transition hover:shadow-lg"
            on:click=open_overlay
        >
            {movie.with_value(|m| (!m.poster_url.is_empty()).then(|| {
                view! {
                    <img
                        src=m.poster_url.clone()
                        alt=format!("Poster for {}", m.title)
                        class="w-[120px] rounded-xl object-cover shadow"
                    />
                }
            }))}
            <div class="flex flex-col justify-center">
                <span class="text-xs font-bold uppercase tracking-wide text-primary">
                    "Featured Movie"
                </span>
                <h3 class="mt-2 text-3xl font-bold leading-tight">
                    {movie.with_value(|m| m.title.clone())}
                </h3>
                <p class="mt-2 text-sm opacity-70">
                    "Released: " {movie.with_value(|m| m.release_date.clone())}
                </p>
                <span class="mt-4 text-sm font-semibold text-primary opacity-0 transition group-hover:opacity-100">
                    "Explore Details →"
                </span>
            </div>
        </button>

        {move || open.get().then(|| {
            view! {
                <div
                    class="fixed inset-0 z-50 flex items-center justify-center bg-black/60 p-4"
                    on:click=move |_| set_open.set(false)
                >
                    <div
                        class="relative flex max-h-[90vh] w-full max-w-3xl flex-col overflow-y-auto rounded-2xl bg-base-100 p-8 shadow-2xl"
                        on:click=|ev| ev.stop_propagation()
                    >
                        <button
                            type="button"
                            class="btn btn-ghost btn-sm absolute right-4 top-4"
                            on:click=move |_| set_open.set(false)
                        >
                            "✕"
                        </button>

                        {move || match details.get() {
                            None => view! {
                                <div class="flex h-64 items-center justify-center">
                                    <span class="loading loading-spinner loading-lg"></span>
                                </div>
                            }.into_any(),
                            Some(fetched) => view! {
                                <div class="grid grid-cols-1 gap-8 md:grid-cols-3">
                                    <div class="md:col-span-1">
                                        {movie.with_value(|m| (!m.poster_url.is_empty()).then(|| view! {
                                            <img
                                                src=m.poster_url.clone()
                                                alt=format!("Poster for {}", m.title)
                                                class="mb-4 w-full rounded-xl object-cover shadow-lg"
                                            />
                                        }))}
                                        <div class="space-y-3">
                                            <div>
                                                <h4 class="font-semibold text-primary">"Director"</h4>
                                                <p class="text-sm">{fetched.director.clone()}</p>
                                            </div>
                                            <div class="flex flex-wrap gap-2">
                                                {fetched
                                                    .genres
                                                    .iter()
                                                    .map(|genre| view! {
                                                        <span class="badge badge-primary badge-outline">
                                                            {genre.name.clone()}
                                                        </span>
                                                    })
                                                    .collect_view()}
                                            </div>
                                        </div>
                                    </div>
                                    <div class="md:col-span-2">
                                        <h3 class="text-4xl font-bold">
                                            {movie.with_value(|m| m.title.clone())}
                                        </h3>
                                        <p class="mt-1 opacity-70">
                                            {movie.with_value(|m| m.release_date.clone())}
                                        </p>
                                        <div class="mt-6">
                                            <h4 class="text-lg font-semibold text-primary">"Synopsis"</h4>
                                            <p class="mt-2">{fetched.overview.clone()}</p>
                                        </div>
                                        <div class="mt-6">
                                            <h4 class="text-lg font-semibold text-primary">"Main Cast"</h4>
                                            <div class="mt-4 grid grid-cols-1 gap-4 sm:grid-cols-2">
                                                {fetched
                                                    .cast
                                                    .iter()
                                                    .map(|actor| {
                                                        let profile = actor
                                                            .profile_path
                                                            .as_ref()
                                                            .map(|path| format!("{}/w185{}", TMDB_IMAGE_BASE, path));
                                                        view! {
                                                            <div class="flex items-center gap-3">
                                                                {match profile {
                                                                    Some(url) => view! {
                                                                        <img
                                                                            src=url
                                                                            alt=actor.name.clone()
                                                                            class="h-12 w-12 rounded-full object-cover"
                                                                        />
                                                                    }.into_any(),
                                                                    None => view! {
                                                                        <div class="flex h-12 w-12 items-center justify-center rounded-full bg-base-200 text-sm opacity-60">
                                                                            {actor.name.chars().next().map(String::from).unwrap_or_default()}
                                                                        </div>
                                                                    }.into_any(),
                                                                }}
                                                                <div class="min-w-0">
                                                                    <p class="truncate font-semibold">{actor.name.clone()}</p>
                                                                    <p class="truncate text-sm opacity-70">{actor.character.clone()}</p>
                                                                </div>
                                                            </div>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </div>
                                        </div>
                                    </div>
                                </div>
                            }.into_any(),
                        }}
                    </div>
                </div>
            }
        })}
    }
}
