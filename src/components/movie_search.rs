use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::movies::client::MovieSummary;

/// Queries shorter than this never hit the movie API.
pub const MIN_QUERY_CHARS: usize = 3;

/// Server function proxying title searches to the movie API.
///
/// Lookup failures degrade to an empty result list: the search box should
/// never take the page down because the movie API hiccuped.
#[server(SearchMovies, "/api")]
pub async fn search_movies(query: String) -> Result<Vec<MovieSummary>, ServerFnError> {
    let state = expect_context::<crate::state::AppState>();

    match state.movie_lookup.search(&query).await {
        Ok(results) => Ok(results),
        Err(e) => {
            tracing::warn!("Movie search for '{query}' failed: {e}");
            Ok(Vec::new())
        }
    }
}

/// States of the movie search box.
///
/// `Idle → Searching → {Results | NoResults | Failed}`, returning to
/// `Idle` when the query is cleared (or drops under the minimum length)
/// or a result is selected.
#[derive(Debug, Clone, PartialEq)]
enum SearchPhase {
    Idle,
    Searching,
    Results(Vec<MovieSummary>),
    NoResults,
    Failed,
}

/// Combo box for linking a movie to a post.
///
/// The selection is owned by the creation form; while a movie is selected
/// this component renders the hidden snapshot fields the form submits.
#[component]
pub fn MovieSearchBox(selected: RwSignal<Option<MovieSummary>>) -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let (phase, set_phase) = signal(SearchPhase::Idle);
    // Generation counter: a completed search applies only while it is
    // still the newest one, so a slow early response can never overwrite
    // a later one.
    let (generation, set_generation) = signal(0u64);

    let run_search = move |q: String| {
        let generation_at_start = generation.get_untracked() + 1;
        set_generation.set(generation_at_start);

        if q.chars().count() < MIN_QUERY_CHARS {
            set_phase.set(SearchPhase::Idle);
            return;
        }

        set_phase.set(SearchPhase::Searching);
        spawn_local(async move {
            // Let the keystroke burst settle before hitting the API
            #[cfg(feature = "hydrate")]
            gloo_timers::future::TimeoutFuture::new(250).await;
            if generation.get_untracked() != generation_at_start {
                return;
            }

            let outcome = search_movies(q).await;
            if generation.get_untracked() != generation_at_start {
                // Superseded while in flight; drop the stale response
                return;
            }

            match outcome {
                Ok(results) if results.is_empty() => set_phase.set(SearchPhase::NoResults),
                Ok(results) => set_phase.set(SearchPhase::Results(results)),
                Err(_) => set_phase.set(SearchPhase::Failed),
            }
        });
    };

    let select_movie = move |movie: MovieSummary| {
        set_query.set(movie.title.clone());
        selected.set(Some(movie));
        set_generation.set(generation.get_untracked() + 1);
        set_phase.set(SearchPhase::Idle);
    };

    let clear_selection = move |_| {
        selected.set(None);
        set_query.set(String::new());
        set_generation.set(generation.get_untracked() + 1);
        set_phase.set(SearchPhase::Idle);
    };

    view! {
        <div class="card bg-base-100 border border-base-300 p-4">
            <h2 class="text-base font-semibold">"Link a Movie (Optional)"</h2>

            <div class="relative mt-4">
                <input
                    id="movie-search"
                    type="text"
                    placeholder="Search for a movie..."
                    autocomplete="off"
                    class="input input-bordered w-full"
                    prop:value=query
                    on:input=move |ev| {
                        let q = event_target_value(&ev);
                        set_query.set(q.clone());
                        selected.set(None);
                        run_search(q);
                    }
                />

                // Dropdown, driven by the search state machine
                {move || match phase.get() {
                    SearchPhase::Idle => ().into_any(),
                    SearchPhase::Searching => view! {
                        <div class="absolute z-10 w-full mt-1 p-4 text-center bg-base-100 border border-base-300 rounded-lg shadow-lg">
                            <span class="loading loading-spinner loading-sm"></span>
                        </div>
                    }.into_any(),
                    SearchPhase::NoResults => view! {
                        <div class="absolute z-10 w-full mt-1 p-4 bg-base-100 border border-base-300 rounded-lg shadow-lg">
                            <p class="text-sm opacity-70">"No movies found."</p>
                        </div>
                    }.into_any(),
                    SearchPhase::Failed => view! {
                        <div class="absolute z-10 w-full mt-1 p-4 bg-base-100 border border-base-300 rounded-lg shadow-lg">
                            <p class="text-sm text-error">"Movie search is unavailable right now."</p>
                        </div>
                    }.into_any(),
                    SearchPhase::Results(results) => view! {
                        <ul class="absolute z-10 w-full mt-1 bg-base-100 border border-base-300 rounded-lg shadow-lg max-h-60 overflow-y-auto">
                            {results
                                .into_iter()
                                .map(|movie| {
                                    let thumb = movie.poster_url("w92");
                                    let year = movie.release_year().to_string();
                                    let title = movie.title.clone();
                                    view! {
                                        <li
                                            class="flex items-center gap-3 p-2 cursor-pointer hover:bg-base-200"
                                            on:click=move |_| select_movie(movie.clone())
                                        >
                                            {match thumb {
                                                Some(url) => view! {
                                                    <img src=url alt=title.clone() class="w-10 h-[60px] object-cover rounded"/>
                                                }.into_any(),
                                                None => view! {
                                                    <div class="w-10 h-[60px] bg-base-200 rounded flex items-center justify-center text-xs opacity-60">
                                                        "—"
                                                    </div>
                                                }.into_any(),
                                            }}
                                            <div>
                                                <p class="font-semibold text-sm">{title}</p>
                                                <p class="text-sm opacity-70">{year}</p>
                                            </div>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }.into_any(),
                }}
            </div>

            // Selected movie card + the hidden snapshot fields the form submits
            {move || selected.get().map(|movie| {
                let poster = movie.poster_url("w92");
                let stored_poster = movie.poster_url("w500").unwrap_or_default();
                let year = movie.release_year().to_string();
                view! {
                    <div class="mt-4 p-3 rounded-lg border border-primary/40 bg-primary/5">
                        <div class="flex items-start gap-3">
                            {poster.map(|url| view! {
                                <img src=url alt=movie.title.clone() class="w-[50px] rounded"/>
                            })}
                            <div class="flex-1">
                                <p class="font-semibold text-sm leading-tight">{movie.title.clone()}</p>
                                <p class="text-xs opacity-70">{year}</p>
                            </div>
                            <button
                                type="button"
                                class="btn btn-ghost btn-xs"
                                title="Remove movie"
                                on:click=clear_selection
                            >
                                "✕"
                            </button>
                        </div>
                        <input type="hidden" name="movieApiId" prop:value=movie.id.to_string()/>
                        <input type="hidden" name="movieTitle" prop:value=movie.title.clone()/>
                        <input type="hidden" name="moviePosterUrl" prop:value=stored_poster/>
                        <input type="hidden" name="movieReleaseDate" prop:value=movie.release_date.clone()/>
                    </div>
                }
            })}
        </div>
    }
}
