use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::components::*;
use leptos_router::path;

/// The blog has a single, hardcoded author.
pub const AUTHOR_NAME: &str = "Livya";

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/marquee.css"/>
        <Title text="Livya — Blog & Portfolio"/>

        <Router>
            <nav class="navbar border-b border-base-300 px-6">
                <div class="flex-1">
                    <a href="/" class="text-lg font-bold">{AUTHOR_NAME}</a>
                </div>
                <div class="flex gap-4 text-sm">
                    <a href="/blog" class="link link-hover">"Blog"</a>
                    <a href="/blog/create" class="link link-hover">"Create Post"</a>
                </div>
            </nav>
            <main>
                <Routes fallback=|| view! { "Page not found." }.into_view()>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/blog") view=crate::components::post_list::BlogListPage/>
                    <Route
                        path=path!("/blog/create")
                        view=crate::components::create_post::CreatePostPage
                    />
                    <Route path=path!("/blog/:slug") view=crate::components::post_view::BlogPostPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Portfolio landing page.
#[component]
fn HomePage() -> impl IntoView {
    view! {
        <div class="mx-auto max-w-4xl px-4 py-24 text-center">
            <h1 class="text-5xl font-bold tracking-tight">
                "Hi, I'm " {AUTHOR_NAME} "."
            </h1>
            <p class="mx-auto mt-6 max-w-2xl text-lg opacity-70">
                "I write about the films I love — analysis, stories, and the
                 occasional unapologetic rave."
            </p>
            <div class="mt-10">
                <a href="/blog" class="btn btn-primary btn-lg">
                    "Read the blog"
                </a>
            </div>
        </div>
    }
}
