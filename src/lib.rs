#![recursion_limit = "512"]

pub mod app;
pub mod cache;
pub mod error;
pub mod api {
    pub mod errors;
    pub mod posts;
}
pub mod db {
    pub mod models;
    pub mod repository;
}
pub mod movies {
    pub mod client;
}
pub mod rendering {
    pub mod content;
}
pub mod storage {
    pub mod client;
}
pub mod components {
    pub mod breadcrumbs;
    pub mod create_post;
    pub mod editor;
    pub mod movie_card;
    pub mod movie_search;
    pub mod post_list;
    pub mod post_view;
}
#[cfg(feature = "ssr")]
pub mod state;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(crate::app::App);
}
