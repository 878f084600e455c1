#![cfg(feature = "ssr")]

mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use marquee::api::posts::CreatePostResponse;

const VALID_CONTENT: &str = "<p>A post body comfortably over the fifty character minimum.</p>";

// Minimal 1x1 PNG
const PNG_BYTES: [u8; 69] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
    0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1
    0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, // bit depth, color type, CRC
    0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, // IDAT chunk
    0x08, 0xD7, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, // compressed data
    0x00, 0x02, 0x00, 0x01, 0xE2, 0x21, 0xBC, 0x33, // CRC
    0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, // IEND chunk
    0xAE, 0x42, 0x60, 0x82,
];

fn base_form(title: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title.to_string())
        .add_text("content", VALID_CONTENT.to_string())
}

#[tokio::test]
async fn create_post_success_without_banner_or_movie() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let response = server
        .post("/api/v1/posts")
        .multipart(base_form("My First Post"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: CreatePostResponse = response.json();
    assert_eq!(body.redirect.as_deref(), Some("/blog/my-first-post"));
    assert!(body.errors.is_none());

    // Exactly one document, addressable by its slug
    let posts = env.repo.list_recent().await.unwrap();
    assert_eq!(posts.len(), 1);

    let post = env
        .repo
        .find_by_slug("my-first-post")
        .await
        .unwrap()
        .expect("post should be stored");
    assert_eq!(post.title, "My First Post");
    assert!(post.banner_url.is_empty());
    assert!(post.movie().is_none());
}

#[tokio::test]
async fn create_post_rejects_short_title() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .post("/api/v1/posts")
        .multipart(base_form("Hi"))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: CreatePostResponse = response.json();
    let errors = body.errors.expect("field errors expected");
    assert!(!errors.title.is_empty());

    assert!(env.repo.list_recent().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_post_rejects_short_content() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let form = MultipartForm::new()
        .add_text("title", "A Fine Title")
        .add_text("content", "too short");

    let response = server.post("/api/v1/posts").multipart(form).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: CreatePostResponse = response.json();
    assert!(!body.errors.expect("field errors expected").content.is_empty());

    assert!(env.repo.list_recent().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_post_rejects_banner_at_the_size_ceiling() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let oversized = vec![0u8; 4 * 1024 * 1024];
    let form = base_form("With Huge Banner").add_part(
        "banner",
        Part::bytes(oversized)
            .file_name("huge.png")
            .mime_type("image/png"),
    );

    let response = server.post("/api/v1/posts").multipart(form).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: CreatePostResponse = response.json();
    assert!(!body.errors.expect("field errors expected").banner.is_empty());

    assert!(env.repo.list_recent().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_post_with_banner_uploads_and_links_it() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let form = base_form("Banner Post").add_part(
        "banner",
        Part::bytes(PNG_BYTES.to_vec())
            .file_name("hero image.png")
            .mime_type("image/png"),
    );

    let response = server.post("/api/v1/posts").multipart(form).await;
    response.assert_status(StatusCode::CREATED);

    let post = env
        .repo
        .find_by_slug("banner-post")
        .await
        .unwrap()
        .expect("post should be stored");

    let prefix = format!("{}/", env.public_base_url);
    let key = post
        .banner_url
        .strip_prefix(&prefix)
        .expect("banner URL should point at the public store");
    assert!(key.starts_with("blog-banners/"));
    assert!(key.ends_with("-hero_image.png"), "got key: {key}");

    // The stored object holds the uploaded bytes
    let stored = env
        .storage
        .get_object(key)
        .await
        .unwrap()
        .expect("banner object should exist");
    assert_eq!(stored, PNG_BYTES.to_vec());
}

#[tokio::test]
async fn duplicate_titles_produce_two_documents_sharing_one_slug() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    for _ in 0..2 {
        let response = server
            .post("/api/v1/posts")
            .multipart(base_form("Same Title Twice"))
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    let posts = env.repo.list_recent().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].slug, posts[1].slug);

    // Slug lookup arbitrarily resolves to one of the duplicates
    let found = env
        .repo
        .find_by_slug("same-title-twice")
        .await
        .unwrap()
        .expect("one of the duplicates should be returned");
    assert_eq!(found.title, "Same Title Twice");
}

#[tokio::test]
async fn create_post_persists_the_movie_snapshot() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let form = base_form("A Night With Interstellar")
        .add_text("movieApiId", "157336")
        .add_text("movieTitle", "Interstellar")
        .add_text(
            "moviePosterUrl",
            "https://image.tmdb.org/t/p/w500/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg",
        )
        .add_text("movieReleaseDate", "2014-11-05");

    let response = server.post("/api/v1/posts").multipart(form).await;
    response.assert_status(StatusCode::CREATED);

    let post = env
        .repo
        .find_by_slug("a-night-with-interstellar")
        .await
        .unwrap()
        .expect("post should be stored");

    assert_eq!(post.movie_api_id, Some(157336));
    assert_eq!(post.movie_title.as_deref(), Some("Interstellar"));
    assert_eq!(post.movie_release_date.as_deref(), Some("2014-11-05"));
}

#[tokio::test]
async fn creation_invalidates_the_listing_cache() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    // Simulate a listing page having populated the cache
    env.cache.store(vec![]);
    assert!(env.cache.get().is_some());

    let response = server
        .post("/api/v1/posts")
        .multipart(base_form("Cache Buster"))
        .await;
    response.assert_status(StatusCode::CREATED);

    assert!(env.cache.get().is_none());
}
