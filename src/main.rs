#![recursion_limit = "512"]

/// Serve Leptos server functions with the application state in context.
#[cfg(feature = "ssr")]
async fn server_fn_handler(
    axum::extract::State(app_state): axum::extract::State<marquee::state::AppState>,
    request: axum::http::Request<axum::body::Body>,
) -> impl axum::response::IntoResponse {
    use leptos::prelude::provide_context;

    leptos_axum::handle_server_fns_with_context(
        move || provide_context(app_state.clone()),
        request,
    )
    .await
}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use marquee::app::{shell, App};
    use marquee::cache::ListingCache;
    use marquee::db::repository::{MongoPostRepository, PostRepository};
    use marquee::movies::client::{MovieLookup, TmdbClient};
    use marquee::storage::client::{S3StorageClient, StorageClient};
    use std::sync::Arc;
    use tower_http::services::ServeDir;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting marquee server...");

    // Load Leptos options from Cargo.toml metadata
    let conf = get_configuration(None).unwrap();
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.to_string();

    // Connect to MongoDB
    let mongo_uri =
        std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let mongo_db_name =
        std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| "marquee".to_string());

    let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let mongo_db = mongo_client.database(&mongo_db_name);
    let post_repo: Arc<dyn PostRepository> = Arc::new(MongoPostRepository::new(&mongo_db));

    tracing::info!("Connected to MongoDB at {}", mongo_uri);

    // Connect to S3
    let storage_client: Arc<dyn StorageClient> = Arc::new(
        S3StorageClient::from_env()
            .await
            .expect("Failed to initialize S3 client"),
    );

    tracing::info!("S3 storage client initialized");

    // TMDB movie lookups
    let movie_lookup: Arc<dyn MovieLookup> =
        Arc::new(TmdbClient::from_env().expect("Failed to initialize TMDB client"));

    // Build application state: every collaborator constructed exactly once
    let app_state = marquee::state::AppState {
        post_repo,
        storage_client,
        movie_lookup,
        listing_cache: Arc::new(ListingCache::new()),
        leptos_options: leptos_options.clone(),
    };

    // Generate the Leptos route list for SSR
    let routes = generate_route_list(App);

    // Build the Axum router
    let app = Router::new()
        // API routes
        .route(
            "/api/v1/posts",
            axum::routing::post(marquee::api::posts::create_post_handler),
        )
        // Leptos server functions (listing, post fetch, movie lookups)
        .route(
            "/api/{*fn_name}",
            axum::routing::get(server_fn_handler).post(server_fn_handler),
        )
        // The banner ceiling is a validation concern; the transport just
        // needs to let a full form through
        .layer(axum::extract::DefaultBodyLimit::max(16 * 1024 * 1024))
        // Leptos SSR routes
        .leptos_routes_with_context(
            &app_state,
            routes,
            {
                let app_state = app_state.clone();
                move || provide_context(app_state.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        // Static files (including the compiled stylesheet)
        .fallback_service(ServeDir::new(&site_root))
        .with_state(app_state);

    // Start the server
    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}

// When compiled for WASM (client-side), there's no main function.
// The hydrate() function in lib.rs handles client-side initialization.
#[cfg(not(feature = "ssr"))]
fn main() {
    // This is intentionally empty.
    // Client-side hydration is handled by lib.rs::hydrate()
}
