use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::minio::MinIO;
use testcontainers_modules::mongo::Mongo;

use marquee::cache::ListingCache;
use marquee::db::repository::{MongoPostRepository, PostRepository};
use marquee::error::AppError;
use marquee::movies::client::{CastMember, Genre, MovieDetails, MovieLookup, MovieSummary};
use marquee::state::AppState;
use marquee::storage::client::{S3StorageClient, StorageClient};

/// Canned movie lookup so the integration tests never talk to TMDB.
pub struct StubMovieLookup;

#[async_trait]
impl MovieLookup for StubMovieLookup {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, AppError> {
        if query.to_lowercase().starts_with("inter") {
            Ok(vec![MovieSummary {
                id: 157336,
                title: "Interstellar".to_string(),
                release_date: "2014-11-05".to_string(),
                poster_path: Some("/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg".to_string()),
            }])
        } else {
            Ok(vec![])
        }
    }

    async fn details(&self, _id: i64) -> Result<MovieDetails, AppError> {
        Ok(MovieDetails {
            overview: "A team travels through a wormhole.".to_string(),
            cast: vec![CastMember {
                name: "Matthew McConaughey".to_string(),
                character: "Cooper".to_string(),
                profile_path: None,
            }],
            director: "Christopher Nolan".to_string(),
            genres: vec![Genre {
                id: 18,
                name: "Drama".to_string(),
            }],
        })
    }
}

/// Holds running containers and provides the Axum router for integration tests.
///
/// Containers are kept alive for as long as this struct lives. When dropped,
/// containers are stopped and cleaned up automatically.
pub struct TestEnv {
    _mongo: ContainerAsync<Mongo>,
    _minio: ContainerAsync<MinIO>,
    pub router: Router,
    pub repo: Arc<dyn PostRepository>,
    pub storage: Arc<dyn StorageClient>,
    pub cache: Arc<ListingCache>,
    /// Base URL banner objects are publicly served from.
    pub public_base_url: String,
}

impl TestEnv {
    /// Spin up MongoDB and MinIO and build an Axum router wired to them.
    pub async fn start() -> Self {
        // Start containers concurrently
        let (mongo_container, minio_container) =
            tokio::join!(Mongo::default().start(), MinIO::default().start());
        let mongo_container = mongo_container.expect("Failed to start MongoDB container");
        let minio_container = minio_container.expect("Failed to start MinIO container");

        // --- MongoDB ---
        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let mongo_db = mongo_client.database("marquee_test");
        let repo: Arc<dyn PostRepository> = Arc::new(MongoPostRepository::new(&mongo_db));

        // --- MinIO (S3) ---
        let minio_port = minio_container
            .get_host_port_ipv4(9000)
            .await
            .expect("Failed to get MinIO port");
        let minio_endpoint = format!("http://127.0.0.1:{}", minio_port);

        let credentials = aws_sdk_s3::config::Credentials::new(
            "minioadmin",
            "minioadmin",
            None,
            None,
            "test-env",
        );
        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .endpoint_url(&minio_endpoint)
            .region(aws_config::Region::new("us-east-1"))
            .credentials_provider(credentials)
            .load()
            .await;

        let s3_client = aws_sdk_s3::Client::from_conf(
            aws_sdk_s3::config::Builder::from(&s3_config)
                .force_path_style(true)
                .build(),
        );

        // Create test bucket
        let bucket_name = "marquee-test";
        let _ = s3_client.create_bucket().bucket(bucket_name).send().await;

        let public_base_url = format!("{}/{}", minio_endpoint, bucket_name);
        let storage: Arc<dyn StorageClient> = Arc::new(S3StorageClient::new(
            s3_client,
            bucket_name.to_string(),
            public_base_url.clone(),
        ));

        // --- Build AppState ---
        let leptos_options = leptos::prelude::LeptosOptions::builder()
            .output_name("marquee")
            .build();

        let cache = Arc::new(ListingCache::new());
        let app_state = AppState {
            post_repo: repo.clone(),
            storage_client: storage.clone(),
            movie_lookup: Arc::new(StubMovieLookup),
            listing_cache: cache.clone(),
            leptos_options,
        };

        // --- Build Router (API routes only, no Leptos SSR) ---
        let router = Router::new()
            .route(
                "/api/v1/posts",
                axum::routing::post(marquee::api::posts::create_post_handler),
            )
            .layer(axum::extract::DefaultBodyLimit::max(16 * 1024 * 1024))
            .with_state(app_state);

        Self {
            _mongo: mongo_container,
            _minio: minio_container,
            router,
            repo,
            storage,
            cache,
            public_base_url,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .build(self.router.clone())
            .expect("Failed to build TestServer")
    }
}
