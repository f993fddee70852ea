use axum::Router;
use flipspeak_backend::{
    controllers::cards::CardController,
    domain::{
        auth::JwtManager, card::CardStoreGateway, flashcard::FlashcardService,
        speech::SpeechSynthesisClient,
    },
    infrastructure::{
        config::{Config, Environment, LogFormat, PlaybackSource},
        http::build_router,
        repositories::PgCardRepository,
    },
};
use once_cell::sync::Lazy;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::{clients::Cli, Container};
use testcontainers_modules::postgres::Postgres;
use tokio::net::TcpListener;
use uuid::Uuid;

pub mod assertions;
pub mod db_pool;
pub mod fakes;

use api_client::TestClient;
use db_pool::DatabaseFactory;
use fakes::{FakeStorage, FakeTts, FAKE_STORAGE_URL};
use fixtures::TestFixtures;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-key-for-testing-only";
pub const TEST_JWT_AUDIENCE: &str = "authenticated";

// Docker client for test containers
static DOCKER: Lazy<Cli> = Lazy::new(Cli::default);

// Shared PostgreSQL container for all tests
static SHARED_CONTAINER: Lazy<SharedContainer> = Lazy::new(SharedContainer::new);

static DATABASES: Lazy<DatabaseFactory> =
    Lazy::new(|| DatabaseFactory::new(SHARED_CONTAINER.port));

/// Shared container that lives for the duration of all tests
struct SharedContainer {
    _container: Container<'static, Postgres>,
    port: u16,
}

impl SharedContainer {
    fn new() -> Self {
        let container = DOCKER.run(Postgres::default());
        let port = container.get_host_port_ipv4(5432);

        println!("Started shared PostgreSQL container on port {}", port);

        Self {
            _container: container,
            port,
        }
    }
}

pub struct TestContext {
    pub client: TestClient,
    pub config: Config,
    pub fixtures: TestFixtures,
    pub tts: Arc<FakeTts>,
    pub storage: Arc<FakeStorage>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let database = DATABASES
                .create_database()
                .await
                .expect("Failed to create test database");

            let config = Config {
                database_url: database.database_url.clone(),
                host: "127.0.0.1".to_string(),
                port: 0,
                jwt_secret: TEST_JWT_SECRET.to_string(),
                jwt_audience: TEST_JWT_AUDIENCE.to_string(),
                environment: Environment::Development,
                log_format: LogFormat::Pretty,
                elevenlabs_api_key: "test-elevenlabs-key".to_string(),
                elevenlabs_base_url: "http://localhost:9999".to_string(),
                elevenlabs_voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
                elevenlabs_model_id: "eleven_turbo_v2_5".to_string(),
                storage_url: FAKE_STORAGE_URL.to_string(),
                storage_service_key: "test-service-key".to_string(),
                audio_bucket: "card-audio".to_string(),
                playback_source: PlaybackSource::Stored,
            };

            let tts = Arc::new(FakeTts::default());
            let storage = Arc::new(FakeStorage::default());
            let app = create_app_with_fakes(&config, database.pool.clone(), tts.clone(), storage.clone());

            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            // Wait for server to be ready
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

            Self {
                client: TestClient::new(&base_url),
                config,
                fixtures: TestFixtures::new(database.pool),
                tts,
                storage,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Test databases are left to die with the shared container
        }
    }
}

fn create_app_with_fakes(
    config: &Config,
    pool: PgPool,
    tts: Arc<FakeTts>,
    storage: Arc<FakeStorage>,
) -> Router {
    let pool = Arc::new(pool);

    let card_repo = Arc::new(PgCardRepository::new(pool.clone()));
    let gateway = Arc::new(CardStoreGateway::new(card_repo, storage));
    let speech = Arc::new(SpeechSynthesisClient::new(tts));
    let flashcard_service = Arc::new(FlashcardService::new(
        gateway,
        speech,
        config.playback_source,
    ));
    let card_controller = Arc::new(CardController::new(flashcard_service));
    let jwt_manager = Arc::new(JwtManager::new(
        config.jwt_secret.clone(),
        config.jwt_audience.clone(),
    ));

    build_router(pool, jwt_manager, card_controller)
}

/// Mint an access token the way the hosted auth service would
pub fn generate_test_jwt(user_id: &Uuid, secret: &str) -> String {
    generate_test_jwt_for_audience(user_id, TEST_JWT_AUDIENCE, secret)
}

pub fn generate_test_jwt_for_audience(user_id: &Uuid, audience: &str, secret: &str) -> String {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Claims {
        sub: String,
        email: String,
        aud: String,
        role: String,
        exp: i64,
        iat: i64,
    }

    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: "learner@example.com".to_string(),
        aud: audience.to_string(),
        role: "authenticated".to_string(),
        exp: (now + chrono::Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
