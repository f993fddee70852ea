use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use flipspeak_backend::controllers::cards::CardController;
use flipspeak_backend::domain::auth::JwtManager;
use flipspeak_backend::domain::card::CardStoreGateway;
use flipspeak_backend::domain::flashcard::FlashcardService;
use flipspeak_backend::domain::speech::SpeechSynthesisClient;
use flipspeak_backend::infrastructure::config::{Config, LogFormat};
use flipspeak_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use flipspeak_backend::infrastructure::http::{build_router, start_http_server};
use flipspeak_backend::infrastructure::repositories::{
    ElevenLabsTtsRepository, PgCardRepository, SupabaseStorageRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting FlipSpeak Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    tracing::info!(
        voice_id = %config.elevenlabs_voice_id,
        model_id = %config.elevenlabs_model_id,
        bucket = %config.audio_bucket,
        playback_source = ?config.playback_source,
        "External services configured"
    );

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Repositories
    let card_repo = Arc::new(PgCardRepository::new(pool.clone()));
    let audio_storage = Arc::new(SupabaseStorageRepository::new(
        config.storage_url.clone(),
        config.storage_service_key.clone(),
        config.audio_bucket.clone(),
    ));
    let tts_repo = Arc::new(ElevenLabsTtsRepository::new(
        config.elevenlabs_base_url.clone(),
        config.elevenlabs_api_key.clone(),
        config.elevenlabs_voice_id.clone(),
        config.elevenlabs_model_id.clone(),
    ));

    // 2. Gateway, speech client and service
    let gateway = Arc::new(CardStoreGateway::new(card_repo, audio_storage));
    let speech = Arc::new(SpeechSynthesisClient::new(tts_repo));
    let flashcard_service = Arc::new(FlashcardService::new(
        gateway,
        speech,
        config.playback_source,
    ));

    // 3. Controllers and auth
    let card_controller = Arc::new(CardController::new(flashcard_service));
    let jwt_manager = Arc::new(JwtManager::new(
        config.jwt_secret.clone(),
        config.jwt_audience.clone(),
    ));

    let router = build_router(pool, jwt_manager, card_controller);
    start_http_server(config, router).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "flipspeak_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
