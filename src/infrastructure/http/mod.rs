use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::domain::auth::JwtManager;
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::{
    controllers::{cards::CardController, health},
    infrastructure::auth::{auth_middleware, request_id_middleware},
};

/// Assemble all routes; card routes sit behind the access-token check
pub fn build_router(
    pool: Arc<DbPool>,
    jwt_manager: Arc<JwtManager>,
    card_controller: Arc<CardController>,
) -> Router {
    let card_routes = Router::new()
        .route(
            "/api/cards",
            get(CardController::list_cards).post(CardController::create_card),
        )
        .route("/api/cards/:cardId/flip", post(CardController::flip_card))
        .route("/api/cards/:cardId/play", post(CardController::play_card))
        .with_state(card_controller)
        .layer(middleware::from_fn_with_state(jwt_manager, auth_middleware));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(card_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    router: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = if config.is_development() {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
