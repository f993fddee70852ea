use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        card::CardResponse,
        flashcard::{
            service::CARD_CREATED_MESSAGE, CreateCardRequest, CreateCardResponse,
            FlashcardService, FlashcardServiceApi, FlipResponse,
        },
    },
    error::{AppError, AppResult},
    infrastructure::auth::AuthUser,
};

pub struct CardController {
    flashcard_service: Arc<FlashcardService>,
}

impl CardController {
    pub fn new(flashcard_service: Arc<FlashcardService>) -> Self {
        Self { flashcard_service }
    }

    /// GET /api/cards - List the user's cards, newest first
    pub async fn list_cards(
        State(controller): State<Arc<CardController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<Vec<CardResponse>>> {
        let cards = controller
            .flashcard_service
            .list_cards(auth_user.user_id)
            .await?;
        Ok(Json(cards))
    }

    /// POST /api/cards - Create a card with synthesized audio
    pub async fn create_card(
        State(controller): State<Arc<CardController>>,
        Extension(auth_user): Extension<AuthUser>,
        payload: Result<Json<CreateCardRequest>, JsonRejection>,
    ) -> AppResult<(StatusCode, Json<CreateCardResponse>)> {
        let Json(request) = payload.map_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "Rejected card payload");
            AppError::BadRequest("Invalid card payload".to_string())
        })?;

        let card = controller
            .flashcard_service
            .create_card(auth_user.user_id, request)
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(CreateCardResponse {
                message: CARD_CREATED_MESSAGE.to_string(),
                card: card.into(),
            }),
        ))
    }

    /// POST /api/cards/{cardId}/flip - Toggle the visible face
    pub async fn flip_card(
        State(controller): State<Arc<CardController>>,
        Extension(auth_user): Extension<AuthUser>,
        card_id: Result<Path<Uuid>, PathRejection>,
    ) -> AppResult<Json<FlipResponse>> {
        let card_id = parse_card_id(card_id)?;
        let flip = controller
            .flashcard_service
            .flip_card(auth_user.user_id, card_id)
            .await?;
        Ok(Json(flip))
    }

    /// POST /api/cards/{cardId}/play - Audio for the revealed back
    pub async fn play_card(
        State(controller): State<Arc<CardController>>,
        Extension(auth_user): Extension<AuthUser>,
        card_id: Result<Path<Uuid>, PathRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let card_id = parse_card_id(card_id)?;
        let playback = controller
            .flashcard_service
            .play_card(auth_user.user_id, card_id)
            .await?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
        headers.insert(
            "x-audio-source",
            HeaderValue::from_static(playback.source.as_str()),
        );

        Ok((StatusCode::OK, headers, Body::from(playback.audio_data)))
    }
}

fn parse_card_id(path: Result<Path<Uuid>, PathRejection>) -> AppResult<Uuid> {
    path.map(|Path(card_id)| card_id).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected card id");
        AppError::BadRequest("Invalid card id".to_string())
    })
}
