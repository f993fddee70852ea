use crate::domain::card::{Card, NewCard};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Owner-scoped access to the hosted `cards` table.
///
/// Every read takes the owner id; a card belonging to someone else is
/// indistinguishable from a missing one.
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// All cards owned by `user_id`, newest first
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Card>>;

    async fn find_for_user(&self, user_id: Uuid, card_id: Uuid) -> AppResult<Option<Card>>;

    async fn insert(&self, card: &NewCard) -> AppResult<Card>;
}

pub struct PgCardRepository {
    pool: Arc<DbPool>,
}

impl PgCardRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardRepository for PgCardRepository {
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Card>> {
        let pool = self.pool.as_ref();
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT id, user_id, front_text, back_text, audio_url, created_at
            FROM cards
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(cards)
    }

    async fn find_for_user(&self, user_id: Uuid, card_id: Uuid) -> AppResult<Option<Card>> {
        let pool = self.pool.as_ref();
        let card = sqlx::query_as::<_, Card>(
            r#"
            SELECT id, user_id, front_text, back_text, audio_url, created_at
            FROM cards
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(card)
    }

    async fn insert(&self, card: &NewCard) -> AppResult<Card> {
        let pool = self.pool.as_ref();
        let card = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (id, user_id, front_text, back_text, audio_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, front_text, back_text, audio_url, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(card.user_id)
        .bind(&card.front_text)
        .bind(&card.back_text)
        .bind(&card.audio_url)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(card)
    }
}
