use crate::error::Result;
use crate::models::comment::Comment;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_lead(&self, lead_id: Uuid) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT c.id, c.lead_id, c.user_id, c.comment_text, c.created_at,
                   u.username AS username
            FROM comments c
            LEFT JOIN users u ON u.id = c.user_id
            WHERE c.lead_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(lead_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    pub async fn create(&self, lead_id: Uuid, author_id: Uuid, text: &str) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (lead_id, user_id, comment_text)
                VALUES ($1, $2, $3)
                RETURNING id, lead_id, user_id, comment_text, created_at
            )
            SELECT i.id, i.lead_id, i.user_id, i.comment_text, i.created_at,
                   u.username AS username
            FROM inserted i
            LEFT JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(lead_id)
        .bind(author_id)
        .bind(text.trim())
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }
}
