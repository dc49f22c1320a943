use crate::error::Result;
use crate::models::notification::Notification;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

const RECENT_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        conn: &mut PgConnection,
        user_id: Uuid,
        message: &str,
        link: &str,
    ) -> Result<Notification> {
        let row = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, message, link)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, message, link, is_read, created_at
            "#,
        )
        .bind(user_id)
        .bind(message)
        .bind(link)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// The user's most recent notifications, read or not.
    pub async fn list_recent(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let rows = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, message, link, is_read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(RECENT_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64> {
        let res = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }
}
