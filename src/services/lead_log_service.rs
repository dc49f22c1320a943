use crate::error::Result;
use crate::models::lead_log::{LeadAction, LeadLog};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

#[derive(Clone)]
pub struct LeadLogService {
    pool: PgPool,
}

impl LeadLogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends an activity entry. Takes a connection so the entry commits or
    /// rolls back together with the change it describes.
    pub async fn record(
        conn: &mut PgConnection,
        lead_id: Uuid,
        user_id: Uuid,
        action: LeadAction,
        description: &str,
    ) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO lead_logs (lead_id, user_id, action_type, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(lead_id)
        .bind(user_id)
        .bind(action)
        .bind(description)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!(%lead_id, ?action, "lead activity recorded");
        Ok(id)
    }

    pub async fn list_for_lead(&self, lead_id: Uuid) -> Result<Vec<LeadLog>> {
        let logs = sqlx::query_as::<_, LeadLog>(
            r#"
            SELECT g.id, g.lead_id, g.user_id, g.action_type, g.description, g.created_at,
                   u.username AS username
            FROM lead_logs g
            LEFT JOIN users u ON u.id = g.user_id
            WHERE g.lead_id = $1
            ORDER BY g.created_at DESC, g.id DESC
            "#,
        )
        .bind(lead_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }
}
