use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Comment {
    #[serde(rename = "CommentID")]
    pub id: Uuid,
    #[serde(rename = "LeadID")]
    pub lead_id: Uuid,
    #[serde(rename = "UserID")]
    pub user_id: Option<Uuid>,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
    pub username: Option<String>,
}
