use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    #[serde(rename = "TaskID")]
    pub id: Uuid,
    #[serde(rename = "LeadID")]
    pub lead_id: Uuid,
    #[serde(rename = "UserID")]
    pub user_id: Option<Uuid>,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}
