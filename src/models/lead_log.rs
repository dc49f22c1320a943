use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lead_action", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadAction {
    Created,
    Updated,
    StatusChange,
    Assigned,
    Imported,
}

/// Append-only audit entry for a lead, joined with the actor's username.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct LeadLog {
    #[serde(rename = "LogID")]
    pub id: Uuid,
    #[serde(rename = "LeadID")]
    pub lead_id: Uuid,
    #[serde(rename = "UserID")]
    pub user_id: Option<Uuid>,
    pub action_type: LeadAction,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_use_upper_snake_case() {
        assert_eq!(
            serde_json::to_string(&LeadAction::StatusChange).unwrap(),
            "\"STATUS_CHANGE\""
        );
        assert_eq!(
            serde_json::to_string(&LeadAction::Imported).unwrap(),
            "\"IMPORTED\""
        );
    }
}
