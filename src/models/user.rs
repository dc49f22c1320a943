use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Account role. Admins manage accounts and every lead; sales users work the
/// leads assigned to (or created by) them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
pub enum Role {
    Admin,
    #[serde(alias = "Sales User")]
    SalesUser,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::SalesUser => "SalesUser",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full account row, including the credential hash. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserSummary {
    #[serde(rename = "UserID")]
    pub id: Uuid,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Role")]
    pub role: Role,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
}

/// Minimal projection used by the assignment picker.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SalesUserOption {
    #[serde(rename = "UserID")]
    pub id: Uuid,
    #[serde(rename = "Username")]
    pub username: String,
}
