use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{Role, User};
use crate::utils::validation::non_blank;

/// Used by both public registration and admin account creation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(custom(function = "non_blank"), length(max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(custom(function = "non_blank"))]
    pub email: String,
    #[validate(custom(function = "non_blank"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for SessionUser {
    fn from(value: User) -> Self {
        Self {
            user_id: value.id,
            username: value.username,
            email: value.email,
            role: value.role,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: SessionUser,
}
