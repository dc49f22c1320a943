use crate::dto::auth_dto::RegisterPayload;
use crate::error::{Error, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::user::{Role, SalesUserOption, User, UserSummary};
use crate::utils::crypto::{hash_password_blocking, verify_password_blocking};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<UserSummary>> {
        let users = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, username, email, role, created_at
            FROM users
            ORDER BY created_at DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn list_sales(&self) -> Result<Vec<SalesUserOption>> {
        let users = sqlx::query_as::<_, SalesUserOption>(
            "SELECT id, username FROM users WHERE role = $1 ORDER BY username",
        )
        .bind(Role::SalesUser)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn get(&self, user_id: Uuid) -> Result<UserSummary> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, username, email, role, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(user_not_found)
    }

    /// Public self-registration. Sales accounts are always allowed; an Admin
    /// account only while no Admin exists yet, after which admins are created
    /// through [`UserService::create`] by another admin.
    pub async fn register(&self, payload: RegisterPayload) -> Result<Uuid> {
        if payload.role.is_admin() && self.admin_exists().await? {
            return Err(Error::Forbidden(
                "Admin accounts must be created by an administrator.".to_string(),
            ));
        }
        self.create(payload).await
    }

    pub async fn admin_exists(&self) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE role = $1)",
        )
        .bind(Role::Admin)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Emails are stored trimmed and lowercased, so uniqueness is
    /// case-insensitive.
    pub async fn create(&self, payload: RegisterPayload) -> Result<Uuid> {
        let email = normalize_email(&payload.email);
        let username = payload.username.trim().to_string();

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(&email)
        .fetch_one(&self.pool)
        .await?;
        if exists {
            return Err(Error::Conflict("User already exists.".to_string()));
        }

        let password_hash = hash_password_blocking(payload.password).await?;

        // The unique index still catches a concurrent insert (mapped to Conflict).
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&username)
        .bind(&email)
        .bind(&password_hash)
        .bind(payload.role)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(%user_id, role = %payload.role, "user created");
        Ok(user_id)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Unknown email and wrong password fail identically.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let Some(user) = self.find_by_email(email).await? else {
            return Err(invalid_credentials());
        };
        let ok = verify_password_blocking(password.to_string(), user.password_hash.clone()).await?;
        if !ok {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Err(invalid_credentials());
        }
        Ok(user)
    }

    /// Deletes an account. Leads it was working are left unassigned; an
    /// account that created leads cannot be removed.
    pub async fn delete(&self, user_id: Uuid, admin: &CurrentUser) -> Result<()> {
        if user_id == admin.user_id {
            return Err(Error::BadRequest(
                "You cannot delete your own account.".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let found = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Err(user_not_found());
        }

        let created = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM leads WHERE created_by_id = $1",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        if created > 0 {
            return Err(Error::Conflict(format!(
                "User created {} lead(s) and cannot be deleted.",
                created
            )));
        }

        sqlx::query("UPDATE leads SET assigned_user_id = NULL WHERE assigned_user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(%user_id, by = %admin.user_id, "user deleted");
        Ok(())
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn user_not_found() -> Error {
    Error::NotFound("User not found.".to_string())
}

fn invalid_credentials() -> Error {
    Error::Unauthenticated("Invalid credentials.".to_string())
}
