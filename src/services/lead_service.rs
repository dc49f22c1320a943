use crate::dto::lead_dto::NewLead;
use crate::error::{Error, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::lead::{Lead, LeadStatus};
use crate::models::lead_log::LeadAction;
use crate::services::lead_log_service::LeadLogService;
use crate::services::notification_service::NotificationService;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

const LEAD_SELECT: &str = r#"
    SELECT l.id, l.name, l.contact_info, l.status, l.notes,
           l.assigned_user_id, l.created_by_id, l.created_at,
           ua.username AS assigned_to, uc.username AS created_by
    FROM leads l
    LEFT JOIN users ua ON ua.id = l.assigned_user_id
    LEFT JOIN users uc ON uc.id = l.created_by_id
"#;

#[derive(Debug, FromRow)]
struct LeadOwnership {
    assigned_user_id: Option<Uuid>,
    created_by_id: Uuid,
}

#[derive(Clone)]
pub struct LeadService {
    pool: PgPool,
}

impl LeadService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, lead: NewLead, creator: &CurrentUser) -> Result<Uuid> {
        if lead.assigned_user_id.is_some() && !creator.is_admin() {
            return Err(Error::Forbidden("Only admins can assign leads.".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        if let Some(assignee) = lead.assigned_user_id {
            username_of(&mut tx, assignee).await?;
        }

        let lead_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO leads (name, contact_info, status, notes, assigned_user_id, created_by_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&lead.name)
        .bind(&lead.contact_info)
        .bind(lead.status)
        .bind(&lead.notes)
        .bind(lead.assigned_user_id)
        .bind(creator.user_id)
        .fetch_one(&mut *tx)
        .await?;

        LeadLogService::record(
            &mut tx,
            lead_id,
            creator.user_id,
            LeadAction::Created,
            &format!("Lead created by {}", creator.username),
        )
        .await?;

        tx.commit().await?;
        tracing::info!(%lead_id, created_by = %creator.user_id, "lead created");
        Ok(lead_id)
    }

    /// Admins see every lead; sales users see leads assigned to or created by
    /// them. Newest first either way.
    pub async fn list(&self, caller: &CurrentUser) -> Result<Vec<Lead>> {
        let leads = if caller.is_admin() {
            let sql = format!("{} ORDER BY l.created_at DESC, l.id", LEAD_SELECT);
            sqlx::query_as::<_, Lead>(&sql)
                .fetch_all(&self.pool)
                .await?
        } else {
            let sql = format!(
                "{} WHERE l.assigned_user_id = $1 OR l.created_by_id = $1 ORDER BY l.created_at DESC, l.id",
                LEAD_SELECT
            );
            sqlx::query_as::<_, Lead>(&sql)
                .bind(caller.user_id)
                .fetch_all(&self.pool)
                .await?
        };
        Ok(leads)
    }

    pub async fn get(&self, lead_id: Uuid) -> Result<Lead> {
        let sql = format!("{} WHERE l.id = $1", LEAD_SELECT);
        sqlx::query_as::<_, Lead>(&sql)
            .bind(lead_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(lead_not_found)
    }

    pub async fn get_for(&self, lead_id: Uuid, caller: &CurrentUser) -> Result<Lead> {
        let lead = self.get(lead_id).await?;
        if !caller.is_admin() && !lead.is_visible_to(caller.user_id) {
            return Err(no_access());
        }
        Ok(lead)
    }

    /// Fails with `NotFound` for a missing lead and `Forbidden` when a sales
    /// user is neither its assignee nor its creator.
    pub async fn ensure_access(&self, lead_id: Uuid, caller: &CurrentUser) -> Result<()> {
        let ownership = sqlx::query_as::<_, LeadOwnership>(
            "SELECT assigned_user_id, created_by_id FROM leads WHERE id = $1",
        )
        .bind(lead_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(lead_not_found)?;

        let visible = caller.is_admin()
            || ownership.assigned_user_id == Some(caller.user_id)
            || ownership.created_by_id == caller.user_id;
        if visible {
            Ok(())
        } else {
            Err(no_access())
        }
    }

    pub async fn update_details(
        &self,
        lead_id: Uuid,
        name: &str,
        contact_info: &str,
        notes: Option<&str>,
        caller: &CurrentUser,
    ) -> Result<()> {
        self.ensure_access(lead_id, caller).await?;

        let mut tx = self.pool.begin().await?;
        let res = sqlx::query(
            "UPDATE leads SET name = $2, contact_info = $3, notes = $4 WHERE id = $1",
        )
        .bind(lead_id)
        .bind(name)
        .bind(contact_info)
        .bind(notes)
        .execute(&mut *tx)
        .await?;
        if res.rows_affected() == 0 {
            return Err(lead_not_found());
        }

        LeadLogService::record(
            &mut tx,
            lead_id,
            caller.user_id,
            LeadAction::Updated,
            "Lead details updated",
        )
        .await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn update_status(
        &self,
        lead_id: Uuid,
        status: LeadStatus,
        caller: &CurrentUser,
    ) -> Result<()> {
        self.ensure_access(lead_id, caller).await?;

        let mut tx = self.pool.begin().await?;
        let res = sqlx::query("UPDATE leads SET status = $2 WHERE id = $1")
            .bind(lead_id)
            .bind(status)
            .execute(&mut *tx)
            .await?;
        if res.rows_affected() == 0 {
            return Err(lead_not_found());
        }

        LeadLogService::record(
            &mut tx,
            lead_id,
            caller.user_id,
            LeadAction::StatusChange,
            &format!("Status changed to {}", status),
        )
        .await?;
        tx.commit().await?;
        tracing::info!(%lead_id, %status, "lead status changed");
        Ok(())
    }

    /// Sets or clears the assignee. A new assignee gets exactly one unread
    /// notification; clearing notifies nobody.
    pub async fn assign(
        &self,
        lead_id: Uuid,
        assignee: Option<Uuid>,
        admin: &CurrentUser,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let lead_name = sqlx::query_scalar::<_, String>(
            "SELECT name FROM leads WHERE id = $1 FOR UPDATE",
        )
        .bind(lead_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(lead_not_found)?;

        let assignee_name = match assignee {
            Some(user_id) => Some(username_of(&mut tx, user_id).await?),
            None => None,
        };

        sqlx::query("UPDATE leads SET assigned_user_id = $2 WHERE id = $1")
            .bind(lead_id)
            .bind(assignee)
            .execute(&mut *tx)
            .await?;

        let description = match &assignee_name {
            Some(name) => format!("Lead assigned to {}", name),
            None => "Lead unassigned".to_string(),
        };
        LeadLogService::record(
            &mut tx,
            lead_id,
            admin.user_id,
            LeadAction::Assigned,
            &description,
        )
        .await?;

        if let Some(user_id) = assignee {
            NotificationService::create(
                &mut tx,
                user_id,
                &format!("New Lead Assigned: {}", lead_name),
                &format!("/leads/{}", lead_id),
            )
            .await?;
        }

        tx.commit().await?;
        tracing::info!(%lead_id, assignee = ?assignee, "lead assignment changed");
        Ok(())
    }

    /// Removes the lead with its comments, activity log and tasks.
    pub async fn delete(&self, lead_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM leads WHERE id = $1 FOR UPDATE")
            .bind(lead_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(lead_not_found());
        }

        for statement in [
            "DELETE FROM comments WHERE lead_id = $1",
            "DELETE FROM lead_logs WHERE lead_id = $1",
            "DELETE FROM tasks WHERE lead_id = $1",
            "DELETE FROM leads WHERE id = $1",
        ] {
            sqlx::query(statement)
                .bind(lead_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        tracing::info!(%lead_id, "lead deleted");
        Ok(())
    }
}

async fn username_of(conn: &mut PgConnection, user_id: Uuid) -> Result<String> {
    sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| Error::NotFound("User not found.".to_string()))
}

fn lead_not_found() -> Error {
    Error::NotFound("Lead not found.".to_string())
}

fn no_access() -> Error {
    Error::Forbidden("You do not have access to this lead.".to_string())
}
