use crate::dto::task_dto::CreateTaskPayload;
use crate::error::{Error, Result};
use crate::models::task::Task;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct TaskService {
    pool: PgPool,
}

impl TaskService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open tasks first, then by due date; undated tasks sort last.
    pub async fn list_for_lead(&self, lead_id: Uuid) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, lead_id, user_id, description, due_date, is_completed, created_at
            FROM tasks
            WHERE lead_id = $1
            ORDER BY is_completed ASC, due_date ASC NULLS LAST, created_at ASC
            "#,
        )
        .bind(lead_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    pub async fn create(
        &self,
        lead_id: Uuid,
        author_id: Uuid,
        payload: CreateTaskPayload,
    ) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (lead_id, user_id, description, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, lead_id, user_id, description, due_date, is_completed, created_at
            "#,
        )
        .bind(lead_id)
        .bind(author_id)
        .bind(payload.description.trim())
        .bind(payload.due_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    pub async fn lead_of(&self, task_id: Uuid) -> Result<Uuid> {
        sqlx::query_scalar::<_, Uuid>("SELECT lead_id FROM tasks WHERE id = $1")
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(task_not_found)
    }

    /// Flips the completion flag in one statement.
    pub async fn toggle(&self, task_id: Uuid) -> Result<Task> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET is_completed = NOT is_completed
            WHERE id = $1
            RETURNING id, lead_id, user_id, description, due_date, is_completed, created_at
            "#,
        )
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(task_not_found)
    }

    pub async fn delete(&self, task_id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(task_not_found());
        }
        Ok(())
    }
}

fn task_not_found() -> Error {
    Error::NotFound("Task not found.".to_string())
}
