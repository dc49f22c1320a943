use crate::dto::report_dto::QuickStats;
use crate::error::Result;
use crate::models::report::{PerformanceSummary, StatusCount, TrendPoint, UserPerformance};
use crate::utils::time::{format_day, today, trailing_days};
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use std::collections::HashMap;

pub const TREND_DAYS: u32 = 7;

/// Read-only dashboard aggregates, recomputed on every call.
#[derive(Clone)]
pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn quick_stats(&self) -> Result<QuickStats> {
        Ok(QuickStats {
            leads_by_status: self.status_counts().await?,
            leads_per_user: self.per_user_counts().await?,
            performance_summary: self.summary().await?,
            leads_trend: self.trend(today()).await?,
        })
    }

    pub async fn status_counts(&self) -> Result<Vec<StatusCount>> {
        let rows = sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM leads
            GROUP BY status
            ORDER BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn per_user_counts(&self) -> Result<Vec<UserPerformance>> {
        let rows = sqlx::query_as::<_, UserPerformance>(
            r#"
            SELECT u.username,
                   COUNT(l.id) AS total_leads,
                   COUNT(l.id) FILTER (WHERE l.status = 'Pending') AS pending_count,
                   COUNT(l.id) FILTER (WHERE l.status = 'Interested') AS interested_count,
                   COUNT(l.id) FILTER (WHERE l.status = 'Active') AS active_count,
                   COUNT(l.id) FILTER (WHERE l.status = 'Success') AS success_count,
                   COUNT(l.id) FILTER (WHERE l.status = 'Cancel') AS cancel_count
            FROM users u
            LEFT JOIN leads l ON l.assigned_user_id = u.id
            WHERE u.role = 'SalesUser'
            GROUP BY u.id, u.username
            ORDER BY u.username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn summary(&self) -> Result<PerformanceSummary> {
        let row = sqlx::query_as::<_, PerformanceSummary>(
            r#"
            SELECT COUNT(*) FILTER (WHERE status IN ('Active', 'Success')) AS active_summary,
                   COUNT(*) FILTER (WHERE status = 'Cancel') AS cancel_summary
            FROM leads
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Daily creation counts for the trailing window ending on `end` (UTC days).
    pub async fn trend(&self, end: NaiveDate) -> Result<Vec<TrendPoint>> {
        let days = trailing_days(end, TREND_DAYS);
        let since = days
            .first()
            .copied()
            .unwrap_or(end)
            .and_time(NaiveTime::MIN)
            .and_utc();

        let rows = sqlx::query_as::<_, TrendPoint>(
            r#"
            SELECT TO_CHAR(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS date,
                   COUNT(*) AS count
            FROM leads
            WHERE created_at >= $1
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(fill_trend(&days, rows))
    }
}

/// One point per day in `days`; days without rows count zero.
pub fn fill_trend(days: &[NaiveDate], rows: Vec<TrendPoint>) -> Vec<TrendPoint> {
    let counts: HashMap<String, i64> = rows.into_iter().map(|p| (p.date, p.count)).collect();
    days.iter()
        .map(|day| {
            let date = format_day(*day);
            let count = counts.get(&date).copied().unwrap_or(0);
            TrendPoint { date, count }
        })
        .collect()
}
