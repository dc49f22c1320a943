use serde::Serialize;
use sqlx::FromRow;

use super::lead::LeadStatus;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StatusCount {
    #[serde(rename = "Status")]
    pub status: LeadStatus,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct UserPerformance {
    pub username: String,
    pub total_leads: i64,
    pub pending_count: i64,
    pub interested_count: i64,
    pub active_count: i64,
    pub success_count: i64,
    pub cancel_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct PerformanceSummary {
    pub active_summary: i64,
    pub cancel_summary: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct TrendPoint {
    pub date: String,
    pub count: i64,
}
