use serde::Serialize;

use crate::models::report::{PerformanceSummary, StatusCount, TrendPoint, UserPerformance};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStats {
    pub leads_by_status: Vec<StatusCount>,
    pub leads_per_user: Vec<UserPerformance>,
    pub performance_summary: PerformanceSummary,
    pub leads_trend: Vec<TrendPoint>,
}
