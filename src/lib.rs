pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::services::{
    comment_service::CommentService, import_export_service::ImportExportService,
    lead_log_service::LeadLogService, lead_service::LeadService,
    notification_service::NotificationService, report_service::ReportService,
    task_service::TaskService, user_service::UserService,
};
use crate::utils::token::SessionKeys;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub sessions: SessionKeys,
    pub lead_service: LeadService,
    pub task_service: TaskService,
    pub comment_service: CommentService,
    pub lead_log_service: LeadLogService,
    pub notification_service: NotificationService,
    pub report_service: ReportService,
    pub import_export_service: ImportExportService,
    pub user_service: UserService,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        let sessions = SessionKeys::from_config(&config);

        let lead_service = LeadService::new(pool.clone());
        let task_service = TaskService::new(pool.clone());
        let comment_service = CommentService::new(pool.clone());
        let lead_log_service = LeadLogService::new(pool.clone());
        let notification_service = NotificationService::new(pool.clone());
        let report_service = ReportService::new(pool.clone());
        let import_export_service = ImportExportService::new(pool.clone());
        let user_service = UserService::new(pool.clone());

        Self {
            pool,
            config: Arc::new(config),
            sessions,
            lead_service,
            task_service,
            comment_service,
            lead_log_service,
            notification_service,
            report_service,
            import_export_service,
            user_service,
        }
    }
}
