pub mod comment_service;
pub mod import_export_service;
pub mod lead_log_service;
pub mod lead_service;
pub mod notification_service;
pub mod report_service;
pub mod task_service;
pub mod user_service;
