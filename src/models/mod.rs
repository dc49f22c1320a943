pub mod comment;
pub mod lead;
pub mod lead_log;
pub mod notification;
pub mod report;
pub mod task;
pub mod user;
