pub mod auth_dto;
pub mod comment_dto;
pub mod lead_dto;
pub mod report_dto;
pub mod task_dto;
