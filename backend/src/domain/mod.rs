pub mod analytics;
pub mod behavior_service;
pub mod commands;
pub mod compliance;
pub mod dashboard_service;
pub mod errors;
pub mod log_service;
pub mod models;

pub use behavior_service::BehaviorService;
pub use dashboard_service::DashboardService;
pub use errors::{DomainError, DomainResult};
pub use log_service::LogService;
