pub mod behavior_repository;
pub mod db;
pub mod log_repository;

pub use behavior_repository::SqliteBehaviorRepository;
pub use db::DbConnection;
pub use log_repository::SqliteBehaviorLogRepository;
