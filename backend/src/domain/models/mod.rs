pub mod behavior;
pub mod behavior_log;
