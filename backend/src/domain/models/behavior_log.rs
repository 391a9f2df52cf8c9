use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One day's completion record for one behavior.
///
/// At most one row exists per (user, behavior, tracked_date); a second
/// write for the same key overwrites. A date with no row is "not yet
/// recorded", which downstream analytics treat as not completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorLog {
    pub id: String,
    pub user_id: String,
    pub behavior_id: String,
    pub tracked_date: NaiveDate,
    pub completed: bool,
    pub note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl BehaviorLog {
    pub fn generate_id() -> String {
        format!("log::{}", Uuid::new_v4())
    }
}
