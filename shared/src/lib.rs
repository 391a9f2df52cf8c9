use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category tag for a behavior, used for grouping and presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorCategory {
    Health,
    Fitness,
    Nutrition,
    Learning,
    Productivity,
    Wellness,
    Custom,
}

/// Behavior ID in format: "behavior::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Behavior {
    pub id: String,
    /// Display name, unique among the user's active behaviors
    pub name: String,
    pub description: Option<String>,
    pub category: BehaviorCategory,
    /// Emoji or icon key shown next to the name
    pub icon: String,
    /// Hex color used by the checklist and trend chart
    pub color: String,
    /// Expected completions per 7-day window (1-7)
    pub target_frequency: u8,
    /// Manual sort position; ties broken by id
    pub display_order: i32,
    /// False once the behavior has been archived (soft-deleted)
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBehaviorRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: BehaviorCategory,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub target_frequency: u8,
    /// Appended after the current last position when omitted
    pub display_order: Option<i32>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBehaviorRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<BehaviorCategory>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub target_frequency: Option<u8>,
    pub display_order: Option<i32>,
}

/// Full ordering for the user's active behaviors, first id shown first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderBehaviorsRequest {
    pub behavior_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorListResponse {
    pub behaviors: Vec<Behavior>,
}

/// Log ID in format: "log::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorLog {
    pub id: String,
    pub behavior_id: String,
    /// Calendar date the completion applies to (no time component)
    pub tracked_date: NaiveDate,
    pub completed: bool,
    pub note: Option<String>,
}

/// Writes the single log row for (behavior, date), replacing any existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertLogRequest {
    pub behavior_id: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub note: Option<String>,
}

/// Removes the log row for (behavior, date), returning the day to "unmarked".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteLogRequest {
    pub behavior_id: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteLogResponse {
    pub deleted: bool,
}

/// One checklist entry for a single active behavior on a given day.
///
/// `logged` distinguishes "no row yet" from "recorded as not completed":
/// an unmarked day has `logged == false` and `completed == false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistRow {
    pub behavior_id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub target_frequency: u8,
    pub logged: bool,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistResponse {
    pub date: NaiveDate,
    pub rows: Vec<ChecklistRow>,
}

/// Dashboard-level stats rolled up across all active behaviors.
///
/// The completion rate is the unweighted mean of the per-behavior rates;
/// the streaks are the maximum across behaviors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub week_completion_rate: f64,
    pub best_streak: u32,
    pub current_streak: u32,
}

/// One charted line per behavior: a 0/100 value for every date in the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub behavior_id: String,
    pub name: String,
    pub color: String,
    pub values: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResponse {
    pub dates: Vec<NaiveDate>,
    pub series: Vec<TrendSeries>,
}

/// Classification of actual completions against the weekly target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    OnTrack,
    UnderTarget,
    OffTrack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceEntry {
    pub behavior_id: String,
    pub name: String,
    pub status: ComplianceStatus,
    /// Informational flag: actual exceeded 1.5x the expected count
    pub over_target: bool,
    pub expected: u32,
    pub actual: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResponse {
    pub period: String,
    pub entries: Vec<ComplianceEntry>,
}
