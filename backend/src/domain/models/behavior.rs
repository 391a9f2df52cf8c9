use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a behavior definition.
///
/// Archiving is the only form of deletion: historical logs keep referencing
/// the definition and stay queryable when explicitly requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorState {
    Active,
    Archived,
}

impl BehaviorState {
    pub fn is_active(&self) -> bool {
        matches!(self, BehaviorState::Active)
    }

    /// Convert from the `is_active` flag column used by storage
    pub fn from_flag(active: bool) -> Self {
        if active {
            BehaviorState::Active
        } else {
            BehaviorState::Archived
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorCategory {
    Health,
    Fitness,
    Nutrition,
    Learning,
    Productivity,
    Wellness,
    Custom,
}

impl BehaviorCategory {
    /// Convert to string for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorCategory::Health => "health",
            BehaviorCategory::Fitness => "fitness",
            BehaviorCategory::Nutrition => "nutrition",
            BehaviorCategory::Learning => "learning",
            BehaviorCategory::Productivity => "productivity",
            BehaviorCategory::Wellness => "wellness",
            BehaviorCategory::Custom => "custom",
        }
    }

    /// Parse from string for storage loading
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "health" => Ok(BehaviorCategory::Health),
            "fitness" => Ok(BehaviorCategory::Fitness),
            "nutrition" => Ok(BehaviorCategory::Nutrition),
            "learning" => Ok(BehaviorCategory::Learning),
            "productivity" => Ok(BehaviorCategory::Productivity),
            "wellness" => Ok(BehaviorCategory::Wellness),
            "custom" => Ok(BehaviorCategory::Custom),
            _ => Err(format!("Invalid behavior category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Behavior {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: BehaviorCategory,
    pub icon: String,
    pub color: String,
    /// Expected completions per 7-day window, 1..=7
    pub target_frequency: u8,
    /// Manual sort position; ties broken by id
    pub display_order: i32,
    pub state: BehaviorState,
    pub created_at: String,
    pub updated_at: String,
}

impl Behavior {
    pub fn generate_id() -> String {
        format!("behavior::{}", Uuid::new_v4())
    }
}
