//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are
//! **not** exposed over the public API. The REST layer maps the public
//! DTOs defined in the `shared` crate to these internal types.

pub mod behavior {
    use crate::domain::models::behavior::BehaviorCategory;

    /// Input for creating a new behavior definition.
    #[derive(Debug, Clone)]
    pub struct CreateBehaviorCommand {
        pub name: String,
        pub description: Option<String>,
        pub category: BehaviorCategory,
        pub icon: Option<String>,
        pub color: Option<String>,
        pub target_frequency: u8,
        /// Appended after the current last position when None
        pub display_order: Option<i32>,
    }

    /// Partial update of an existing behavior; None fields are unchanged.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateBehaviorCommand {
        pub behavior_id: String,
        pub name: Option<String>,
        pub description: Option<String>,
        pub category: Option<BehaviorCategory>,
        pub icon: Option<String>,
        pub color: Option<String>,
        pub target_frequency: Option<u8>,
        pub display_order: Option<i32>,
    }

    /// Full manual ordering of the user's active behaviors.
    #[derive(Debug, Clone)]
    pub struct ReorderBehaviorsCommand {
        pub behavior_ids: Vec<String>,
    }

    /// Query parameters for listing behaviors.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ListBehaviorsQuery {
        pub include_archived: bool,
    }
}

pub mod logs {
    use chrono::NaiveDate;

    /// Input for writing the single log row for (behavior, date).
    #[derive(Debug, Clone)]
    pub struct UpsertLogCommand {
        pub behavior_id: String,
        pub date: NaiveDate,
        pub completed: bool,
        pub note: Option<String>,
    }

    /// Input for removing one (behavior, date) row.
    #[derive(Debug, Clone)]
    pub struct DeleteLogCommand {
        pub behavior_id: String,
        pub date: NaiveDate,
    }

    /// Date-range query over a set of behaviors.
    ///
    /// When `behavior_ids` is None the query expands to all of the user's
    /// behaviors, archived ones included only with `include_archived`.
    /// Explicitly named archived ids also require `include_archived`.
    #[derive(Debug, Clone)]
    pub struct LogRangeQuery {
        pub behavior_ids: Option<Vec<String>>,
        pub start: NaiveDate,
        pub end: NaiveDate,
        pub include_archived: bool,
    }
}
