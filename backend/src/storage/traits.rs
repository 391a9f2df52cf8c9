//! # Storage Traits
//!
//! Storage abstraction traits that allow different backends to be used
//! interchangeably by the domain layer. Services only ever see these
//! traits, so the aggregation logic has no persistence-technology
//! coupling and can be exercised against in-memory databases in tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::models::behavior::Behavior;
use crate::domain::models::behavior_log::BehaviorLog;

/// Interface for behavior definition storage operations
#[async_trait]
pub trait BehaviorStorage: Send + Sync {
    /// Store a new behavior definition
    async fn store_behavior(&self, behavior: &Behavior) -> Result<()>;

    /// Retrieve a specific behavior by id, scoped to its owning user
    async fn get_behavior(&self, user_id: &str, behavior_id: &str) -> Result<Option<Behavior>>;

    /// List behaviors ordered by display_order ascending, ties by id.
    /// Archived behaviors are included only when `include_archived` is set.
    async fn list_behaviors(&self, user_id: &str, include_archived: bool) -> Result<Vec<Behavior>>;

    /// Update an existing behavior in place
    async fn update_behavior(&self, behavior: &Behavior) -> Result<()>;

    /// Find an *active* behavior by exact name, for uniqueness checks
    async fn find_active_by_name(&self, user_id: &str, name: &str) -> Result<Option<Behavior>>;

    /// Highest display_order among the user's active behaviors, if any.
    /// Archived behaviors no longer occupy order slots.
    async fn max_display_order(&self, user_id: &str) -> Result<Option<i32>>;

    /// Assign display orders in bulk, atomically
    async fn set_display_orders(&self, user_id: &str, orders: &[(String, i32)]) -> Result<()>;
}

/// Interface for behavior log storage operations
#[async_trait]
pub trait BehaviorLogStorage: Send + Sync {
    /// Insert-or-update the single row keyed by (user, behavior, date).
    /// Must be atomic on the unique key: concurrent writers may race but
    /// exactly one row survives. Returns the stored row.
    async fn upsert_log(&self, log: &BehaviorLog) -> Result<BehaviorLog>;

    /// Retrieve the log row for one (behavior, date), if any
    async fn get_log(
        &self,
        user_id: &str,
        behavior_id: &str,
        date: NaiveDate,
    ) -> Result<Option<BehaviorLog>>;

    /// List all rows for the given behaviors with tracked_date in
    /// [start, end] inclusive, ordered by tracked_date ascending
    async fn query_logs(
        &self,
        user_id: &str,
        behavior_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<BehaviorLog>>;

    /// Delete the row for one (behavior, date).
    /// Returns true if a row was found and deleted.
    async fn delete_log(&self, user_id: &str, behavior_id: &str, date: NaiveDate) -> Result<bool>;
}
