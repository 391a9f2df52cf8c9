//! Behavior definition management.
//!
//! Create, update, reorder, and archive the user's trackable behaviors.
//! Archiving is a soft delete: the definition drops out of active listings
//! and the checklist, while its historical logs stay queryable.
//!
//! ## Business rules
//!
//! - Names are unique among a user's *active* behaviors; archiving a
//!   behavior frees its name for reuse.
//! - Target frequency is 1..=7 completions per 7-day window.
//! - New behaviors append to the end of the manual ordering unless an
//!   explicit display_order is supplied.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::commands::behavior::{
    CreateBehaviorCommand, ListBehaviorsQuery, ReorderBehaviorsCommand, UpdateBehaviorCommand,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::behavior::{Behavior, BehaviorState};
use crate::storage::traits::BehaviorStorage;

const MAX_NAME_LENGTH: usize = 64;
pub const MIN_TARGET_FREQUENCY: u8 = 1;
pub const MAX_TARGET_FREQUENCY: u8 = 7;

const DEFAULT_ICON: &str = "⭐";
const DEFAULT_COLOR: &str = "#4caf50";

/// Service for managing behavior definitions
#[derive(Clone)]
pub struct BehaviorService {
    behaviors: Arc<dyn BehaviorStorage>,
}

impl BehaviorService {
    pub fn new(behaviors: Arc<dyn BehaviorStorage>) -> Self {
        Self { behaviors }
    }

    fn validate_name(name: &str) -> DomainResult<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "Behavior name cannot be empty".to_string(),
            ));
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(DomainError::Validation(format!(
                "Behavior name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(trimmed.to_string())
    }

    fn validate_target_frequency(target: u8) -> DomainResult<()> {
        if !(MIN_TARGET_FREQUENCY..=MAX_TARGET_FREQUENCY).contains(&target) {
            return Err(DomainError::Validation(format!(
                "Target frequency must be between {} and {}",
                MIN_TARGET_FREQUENCY, MAX_TARGET_FREQUENCY
            )));
        }
        Ok(())
    }

    /// Create a new behavior definition
    pub async fn create_behavior(
        &self,
        user_id: &str,
        command: CreateBehaviorCommand,
    ) -> DomainResult<Behavior> {
        info!(user_id, name = %command.name, "creating behavior");

        let name = Self::validate_name(&command.name)?;
        Self::validate_target_frequency(command.target_frequency)?;

        if self
            .behaviors
            .find_active_by_name(user_id, &name)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateName(name));
        }

        let display_order = match command.display_order {
            Some(order) => order,
            None => self
                .behaviors
                .max_display_order(user_id)
                .await?
                .map(|max| max + 1)
                .unwrap_or(0),
        };

        let now = Utc::now().to_rfc3339();
        let behavior = Behavior {
            id: Behavior::generate_id(),
            user_id: user_id.to_string(),
            name,
            description: command.description,
            category: command.category,
            icon: command.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            color: command.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            target_frequency: command.target_frequency,
            display_order,
            state: BehaviorState::Active,
            created_at: now.clone(),
            updated_at: now,
        };

        self.behaviors.store_behavior(&behavior).await?;
        info!(behavior_id = %behavior.id, "created behavior");
        Ok(behavior)
    }

    /// Update an existing active behavior in place
    pub async fn update_behavior(
        &self,
        user_id: &str,
        command: UpdateBehaviorCommand,
    ) -> DomainResult<Behavior> {
        info!(user_id, behavior_id = %command.behavior_id, "updating behavior");

        let mut behavior = self.get_behavior(user_id, &command.behavior_id).await?;
        if !behavior.state.is_active() {
            return Err(DomainError::InactiveBehavior(behavior.id));
        }

        if let Some(name) = command.name {
            let name = Self::validate_name(&name)?;
            if let Some(existing) = self.behaviors.find_active_by_name(user_id, &name).await? {
                if existing.id != behavior.id {
                    return Err(DomainError::DuplicateName(name));
                }
            }
            behavior.name = name;
        }
        if let Some(description) = command.description {
            behavior.description = Some(description);
        }
        if let Some(category) = command.category {
            behavior.category = category;
        }
        if let Some(icon) = command.icon {
            behavior.icon = icon;
        }
        if let Some(color) = command.color {
            behavior.color = color;
        }
        if let Some(target) = command.target_frequency {
            Self::validate_target_frequency(target)?;
            behavior.target_frequency = target;
        }
        if let Some(order) = command.display_order {
            behavior.display_order = order;
        }

        behavior.updated_at = Utc::now().to_rfc3339();
        self.behaviors.update_behavior(&behavior).await?;
        Ok(behavior)
    }

    /// Apply a full manual ordering: the first id gets position 0.
    /// Every id must name one of the user's active behaviors.
    pub async fn reorder_behaviors(
        &self,
        user_id: &str,
        command: ReorderBehaviorsCommand,
    ) -> DomainResult<Vec<Behavior>> {
        info!(user_id, count = command.behavior_ids.len(), "reordering behaviors");

        let active = self.behaviors.list_behaviors(user_id, false).await?;
        for behavior_id in &command.behavior_ids {
            if !active.iter().any(|b| &b.id == behavior_id) {
                return Err(DomainError::NotFound(behavior_id.clone()));
            }
        }

        let orders: Vec<(String, i32)> = command
            .behavior_ids
            .iter()
            .enumerate()
            .map(|(position, id)| (id.clone(), position as i32))
            .collect();
        self.behaviors.set_display_orders(user_id, &orders).await?;

        Ok(self.behaviors.list_behaviors(user_id, false).await?)
    }

    /// Soft-delete a behavior. Logs are untouched and stay queryable.
    pub async fn archive_behavior(
        &self,
        user_id: &str,
        behavior_id: &str,
    ) -> DomainResult<Behavior> {
        info!(user_id, behavior_id, "archiving behavior");

        let mut behavior = self.get_behavior(user_id, behavior_id).await?;
        if !behavior.state.is_active() {
            return Err(DomainError::InactiveBehavior(behavior.id));
        }

        behavior.state = BehaviorState::Archived;
        behavior.updated_at = Utc::now().to_rfc3339();
        self.behaviors.update_behavior(&behavior).await?;
        Ok(behavior)
    }

    /// List behaviors sorted by display_order, ties by id
    pub async fn list_behaviors(
        &self,
        user_id: &str,
        query: ListBehaviorsQuery,
    ) -> DomainResult<Vec<Behavior>> {
        Ok(self
            .behaviors
            .list_behaviors(user_id, query.include_archived)
            .await?)
    }

    /// Fetch one behavior owned by the user
    pub async fn get_behavior(&self, user_id: &str, behavior_id: &str) -> DomainResult<Behavior> {
        self.behaviors
            .get_behavior(user_id, behavior_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(behavior_id.to_string()))
    }
}
