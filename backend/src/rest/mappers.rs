//! Domain model to `shared` DTO conversions.

use crate::domain::compliance::ComplianceStatus;
use crate::domain::dashboard_service::{ChecklistItem, ComplianceRow, TrendData};
use crate::domain::models::behavior::{Behavior, BehaviorCategory};
use crate::domain::models::behavior_log::BehaviorLog;

pub fn to_category_dto(category: BehaviorCategory) -> shared::BehaviorCategory {
    match category {
        BehaviorCategory::Health => shared::BehaviorCategory::Health,
        BehaviorCategory::Fitness => shared::BehaviorCategory::Fitness,
        BehaviorCategory::Nutrition => shared::BehaviorCategory::Nutrition,
        BehaviorCategory::Learning => shared::BehaviorCategory::Learning,
        BehaviorCategory::Productivity => shared::BehaviorCategory::Productivity,
        BehaviorCategory::Wellness => shared::BehaviorCategory::Wellness,
        BehaviorCategory::Custom => shared::BehaviorCategory::Custom,
    }
}

pub fn from_category_dto(category: shared::BehaviorCategory) -> BehaviorCategory {
    match category {
        shared::BehaviorCategory::Health => BehaviorCategory::Health,
        shared::BehaviorCategory::Fitness => BehaviorCategory::Fitness,
        shared::BehaviorCategory::Nutrition => BehaviorCategory::Nutrition,
        shared::BehaviorCategory::Learning => BehaviorCategory::Learning,
        shared::BehaviorCategory::Productivity => BehaviorCategory::Productivity,
        shared::BehaviorCategory::Wellness => BehaviorCategory::Wellness,
        shared::BehaviorCategory::Custom => BehaviorCategory::Custom,
    }
}

pub fn to_behavior_dto(behavior: Behavior) -> shared::Behavior {
    shared::Behavior {
        id: behavior.id,
        name: behavior.name,
        description: behavior.description,
        category: to_category_dto(behavior.category),
        icon: behavior.icon,
        color: behavior.color,
        target_frequency: behavior.target_frequency,
        display_order: behavior.display_order,
        is_active: behavior.state.is_active(),
    }
}

pub fn to_log_dto(log: BehaviorLog) -> shared::BehaviorLog {
    shared::BehaviorLog {
        id: log.id,
        behavior_id: log.behavior_id,
        tracked_date: log.tracked_date,
        completed: log.completed,
        note: log.note,
    }
}

pub fn to_checklist_row_dto(item: ChecklistItem) -> shared::ChecklistRow {
    shared::ChecklistRow {
        behavior_id: item.behavior.id,
        name: item.behavior.name,
        icon: item.behavior.icon,
        color: item.behavior.color,
        target_frequency: item.behavior.target_frequency,
        logged: item.logged,
        completed: item.completed,
    }
}

pub fn to_status_dto(status: ComplianceStatus) -> shared::ComplianceStatus {
    match status {
        ComplianceStatus::OnTrack => shared::ComplianceStatus::OnTrack,
        ComplianceStatus::UnderTarget => shared::ComplianceStatus::UnderTarget,
        ComplianceStatus::OffTrack => shared::ComplianceStatus::OffTrack,
    }
}

pub fn to_compliance_entry_dto(row: ComplianceRow) -> shared::ComplianceEntry {
    shared::ComplianceEntry {
        behavior_id: row.behavior_id,
        name: row.name,
        status: to_status_dto(row.compliance.status),
        over_target: row.compliance.over_target,
        expected: row.compliance.expected,
        actual: row.compliance.actual,
    }
}

pub fn to_trend_response_dto(trend: TrendData) -> shared::TrendResponse {
    shared::TrendResponse {
        dates: trend.dates,
        series: trend
            .series
            .into_iter()
            .map(|series| shared::TrendSeries {
                behavior_id: series.behavior_id,
                name: series.name,
                color: series.color,
                values: series.values,
            })
            .collect(),
    }
}
