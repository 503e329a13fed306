use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification emitted when a budget's alert threshold is crossed.
pub const NOTIFICATION_TYPE_BUDGET_ALERT: &str = "BUDGET_ALERT";

/// An append-only notification record. Created by the alert emitter, never
/// mutated afterwards; delivery is a presentation-layer concern.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub reference_id: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for appending a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub reference_id: Option<String>,
}

/// Tunables for the alert emitter. The default mirrors the historical
/// behaviour: every qualifying mutation re-alerts, with no suppression.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertOptions {
    /// When set, at most one alert per budget per calendar day.
    pub dedupe_per_day: bool,
}
