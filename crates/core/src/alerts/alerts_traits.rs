use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::alerts_model::{NewNotification, Notification};
use crate::errors::Result;

/// Trait defining the contract for notification repository operations.
#[async_trait]
pub trait NotificationRepositoryTrait: Send + Sync {
    async fn create(&self, user_id: &str, new_notification: NewNotification)
        -> Result<Notification>;

    fn list(&self, user_id: &str) -> Result<Vec<Notification>>;

    /// Whether a notification referencing `reference_id` was recorded at or
    /// after `since`. Backs the per-day de-duplication option.
    fn exists_since(
        &self,
        user_id: &str,
        reference_id: &str,
        since: NaiveDateTime,
    ) -> Result<bool>;
}

/// Trait defining the contract for the alert emitter.
#[async_trait]
pub trait AlertServiceTrait: Send + Sync {
    /// Evaluates every active, alert-enabled budget of the category at
    /// `as_of` and appends a notification for each crossed threshold.
    /// Returns the notifications that were emitted.
    async fn evaluate_category(
        &self,
        user_id: &str,
        category_id: &str,
        as_of: NaiveDateTime,
    ) -> Result<Vec<Notification>>;

    fn get_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;
}
