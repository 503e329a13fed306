use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use super::alerts_model::{NewNotification, Notification};
use super::alerts_traits::NotificationRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::notifications;

/// Repository for the append-only notification store.
pub struct NotificationRepository {
    pool: Arc<DbPool>,
}

impl NotificationRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    async fn create(
        &self,
        user_id: &str,
        new_notification: NewNotification,
    ) -> Result<Notification> {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            notification_type: new_notification.notification_type,
            title: new_notification.title,
            message: new_notification.message,
            reference_id: new_notification.reference_id,
            created_at: chrono::Utc::now().naive_utc(),
        };

        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(notifications::table)
            .values(&notification)
            .execute(&mut conn)?;

        Ok(notification)
    }

    fn list(&self, user_id: &str) -> Result<Vec<Notification>> {
        let mut conn = get_connection(&self.pool)?;

        notifications::table
            .filter(notifications::user_id.eq(user_id))
            .order(notifications::created_at.desc())
            .load::<Notification>(&mut conn)
            .map_err(Error::from)
    }

    fn exists_since(
        &self,
        user_id: &str,
        reference_id: &str,
        since: NaiveDateTime,
    ) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;

        let count: i64 = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .filter(notifications::reference_id.eq(reference_id))
            .filter(notifications::created_at.ge(since))
            .count()
            .get_result(&mut conn)?;

        Ok(count > 0)
    }
}
