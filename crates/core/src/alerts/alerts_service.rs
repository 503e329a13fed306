use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::debug;

use super::alerts_model::{AlertOptions, NewNotification, Notification, NOTIFICATION_TYPE_BUDGET_ALERT};
use super::alerts_traits::{AlertServiceTrait, NotificationRepositoryTrait};
use crate::budgets::BudgetServiceTrait;
use crate::errors::Result;

/// Alert emitter: runs after ledger mutations, compares fresh budget
/// progress against each budget's threshold and appends notifications.
/// Deliberately re-alerts on every qualifying mutation unless the per-day
/// de-duplication option is switched on.
pub struct AlertService {
    notification_repository: Arc<dyn NotificationRepositoryTrait>,
    budget_service: Arc<dyn BudgetServiceTrait>,
    options: AlertOptions,
}

impl AlertService {
    pub fn new(
        notification_repository: Arc<dyn NotificationRepositoryTrait>,
        budget_service: Arc<dyn BudgetServiceTrait>,
        options: AlertOptions,
    ) -> Self {
        Self {
            notification_repository,
            budget_service,
            options,
        }
    }
}

#[async_trait]
impl AlertServiceTrait for AlertService {
    async fn evaluate_category(
        &self,
        user_id: &str,
        category_id: &str,
        as_of: NaiveDateTime,
    ) -> Result<Vec<Notification>> {
        let budgets =
            self.budget_service
                .get_active_budgets_for_category(user_id, category_id, as_of)?;

        let mut emitted = Vec::new();
        for budget in budgets {
            if !budget.alerts {
                continue;
            }

            let progress = self.budget_service.get_budget_progress(user_id, &budget.id)?;
            if progress.spent < budget.threshold_amount() {
                continue;
            }

            if self.options.dedupe_per_day {
                let start_of_day = as_of.date().and_hms_opt(0, 0, 0).unwrap_or(as_of);
                if self
                    .notification_repository
                    .exists_since(user_id, &budget.id, start_of_day)?
                {
                    debug!("Suppressing repeat alert for budget {}", budget.id);
                    continue;
                }
            }

            let category_name = progress.budget.category.name.clone();
            let message = format!(
                "You have used {}% of your '{}' budget",
                progress.percentage.round_dp(0),
                category_name
            );

            let notification = self
                .notification_repository
                .create(
                    user_id,
                    NewNotification {
                        notification_type: NOTIFICATION_TYPE_BUDGET_ALERT.to_string(),
                        title: "Budget alert".to_string(),
                        message,
                        reference_id: Some(budget.id.clone()),
                    },
                )
                .await?;
            emitted.push(notification);
        }

        Ok(emitted)
    }

    fn get_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        self.notification_repository.list(user_id)
    }
}
