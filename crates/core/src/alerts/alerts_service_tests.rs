use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::alerts::alerts_model::{AlertOptions, NewNotification, Notification, NOTIFICATION_TYPE_BUDGET_ALERT};
use crate::alerts::alerts_traits::{AlertServiceTrait, NotificationRepositoryTrait};
use crate::alerts::AlertService;
use crate::budgets::{
    Budget, BudgetDetails, BudgetProgress, BudgetServiceTrait, BudgetWithProgress, NewBudget,
    BUDGET_PERIOD_MONTHLY,
};
use crate::categories::{Category, CATEGORY_TYPE_EXPENSE};
use crate::errors::{Error, Result};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn dining_category() -> Category {
    Category {
        id: "cat-1".to_string(),
        user_id: "user-1".to_string(),
        name: "Dining".to_string(),
        category_type: CATEGORY_TYPE_EXPENSE.to_string(),
        created_at: dt(2024, 1, 1),
        updated_at: dt(2024, 1, 1),
    }
}

fn dining_budget(amount: Decimal, threshold: i32, alerts: bool) -> Budget {
    Budget {
        id: "b-1".to_string(),
        user_id: "user-1".to_string(),
        category_id: "cat-1".to_string(),
        amount,
        period: BUDGET_PERIOD_MONTHLY.to_string(),
        start_date: dt(2024, 1, 1),
        end_date: None,
        alerts,
        alert_threshold: threshold,
        created_at: dt(2024, 1, 1),
        updated_at: dt(2024, 1, 1),
    }
}

// --- Mock NotificationRepository ---
struct MockNotificationRepository {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotificationRepository {
    fn new() -> Self {
        Self {
            notifications: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl NotificationRepositoryTrait for MockNotificationRepository {
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
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(notification)
    }

    fn list(&self, user_id: &str) -> Result<Vec<Notification>> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    fn exists_since(
        &self,
        user_id: &str,
        reference_id: &str,
        since: NaiveDateTime,
    ) -> Result<bool> {
        Ok(self.notifications.lock().unwrap().iter().any(|n| {
            n.user_id == user_id
                && n.reference_id.as_deref() == Some(reference_id)
                && n.created_at >= since
        }))
    }
}

// --- Mock BudgetService ---
struct MockBudgetService {
    budgets: Arc<Mutex<Vec<Budget>>>,
    spent_by_budget: Arc<Mutex<HashMap<String, Decimal>>>,
}

impl MockBudgetService {
    fn with(budgets: Vec<Budget>) -> Self {
        Self {
            budgets: Arc::new(Mutex::new(budgets)),
            spent_by_budget: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn set_spent(&self, budget_id: &str, spent: Decimal) {
        self.spent_by_budget
            .lock()
            .unwrap()
            .insert(budget_id.to_string(), spent);
    }
}

#[async_trait]
impl BudgetServiceTrait for MockBudgetService {
    async fn create_budget(&self, _user_id: &str, _new_budget: NewBudget) -> Result<BudgetDetails> {
        unimplemented!()
    }

    fn get_budgets(&self, _user_id: &str) -> Result<Vec<BudgetDetails>> {
        unimplemented!()
    }

    fn get_budget_progress(&self, user_id: &str, budget_id: &str) -> Result<BudgetProgress> {
        let budget = self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == budget_id && b.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Budget not found".to_string()))?;

        let spent = self
            .spent_by_budget
            .lock()
            .unwrap()
            .get(budget_id)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let remaining = (budget.amount - spent).max(Decimal::ZERO);
        let percentage = if budget.amount <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            (spent / budget.amount * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
        };
        let is_over_budget = spent > budget.amount;

        Ok(BudgetProgress {
            budget: BudgetDetails {
                budget,
                category: dining_category(),
            },
            spent,
            remaining,
            percentage,
            is_over_budget,
            transactions: Vec::new(),
        })
    }

    fn get_active_budgets(&self, _user_id: &str) -> Result<Vec<BudgetWithProgress>> {
        unimplemented!()
    }

    fn get_active_budgets_for_category(
        &self,
        user_id: &str,
        category_id: &str,
        as_of: NaiveDateTime,
    ) -> Result<Vec<Budget>> {
        Ok(self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .filter(|b| {
                b.user_id == user_id && b.category_id == category_id && b.is_active_at(as_of)
            })
            .cloned()
            .collect())
    }
}

fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

#[tokio::test]
async fn no_alert_below_threshold() {
    let budget_service = Arc::new(MockBudgetService::with(vec![dining_budget(
        dec!(500),
        80,
        true,
    )]));
    budget_service.set_spent("b-1", dec!(399.99));
    let notifications = Arc::new(MockNotificationRepository::new());
    let service = AlertService::new(
        notifications.clone(),
        budget_service,
        AlertOptions::default(),
    );

    let emitted = service
        .evaluate_category("user-1", "cat-1", now())
        .await
        .unwrap();
    assert!(emitted.is_empty());
    assert!(notifications.list("user-1").unwrap().is_empty());
}

#[tokio::test]
async fn alert_emitted_when_threshold_is_crossed() {
    let budget_service = Arc::new(MockBudgetService::with(vec![dining_budget(
        dec!(500),
        80,
        true,
    )]));
    let notifications = Arc::new(MockNotificationRepository::new());
    let service = AlertService::new(
        notifications.clone(),
        budget_service.clone(),
        AlertOptions::default(),
    );

    // 399.99 of 500 at an 80% threshold: still below the 400.00 line.
    budget_service.set_spent("b-1", dec!(399.99));
    let emitted = service
        .evaluate_category("user-1", "cat-1", now())
        .await
        .unwrap();
    assert!(emitted.is_empty());

    // One more 0.02 expense tips it over.
    budget_service.set_spent("b-1", dec!(400.01));
    let emitted = service
        .evaluate_category("user-1", "cat-1", now())
        .await
        .unwrap();
    assert_eq!(emitted.len(), 1);

    let recorded = notifications.list("user-1").unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].notification_type, NOTIFICATION_TYPE_BUDGET_ALERT);
    assert!(recorded[0].message.contains("Dining"));
    assert!(recorded[0].message.contains("80"));
    assert_eq!(recorded[0].reference_id.as_deref(), Some("b-1"));
}

#[tokio::test]
async fn alert_fires_at_exact_threshold() {
    let budget_service = Arc::new(MockBudgetService::with(vec![dining_budget(
        dec!(500),
        80,
        true,
    )]));
    budget_service.set_spent("b-1", dec!(400.00));
    let service = AlertService::new(
        Arc::new(MockNotificationRepository::new()),
        budget_service,
        AlertOptions::default(),
    );

    let emitted = service
        .evaluate_category("user-1", "cat-1", now())
        .await
        .unwrap();
    assert_eq!(emitted.len(), 1);
}

#[tokio::test]
async fn disabled_alerts_are_skipped() {
    let budget_service = Arc::new(MockBudgetService::with(vec![dining_budget(
        dec!(500),
        80,
        false,
    )]));
    budget_service.set_spent("b-1", dec!(450));
    let service = AlertService::new(
        Arc::new(MockNotificationRepository::new()),
        budget_service,
        AlertOptions::default(),
    );

    let emitted = service
        .evaluate_category("user-1", "cat-1", now())
        .await
        .unwrap();
    assert!(emitted.is_empty());
}

#[tokio::test]
async fn repeat_evaluations_re_alert_by_default() {
    let budget_service = Arc::new(MockBudgetService::with(vec![dining_budget(
        dec!(500),
        80,
        true,
    )]));
    budget_service.set_spent("b-1", dec!(450));
    let notifications = Arc::new(MockNotificationRepository::new());
    let service = AlertService::new(
        notifications.clone(),
        budget_service,
        AlertOptions::default(),
    );

    service.evaluate_category("user-1", "cat-1", now()).await.unwrap();
    service.evaluate_category("user-1", "cat-1", now()).await.unwrap();

    assert_eq!(notifications.list("user-1").unwrap().len(), 2);
}

#[tokio::test]
async fn dedupe_per_day_suppresses_repeat_alerts() {
    let budget_service = Arc::new(MockBudgetService::with(vec![dining_budget(
        dec!(500),
        80,
        true,
    )]));
    budget_service.set_spent("b-1", dec!(450));
    let notifications = Arc::new(MockNotificationRepository::new());
    let service = AlertService::new(
        notifications.clone(),
        budget_service,
        AlertOptions {
            dedupe_per_day: true,
        },
    );

    service.evaluate_category("user-1", "cat-1", now()).await.unwrap();
    service.evaluate_category("user-1", "cat-1", now()).await.unwrap();

    assert_eq!(notifications.list("user-1").unwrap().len(), 1);
}

#[tokio::test]
async fn expired_budgets_are_not_evaluated() {
    let mut budget = dining_budget(dec!(500), 80, true);
    budget.end_date = Some(dt(2024, 12, 31));
    let budget_service = Arc::new(MockBudgetService::with(vec![budget]));
    budget_service.set_spent("b-1", dec!(450));
    let service = AlertService::new(
        Arc::new(MockNotificationRepository::new()),
        budget_service,
        AlertOptions::default(),
    );

    let emitted = service
        .evaluate_category("user-1", "cat-1", dt(2025, 6, 1))
        .await
        .unwrap();
    assert!(emitted.is_empty());
}
