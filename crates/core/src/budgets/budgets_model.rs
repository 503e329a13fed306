use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::errors::{Error, Result, ValidationError};
use crate::transactions::Transaction;
use crate::utils::{parse_decimal_string_tolerant, parse_timestamp};

/// Budget periods

pub const BUDGET_PERIOD_WEEKLY: &str = "WEEKLY";
pub const BUDGET_PERIOD_MONTHLY: &str = "MONTHLY";
pub const BUDGET_PERIOD_YEARLY: &str = "YEARLY";

pub const BUDGET_PERIODS: [&str; 3] = [
    BUDGET_PERIOD_WEEKLY,
    BUDGET_PERIOD_MONTHLY,
    BUDGET_PERIOD_YEARLY,
];

/// Domain model representing a spending budget scoped to one category.
///
/// A budget never stores its spend; that figure is recomputed from the
/// transaction stream on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub period: String,
    pub start_date: NaiveDateTime,
    pub end_date: Option<NaiveDateTime>,
    pub alerts: bool,
    pub alert_threshold: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Budget {
    /// Whether the budget's `[start, end ?? ∞)` window contains `at`.
    pub fn is_active_at(&self, at: NaiveDateTime) -> bool {
        self.start_date <= at && self.end_date.map_or(true, |end| end >= at)
    }

    /// Spend level at which the alert threshold is crossed.
    pub fn threshold_amount(&self) -> Decimal {
        self.amount * Decimal::from(self.alert_threshold) / Decimal::ONE_HUNDRED
    }
}

/// Database model for budgets.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub amount: String,
    pub period: String,
    pub start_date: NaiveDateTime,
    pub end_date: Option<NaiveDateTime>,
    pub alerts: bool,
    pub alert_threshold: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<BudgetDB> for Budget {
    fn from(db: BudgetDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            amount: parse_decimal_string_tolerant(&db.amount, "amount"),
            period: db.period,
            start_date: db.start_date,
            end_date: db.end_date,
            alerts: db.alerts,
            alert_threshold: db.alert_threshold,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Input model for creating a new budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category_id: String,
    pub amount: Decimal,
    pub period: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub alerts: Option<bool>,
    pub alert_threshold: Option<i32>,
}

impl NewBudget {
    /// Validates the new budget data.
    pub fn validate(&self) -> Result<()> {
        if self.category_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "categoryId".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Budget amount must be positive".to_string(),
            )));
        }
        if !BUDGET_PERIODS.contains(&self.period.as_str()) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown budget period '{}'",
                self.period
            ))));
        }
        if let Some(threshold) = self.alert_threshold {
            if !(0..=100).contains(&threshold) {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Alert threshold must be between 0 and 100".to_string(),
                )));
            }
        }
        let start = parse_timestamp(&self.start_date)?;
        if let Some(end_date) = &self.end_date {
            let end = parse_timestamp(end_date)?;
            if end < start {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Budget end date cannot precede its start date".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Returns true when two `[start, end ?? ∞)` windows share at least one
/// instant. Open ends overlap everything after their start.
pub fn windows_overlap(
    a_start: NaiveDateTime,
    a_end: Option<NaiveDateTime>,
    b_start: NaiveDateTime,
    b_end: Option<NaiveDateTime>,
) -> bool {
    let a_starts_before_b_ends = match b_end {
        Some(end) => a_start <= end,
        None => true,
    };
    let b_starts_before_a_ends = match a_end {
        Some(end) => b_start <= end,
        None => true,
    };
    a_starts_before_b_ends && b_starts_before_a_ends
}

/// Budget with its category inlined.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDetails {
    #[serde(flatten)]
    pub budget: Budget,
    pub category: Category,
}

impl From<(BudgetDB, Category)> for BudgetDetails {
    fn from((db, category): (BudgetDB, Category)) -> Self {
        Self {
            budget: db.into(),
            category,
        }
    }
}

/// Result of a budget progress computation. Pure and idempotent: repeated
/// calls with no intervening mutation return identical figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub budget: BudgetDetails,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub is_over_budget: bool,
    pub transactions: Vec<Transaction>,
}

/// Active budget with its progress inlined, as served to the budgets screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWithProgress {
    #[serde(flatten)]
    pub budget: Budget,
    pub category: Category,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub is_over_budget: bool,
}
