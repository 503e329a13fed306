use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use num_traits::Zero;
use rust_decimal::Decimal;

use super::budgets_model::{
    windows_overlap, Budget, BudgetDetails, BudgetProgress, BudgetWithProgress, NewBudget,
};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::CategoryRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::transactions::TransactionRepositoryTrait;
use crate::utils::parse_timestamp;

/// Service deriving budget progress from the transaction stream.
///
/// Spend is aggregated on every call; only the account balance is ever
/// cached, and that cache lives with the ledger, not here.
pub struct BudgetService {
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            budget_repository,
            category_repository,
            transaction_repository,
        }
    }

    fn progress_for(&self, user_id: &str, budget: Budget) -> Result<BudgetProgress> {
        let category = self
            .category_repository
            .get_for_user(user_id, &budget.category_id)?;

        let now = chrono::Utc::now().naive_utc();
        let window_end = budget.end_date.unwrap_or(now);

        let transactions = self.transaction_repository.list_expenses_in_window(
            user_id,
            &budget.category_id,
            budget.start_date,
            window_end,
        )?;

        let spent: Decimal = transactions.iter().map(|t| t.amount).sum();
        let remaining = (budget.amount - spent).max(Decimal::ZERO);
        let percentage = if budget.amount <= Decimal::zero() {
            Decimal::ZERO
        } else {
            (spent / budget.amount * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
        };
        let is_over_budget = spent > budget.amount;

        Ok(BudgetProgress {
            budget: BudgetDetails { budget, category },
            spent,
            remaining,
            percentage,
            is_over_budget,
            transactions,
        })
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<BudgetDetails> {
        new_budget.validate()?;

        let category = self
            .category_repository
            .get_for_user(user_id, &new_budget.category_id)?;

        // At most one budget per (user, category, period) with overlapping
        // windows; checked here as a precondition, not a stored constraint.
        let new_start = parse_timestamp(&new_budget.start_date)?;
        let new_end = match &new_budget.end_date {
            Some(end) => Some(parse_timestamp(end)?),
            None => None,
        };
        let siblings = self.budget_repository.list_same_period(
            user_id,
            &new_budget.category_id,
            &new_budget.period,
        )?;
        if siblings.iter().any(|existing| {
            windows_overlap(existing.start_date, existing.end_date, new_start, new_end)
        }) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "A budget for this category and period already covers an overlapping date range"
                    .to_string(),
            )));
        }

        let budget = self.budget_repository.create(user_id, new_budget).await?;
        Ok(BudgetDetails { budget, category })
    }

    fn get_budgets(&self, user_id: &str) -> Result<Vec<BudgetDetails>> {
        self.budget_repository.list(user_id)
    }

    fn get_budget_progress(&self, user_id: &str, budget_id: &str) -> Result<BudgetProgress> {
        let budget = self.budget_repository.get_for_user(user_id, budget_id)?;
        self.progress_for(user_id, budget)
    }

    fn get_active_budgets(&self, user_id: &str) -> Result<Vec<BudgetWithProgress>> {
        let now = chrono::Utc::now().naive_utc();
        let budgets = self.budget_repository.list(user_id)?;

        // O(budgets × category transactions); fine at ledger scale.
        budgets
            .into_iter()
            .filter(|details| details.budget.is_active_at(now))
            .map(|details| {
                let progress = self.progress_for(user_id, details.budget)?;
                Ok(BudgetWithProgress {
                    budget: progress.budget.budget,
                    category: progress.budget.category,
                    spent: progress.spent,
                    remaining: progress.remaining,
                    percentage: progress.percentage,
                    is_over_budget: progress.is_over_budget,
                })
            })
            .collect()
    }

    fn get_active_budgets_for_category(
        &self,
        user_id: &str,
        category_id: &str,
        as_of: NaiveDateTime,
    ) -> Result<Vec<Budget>> {
        let budgets = self
            .budget_repository
            .list_for_category(user_id, category_id)?;
        Ok(budgets
            .into_iter()
            .filter(|budget| budget.is_active_at(as_of))
            .collect())
    }
}
