use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::budgets_model::{Budget, BudgetDetails, BudgetProgress, BudgetWithProgress, NewBudget};
use crate::errors::Result;

/// Trait defining the contract for budget repository operations.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    async fn create(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;

    fn get_for_user(&self, user_id: &str, budget_id: &str) -> Result<Budget>;

    fn list(&self, user_id: &str) -> Result<Vec<BudgetDetails>>;

    fn list_for_category(&self, user_id: &str, category_id: &str) -> Result<Vec<Budget>>;

    /// Budgets sharing (user, category, period): the candidate set for the
    /// overlap precondition.
    fn list_same_period(
        &self,
        user_id: &str,
        category_id: &str,
        period: &str,
    ) -> Result<Vec<Budget>>;
}

/// Trait defining the contract for budget service operations.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<BudgetDetails>;

    fn get_budgets(&self, user_id: &str) -> Result<Vec<BudgetDetails>>;

    /// Recomputes spent/remaining/percentage for one budget from the
    /// transaction stream. Never cached.
    fn get_budget_progress(&self, user_id: &str, budget_id: &str) -> Result<BudgetProgress>;

    fn get_active_budgets(&self, user_id: &str) -> Result<Vec<BudgetWithProgress>>;

    /// Budgets of one category whose window contains `as_of`; the alert
    /// emitter's candidate set after a ledger mutation.
    fn get_active_budgets_for_category(
        &self,
        user_id: &str,
        category_id: &str,
        as_of: NaiveDateTime,
    ) -> Result<Vec<Budget>>;
}
