use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use super::budgets_model::{Budget, BudgetDB, BudgetDetails, NewBudget};
use super::budgets_traits::BudgetRepositoryTrait;
use crate::categories::Category;
use crate::constants::DEFAULT_ALERT_THRESHOLD;
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::{budgets, categories};
use crate::utils::parse_timestamp;

/// Repository for managing budget data in the database.
pub struct BudgetRepository {
    pool: Arc<DbPool>,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    async fn create(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;

        let now = chrono::Utc::now().naive_utc();
        let start_date = parse_timestamp(&new_budget.start_date).unwrap_or(now);
        let end_date = match &new_budget.end_date {
            Some(end) => Some(parse_timestamp(end)?),
            None => None,
        };

        let budget_db = BudgetDB {
            id: new_budget
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: user_id.to_string(),
            category_id: new_budget.category_id,
            amount: new_budget.amount.to_string(),
            period: new_budget.period,
            start_date,
            end_date,
            alerts: new_budget.alerts.unwrap_or(true),
            alert_threshold: new_budget.alert_threshold.unwrap_or(DEFAULT_ALERT_THRESHOLD),
            created_at: now,
            updated_at: now,
        };

        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(budgets::table)
            .values(&budget_db)
            .execute(&mut conn)?;

        Ok(budget_db.into())
    }

    fn get_for_user(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;

        budgets::table
            .filter(budgets::id.eq(budget_id))
            .filter(budgets::user_id.eq(user_id))
            .first::<BudgetDB>(&mut conn)
            .optional()?
            .map(Budget::from)
            .ok_or_else(|| Error::NotFound("Budget not found".to_string()))
    }

    fn list(&self, user_id: &str) -> Result<Vec<BudgetDetails>> {
        let mut conn = get_connection(&self.pool)?;

        budgets::table
            .inner_join(categories::table.on(categories::id.eq(budgets::category_id)))
            .filter(budgets::user_id.eq(user_id))
            .order(budgets::start_date.desc())
            .select((BudgetDB::as_select(), Category::as_select()))
            .load::<(BudgetDB, Category)>(&mut conn)
            .map(|rows| rows.into_iter().map(BudgetDetails::from).collect())
            .map_err(Error::from)
    }

    fn list_for_category(&self, user_id: &str, category_id: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;

        budgets::table
            .filter(budgets::user_id.eq(user_id))
            .filter(budgets::category_id.eq(category_id))
            .order(budgets::start_date.desc())
            .load::<BudgetDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Budget::from).collect())
            .map_err(Error::from)
    }

    fn list_same_period(
        &self,
        user_id: &str,
        category_id: &str,
        period: &str,
    ) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;

        budgets::table
            .filter(budgets::user_id.eq(user_id))
            .filter(budgets::category_id.eq(category_id))
            .filter(budgets::period.eq(period))
            .load::<BudgetDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Budget::from).collect())
            .map_err(Error::from)
    }
}
