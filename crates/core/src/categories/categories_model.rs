use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Category classifying income transactions.
pub const CATEGORY_TYPE_INCOME: &str = "INCOME";

/// Category classifying expense transactions.
pub const CATEGORY_TYPE_EXPENSE: &str = "EXPENSE";

pub const CATEGORY_TYPES: [&str; 2] = [CATEGORY_TYPE_INCOME, CATEGORY_TYPE_EXPENSE];

/// A user-owned transaction category. Budgets are scoped to exactly one of
/// these.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub category_type: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Category {
    pub fn is_expense(&self) -> bool {
        self.category_type == CATEGORY_TYPE_EXPENSE
    }
}

/// Input model for creating a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub category_type: String,
}

impl NewCategory {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category name cannot be empty".to_string(),
            )));
        }
        if !CATEGORY_TYPES.contains(&self.category_type.as_str()) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown category type '{}'",
                self.category_type
            ))));
        }
        Ok(())
    }
}
