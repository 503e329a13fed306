use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::accounts_constants::ACCOUNT_TYPES;
use crate::constants::DEFAULT_CURRENCY;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::parse_decimal_string_tolerant;

/// Domain model representing an account in the system.
///
/// `balance` is a materialized aggregate: it always equals the sum of the
/// signed amounts of the account's transactions and is only ever written
/// inside the same transactional scope as the row write that changes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub account_type: String,
    pub balance: Decimal,
    pub currency: String,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for accounts.
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
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub account_type: String,
    pub balance: String,
    pub currency: String,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            account_type: db.account_type,
            balance: parse_decimal_string_tolerant(&db.balance, "balance"),
            currency: db.currency,
            is_default: db.is_default,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Input model for creating a new account. Accounts always open with a zero
/// balance; the ledger is the only writer of that column afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub account_type: String,
    pub currency: Option<String>,
    pub is_default: bool,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        if !ACCOUNT_TYPES.contains(&self.account_type.as_str()) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown account type '{}'",
                self.account_type
            ))));
        }
        if let Some(currency) = &self.currency {
            if currency.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Currency cannot be empty".to_string(),
                )));
            }
        }
        Ok(())
    }

    pub fn currency_or_default(&self) -> String {
        self.currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
    }
}

/// Accounts plus aggregate totals, as served to the overview screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOverview {
    pub accounts: Vec<Account>,
    pub total_balance: Decimal,
    pub count: usize,
}
