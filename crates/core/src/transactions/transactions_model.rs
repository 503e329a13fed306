use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::transactions_constants::{TRANSACTION_TYPES, TRANSACTION_TYPE_EXPENSE};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::{parse_decimal_string_tolerant, parse_timestamp};

/// Settlement status of a transaction. The engine stores and returns it;
/// transitions are caller-supplied and not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    #[default]
    Completed,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TransactionStatus::Pending),
            "COMPLETED" => Ok(TransactionStatus::Completed),
            "FAILED" => Ok(TransactionStatus::Failed),
            "CANCELLED" => Ok(TransactionStatus::Cancelled),
            _ => Err(format!("Unknown transaction status: {}", s)),
        }
    }
}

/// Computes the contribution a transaction makes to its account's balance:
/// negative for expenses, positive for income and transfers. The signed
/// value is never stored.
pub fn signed_amount(transaction_type: &str, amount: Decimal) -> Decimal {
    if transaction_type == TRANSACTION_TYPE_EXPENSE {
        -amount
    } else {
        amount
    }
}

/// Recurrence settings carried by recurring transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: String,
    pub interval: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due: Option<NaiveDateTime>,
}

/// Domain model representing a ledger transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub category_id: Option<String>,
    pub amount: Decimal,
    pub transaction_type: String,
    pub status: TransactionStatus,
    pub transaction_date: NaiveDateTime,
    pub description: String,
    pub notes: Option<String>,
    pub receipt_ref: Option<String>,
    pub is_recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    pub fn signed_amount(&self) -> Decimal {
        signed_amount(&self.transaction_type, self.amount)
    }
}

/// Database model for transactions.
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
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub category_id: Option<String>,
    pub amount: String,
    pub transaction_type: String,
    pub status: String,
    pub transaction_date: NaiveDateTime,
    pub description: String,
    pub notes: Option<String>,
    pub receipt_ref: Option<String>,
    pub is_recurring: bool,
    pub recurrence_frequency: Option<String>,
    pub recurrence_interval: Option<i32>,
    pub recurrence_next_due: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        let recurrence = db.recurrence_frequency.map(|frequency| RecurrenceRule {
            frequency,
            interval: db.recurrence_interval.unwrap_or(1),
            next_due: db.recurrence_next_due,
        });

        Self {
            id: db.id,
            user_id: db.user_id,
            account_id: db.account_id,
            category_id: db.category_id,
            amount: parse_decimal_string_tolerant(&db.amount, "amount"),
            transaction_type: db.transaction_type,
            status: TransactionStatus::from_str(&db.status).unwrap_or_default(),
            transaction_date: db.transaction_date,
            description: db.description,
            notes: db.notes,
            receipt_ref: db.receipt_ref,
            is_recurring: db.is_recurring,
            recurrence,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Input model for creating a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub account_id: String,
    pub category_id: Option<String>,
    pub amount: Decimal,
    pub transaction_type: String,
    pub status: Option<TransactionStatus>,
    pub transaction_date: String,
    pub description: String,
    pub notes: Option<String>,
    pub receipt_ref: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurrence: Option<RecurrenceRule>,
}

impl NewTransaction {
    /// Validates the new transaction data.
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        if self.amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Amount must be a non-negative magnitude".to_string(),
            )));
        }
        if !TRANSACTION_TYPES.contains(&self.transaction_type.as_str()) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown transaction type '{}'",
                self.transaction_type
            ))));
        }
        if self.description.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "description".to_string(),
            )));
        }
        parse_timestamp(&self.transaction_date)?;
        Ok(())
    }

    pub fn signed_amount(&self) -> Decimal {
        signed_amount(&self.transaction_type, self.amount)
    }
}

/// Input model for updating an existing transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub id: String,
    pub account_id: String,
    pub category_id: Option<String>,
    pub amount: Decimal,
    pub transaction_type: String,
    pub status: Option<TransactionStatus>,
    pub transaction_date: String,
    pub description: String,
    pub notes: Option<String>,
    pub receipt_ref: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurrence: Option<RecurrenceRule>,
}

impl TransactionUpdate {
    /// Validates the transaction update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        if self.amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Amount must be a non-negative magnitude".to_string(),
            )));
        }
        if !TRANSACTION_TYPES.contains(&self.transaction_type.as_str()) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown transaction type '{}'",
                self.transaction_type
            ))));
        }
        if self.description.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "description".to_string(),
            )));
        }
        parse_timestamp(&self.transaction_date)?;
        Ok(())
    }

    pub fn signed_amount(&self) -> Decimal {
        signed_amount(&self.transaction_type, self.amount)
    }
}

/// Transaction enriched with its account and category, as returned to the
/// query surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub account_name: String,
    pub account_currency: String,
    pub category_name: Option<String>,
}

impl From<(TransactionDB, String, String, Option<String>)> for TransactionDetails {
    fn from(
        (db, account_name, account_currency, category_name): (
            TransactionDB,
            String,
            String,
            Option<String>,
        ),
    ) -> Self {
        Self {
            transaction: db.into(),
            account_name,
            account_currency,
            category_name,
        }
    }
}

/// One row of a bulk import batch, as handed over by the upload pipeline.
/// The source amount keeps its sign; the processor derives the transaction
/// type from it and stores the magnitude.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionImportRow {
    pub date: String,
    pub description: String,
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub notes: Option<String>,
}
