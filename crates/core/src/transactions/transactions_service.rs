use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::{debug, error};
use rust_decimal::Decimal;

use super::transactions_constants::{TRANSACTION_TYPE_EXPENSE, TRANSACTION_TYPE_INCOME};
use super::transactions_model::{
    NewTransaction, Transaction, TransactionDetails, TransactionImportRow, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::alerts::AlertServiceTrait;
use crate::categories::CategoryRepositoryTrait;
use crate::db::DbTransactionExecutor;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::parse_timestamp;

/// Service keeping the ledger and the materialized account balances in
/// lock-step. Every mutation applies its row write and the matching balance
/// delta inside one unit of work; budget alerting runs afterwards and is
/// never allowed to roll the mutation back.
pub struct TransactionService<E: DbTransactionExecutor + Send + Sync + Clone> {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    alert_service: Arc<dyn AlertServiceTrait>,
    transaction_executor: E,
}

impl<E: DbTransactionExecutor + Send + Sync + Clone> TransactionService<E> {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        alert_service: Arc<dyn AlertServiceTrait>,
        transaction_executor: E,
    ) -> Self {
        Self {
            transaction_repository,
            account_repository,
            category_repository,
            alert_service,
            transaction_executor,
        }
    }

    /// Best-effort budget alerting after a committed mutation. A failure
    /// here is logged and swallowed: the ledger write already happened and
    /// must stand.
    async fn notify_budget_watchers(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        as_of: NaiveDateTime,
    ) {
        let Some(category_id) = category_id else {
            return;
        };
        if let Err(e) = self
            .alert_service
            .evaluate_category(user_id, category_id, as_of)
            .await
        {
            error!(
                "Budget alert evaluation failed for category {}: {}",
                category_id, e
            );
        }
    }
}

#[async_trait]
impl<E: DbTransactionExecutor + Send + Sync + Clone> TransactionServiceTrait
    for TransactionService<E>
{
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<TransactionDetails> {
        new_transaction.validate()?;

        let account = self
            .account_repository
            .get_for_user(user_id, &new_transaction.account_id)?;
        if let Some(category_id) = &new_transaction.category_id {
            self.category_repository.get_for_user(user_id, category_id)?;
        }

        let delta = new_transaction.signed_amount();
        let account_id = account.id;
        let transaction_repository = self.transaction_repository.clone();
        let account_repository = self.account_repository.clone();

        let created = self.transaction_executor.execute(move |tx_conn| {
            let created =
                transaction_repository.create_in_transaction(user_id, new_transaction, tx_conn)?;
            account_repository.adjust_balance_in_transaction(&account_id, delta, tx_conn)?;
            Ok::<_, Error>(created)
        })?;

        debug!(
            "Created transaction {} ({} {})",
            created.id, created.transaction_type, created.amount
        );

        self.notify_budget_watchers(
            user_id,
            created.category_id.as_deref(),
            created.transaction_date,
        )
        .await;

        self.transaction_repository.get_details(user_id, &created.id)
    }

    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        mut update: TransactionUpdate,
    ) -> Result<TransactionDetails> {
        update.id = transaction_id.to_string();
        update.validate()?;

        let existing = self
            .transaction_repository
            .get_for_user(user_id, transaction_id)?;
        if update.account_id != existing.account_id {
            self.account_repository
                .get_for_user(user_id, &update.account_id)?;
        }
        if let Some(category_id) = &update.category_id {
            if existing.category_id.as_deref() != Some(category_id.as_str()) {
                self.category_repository.get_for_user(user_id, category_id)?;
            }
        }

        let transaction_repository = self.transaction_repository.clone();
        let account_repository = self.account_repository.clone();

        // Reverse the stored contribution, apply the new one. Re-reading the
        // row under the write lock keeps the arithmetic correct even if the
        // pre-checked copy went stale.
        let updated = self.transaction_executor.execute(move |tx_conn| {
            let existing =
                transaction_repository.get_in_transaction(user_id, &update.id, tx_conn)?;
            let old_signed = existing.signed_amount();

            let updated = transaction_repository.update_in_transaction(user_id, update, tx_conn)?;
            let new_signed = updated.signed_amount();

            if existing.account_id == updated.account_id {
                let delta = new_signed - old_signed;
                if !delta.is_zero() {
                    account_repository.adjust_balance_in_transaction(
                        &updated.account_id,
                        delta,
                        tx_conn,
                    )?;
                }
            } else {
                account_repository.adjust_balance_in_transaction(
                    &existing.account_id,
                    -old_signed,
                    tx_conn,
                )?;
                account_repository.adjust_balance_in_transaction(
                    &updated.account_id,
                    new_signed,
                    tx_conn,
                )?;
            }

            Ok::<_, Error>(updated)
        })?;

        self.notify_budget_watchers(
            user_id,
            updated.category_id.as_deref(),
            updated.transaction_date,
        )
        .await;

        self.transaction_repository.get_details(user_id, &updated.id)
    }

    async fn delete_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Transaction> {
        let transaction_repository = self.transaction_repository.clone();
        let account_repository = self.account_repository.clone();

        self.transaction_executor.execute(move |tx_conn| {
            let deleted =
                transaction_repository.delete_in_transaction(user_id, transaction_id, tx_conn)?;
            account_repository.adjust_balance_in_transaction(
                &deleted.account_id,
                -deleted.signed_amount(),
                tx_conn,
            )?;
            Ok::<_, Error>(deleted)
        })
    }

    async fn import_transactions(
        &self,
        user_id: &str,
        account_id: &str,
        rows: Vec<TransactionImportRow>,
    ) -> Result<Vec<Transaction>> {
        let account = self.account_repository.get_for_user(user_id, account_id)?;

        let mut prepared: Vec<NewTransaction> = Vec::with_capacity(rows.len());
        for (idx, row) in rows.into_iter().enumerate() {
            let index = idx + 1;

            parse_timestamp(&row.date).map_err(|_| ValidationError::InvalidRow {
                index,
                message: format!("invalid date '{}'", row.date),
            })?;

            // The sign of the source amount decides the type; the stored
            // amount is always the magnitude.
            let transaction_type = if row.amount < Decimal::ZERO {
                TRANSACTION_TYPE_EXPENSE
            } else {
                TRANSACTION_TYPE_INCOME
            };

            let new_transaction = NewTransaction {
                id: None,
                account_id: account.id.clone(),
                category_id: row.category_id,
                amount: row.amount.abs(),
                transaction_type: transaction_type.to_string(),
                status: None,
                transaction_date: row.date,
                description: row.description,
                notes: row.notes,
                receipt_ref: None,
                is_recurring: false,
                recurrence: None,
            };
            new_transaction
                .validate()
                .map_err(|e| ValidationError::InvalidRow {
                    index,
                    message: e.to_string(),
                })?;

            prepared.push(new_transaction);
        }

        let mut checked_categories: Vec<&str> = Vec::new();
        for new_transaction in &prepared {
            if let Some(category_id) = new_transaction.category_id.as_deref() {
                if !checked_categories.contains(&category_id) {
                    self.category_repository.get_for_user(user_id, category_id)?;
                    checked_categories.push(category_id);
                }
            }
        }

        let aggregate_delta: Decimal = prepared
            .iter()
            .map(NewTransaction::signed_amount)
            .sum();

        let owned_account_id = account.id.clone();
        let transaction_repository = self.transaction_repository.clone();
        let account_repository = self.account_repository.clone();

        let created = self.transaction_executor.execute(move |tx_conn| {
            let created = transaction_repository.create_batch_in_transaction(
                user_id,
                prepared,
                tx_conn,
            )?;
            account_repository.adjust_balance_in_transaction(
                &owned_account_id,
                aggregate_delta,
                tx_conn,
            )?;
            Ok::<_, Error>(created)
        })?;

        debug!(
            "Imported {} transactions into account {} (delta {})",
            created.len(),
            account.id,
            aggregate_delta
        );

        let mut latest_per_category: HashMap<String, NaiveDateTime> = HashMap::new();
        for transaction in &created {
            if let Some(category_id) = &transaction.category_id {
                let entry = latest_per_category
                    .entry(category_id.clone())
                    .or_insert(transaction.transaction_date);
                if transaction.transaction_date > *entry {
                    *entry = transaction.transaction_date;
                }
            }
        }
        for (category_id, as_of) in latest_per_category {
            self.notify_budget_watchers(user_id, Some(&category_id), as_of)
                .await;
        }

        Ok(created)
    }

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<TransactionDetails> {
        self.transaction_repository.get_details(user_id, transaction_id)
    }

    fn get_transactions(&self, user_id: &str) -> Result<Vec<TransactionDetails>> {
        self.transaction_repository.list_details(user_id)
    }
}
