use std::sync::Arc;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use super::transactions_constants::TRANSACTION_TYPE_EXPENSE;
use super::transactions_model::{
    NewTransaction, Transaction, TransactionDB, TransactionDetails, TransactionUpdate,
};
use super::transactions_traits::TransactionRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::{accounts, categories, transactions};
use crate::utils::parse_timestamp;

/// Repository for managing transaction data in the database.
pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn to_db_row(user_id: &str, new_transaction: NewTransaction) -> TransactionDB {
        let now = chrono::Utc::now().naive_utc();
        let transaction_date = parse_timestamp(&new_transaction.transaction_date)
            .unwrap_or(now);
        let (recurrence_frequency, recurrence_interval, recurrence_next_due) =
            match new_transaction.recurrence {
                Some(rule) => (Some(rule.frequency), Some(rule.interval), rule.next_due),
                None => (None, None, None),
            };

        TransactionDB {
            id: new_transaction
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: user_id.to_string(),
            account_id: new_transaction.account_id,
            category_id: new_transaction.category_id,
            amount: new_transaction.amount.to_string(),
            transaction_type: new_transaction.transaction_type,
            status: new_transaction.status.unwrap_or_default().as_str().to_string(),
            transaction_date,
            description: new_transaction.description,
            notes: new_transaction.notes,
            receipt_ref: new_transaction.receipt_ref,
            is_recurring: new_transaction.is_recurring,
            recurrence_frequency,
            recurrence_interval,
            recurrence_next_due,
            created_at: now,
            updated_at: now,
        }
    }

    fn find_owned(
        user_id: &str,
        transaction_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<TransactionDB> {
        transactions::table
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::user_id.eq(user_id))
            .first::<TransactionDB>(conn)
            .optional()?
            .ok_or_else(|| Error::NotFound("Transaction not found".to_string()))
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn create_in_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
        conn: &mut SqliteConnection,
    ) -> Result<Transaction> {
        new_transaction.validate()?;

        let transaction_db = Self::to_db_row(user_id, new_transaction);

        diesel::insert_into(transactions::table)
            .values(&transaction_db)
            .execute(conn)?;

        Ok(transaction_db.into())
    }

    fn create_batch_in_transaction(
        &self,
        user_id: &str,
        new_transactions: Vec<NewTransaction>,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Transaction>> {
        let rows: Vec<TransactionDB> = new_transactions
            .into_iter()
            .map(|new_transaction| Self::to_db_row(user_id, new_transaction))
            .collect();

        diesel::insert_into(transactions::table)
            .values(&rows)
            .execute(conn)?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    fn update_in_transaction(
        &self,
        user_id: &str,
        update: TransactionUpdate,
        conn: &mut SqliteConnection,
    ) -> Result<Transaction> {
        update.validate()?;

        let existing = Self::find_owned(user_id, &update.id, conn)?;

        let now = chrono::Utc::now().naive_utc();
        let transaction_date = parse_timestamp(&update.transaction_date).unwrap_or(now);
        let (recurrence_frequency, recurrence_interval, recurrence_next_due) =
            match update.recurrence {
                Some(rule) => (Some(rule.frequency), Some(rule.interval), rule.next_due),
                None => (None, None, None),
            };

        let transaction_db = TransactionDB {
            id: existing.id.clone(),
            user_id: existing.user_id.clone(),
            account_id: update.account_id,
            category_id: update.category_id,
            amount: update.amount.to_string(),
            transaction_type: update.transaction_type,
            status: update.status.unwrap_or_default().as_str().to_string(),
            transaction_date,
            description: update.description,
            notes: update.notes,
            receipt_ref: update.receipt_ref,
            is_recurring: update.is_recurring,
            recurrence_frequency,
            recurrence_interval,
            recurrence_next_due,
            created_at: existing.created_at,
            updated_at: now,
        };

        diesel::update(transactions::table.find(&transaction_db.id))
            .set(&transaction_db)
            .execute(conn)?;

        Ok(transaction_db.into())
    }

    fn delete_in_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Transaction> {
        let existing = Self::find_owned(user_id, transaction_id, conn)?;

        diesel::delete(transactions::table.find(transaction_id)).execute(conn)?;

        Ok(existing.into())
    }

    fn get_in_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Transaction> {
        Self::find_owned(user_id, transaction_id, conn).map(Transaction::from)
    }

    fn get_for_user(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        Self::find_owned(user_id, transaction_id, &mut conn).map(Transaction::from)
    }

    fn get_details(&self, user_id: &str, transaction_id: &str) -> Result<TransactionDetails> {
        let mut conn = get_connection(&self.pool)?;

        transactions::table
            .inner_join(accounts::table.on(accounts::id.eq(transactions::account_id)))
            .left_join(
                categories::table.on(transactions::category_id.eq(categories::id.nullable())),
            )
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::user_id.eq(user_id))
            .select((
                TransactionDB::as_select(),
                accounts::name,
                accounts::currency,
                categories::name.nullable(),
            ))
            .first::<(TransactionDB, String, String, Option<String>)>(&mut conn)
            .optional()?
            .map(TransactionDetails::from)
            .ok_or_else(|| Error::NotFound("Transaction not found".to_string()))
    }

    fn list_details(&self, user_id: &str) -> Result<Vec<TransactionDetails>> {
        let mut conn = get_connection(&self.pool)?;

        transactions::table
            .inner_join(accounts::table.on(accounts::id.eq(transactions::account_id)))
            .left_join(
                categories::table.on(transactions::category_id.eq(categories::id.nullable())),
            )
            .filter(transactions::user_id.eq(user_id))
            .order((
                transactions::transaction_date.desc(),
                transactions::created_at.desc(),
            ))
            .select((
                TransactionDB::as_select(),
                accounts::name,
                accounts::currency,
                categories::name.nullable(),
            ))
            .load::<(TransactionDB, String, String, Option<String>)>(&mut conn)
            .map(|rows| rows.into_iter().map(TransactionDetails::from).collect())
            .map_err(Error::from)
    }

    fn list_expenses_in_window(
        &self,
        user_id: &str,
        category_id: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        transactions::table
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::category_id.eq(category_id))
            .filter(transactions::transaction_type.eq(TRANSACTION_TYPE_EXPENSE))
            .filter(transactions::transaction_date.ge(from))
            .filter(transactions::transaction_date.le(to))
            .order(transactions::transaction_date.asc())
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Transaction::from).collect())
            .map_err(Error::from)
    }
}
