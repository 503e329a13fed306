use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::sqlite::SqliteConnection;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionDetails, TransactionImportRow, TransactionUpdate,
};
use crate::errors::Result;

/// Trait defining the contract for transaction repository operations.
///
/// The `_in_transaction` methods run inside a caller-supplied unit of work so
/// the row write and its balance adjustment commit or abort together.
pub trait TransactionRepositoryTrait: Send + Sync {
    fn create_in_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
        conn: &mut SqliteConnection,
    ) -> Result<Transaction>;

    fn create_batch_in_transaction(
        &self,
        user_id: &str,
        new_transactions: Vec<NewTransaction>,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Transaction>>;

    fn update_in_transaction(
        &self,
        user_id: &str,
        update: TransactionUpdate,
        conn: &mut SqliteConnection,
    ) -> Result<Transaction>;

    fn delete_in_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Transaction>;

    fn get_in_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Transaction>;

    fn get_for_user(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;

    fn get_details(&self, user_id: &str, transaction_id: &str) -> Result<TransactionDetails>;

    fn list_details(&self, user_id: &str) -> Result<Vec<TransactionDetails>>;

    /// Expense transactions of one category inside `[from, to]`, both ends
    /// inclusive. This is the budget calculator's aggregation source.
    fn list_expenses_in_window(
        &self,
        user_id: &str,
        category_id: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Transaction>>;
}

/// Trait defining the contract for ledger service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<TransactionDetails>;

    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<TransactionDetails>;

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str)
        -> Result<Transaction>;

    /// All-or-nothing batch import against one account: either every row is
    /// persisted and the balance moves by the aggregate signed amount, or
    /// nothing changes.
    async fn import_transactions(
        &self,
        user_id: &str,
        account_id: &str,
        rows: Vec<TransactionImportRow>,
    ) -> Result<Vec<Transaction>>;

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<TransactionDetails>;

    fn get_transactions(&self, user_id: &str) -> Result<Vec<TransactionDetails>>;
}
