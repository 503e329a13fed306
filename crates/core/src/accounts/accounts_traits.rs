use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use super::accounts_model::{Account, AccountOverview, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for account repository operations.
///
/// The `_in_transaction` methods run inside a caller-supplied unit of work;
/// nothing else in the crate writes the `balance` column.
pub trait AccountRepositoryTrait: Send + Sync {
    fn create_in_transaction(
        &self,
        user_id: &str,
        new_account: NewAccount,
        conn: &mut SqliteConnection,
    ) -> Result<Account>;

    /// Applies a signed delta to the account's materialized balance. Must be
    /// called from the same transactional scope as the ledger write the
    /// delta belongs to.
    fn adjust_balance_in_transaction(
        &self,
        account_id: &str,
        delta: Decimal,
        conn: &mut SqliteConnection,
    ) -> Result<()>;

    /// Resolves an account only when it belongs to `user_id`; the failure
    /// message does not reveal whether the id exists at all.
    fn get_for_user(&self, user_id: &str, account_id: &str) -> Result<Account>;

    fn get_default(&self, user_id: &str) -> Result<Option<Account>>;

    fn list(&self, user_id: &str) -> Result<Vec<Account>>;
}

/// Trait defining the contract for account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn create_account(&self, user_id: &str, new_account: NewAccount) -> Result<Account>;

    /// Seeds the single default account created at registration; a no-op
    /// when the user already has one.
    async fn ensure_default_account(&self, user_id: &str) -> Result<Account>;

    fn get_account(&self, user_id: &str, account_id: &str) -> Result<Account>;
    fn get_accounts(&self, user_id: &str) -> Result<Vec<Account>>;
    fn get_account_overview(&self, user_id: &str) -> Result<AccountOverview>;
}
