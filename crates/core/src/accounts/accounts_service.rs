use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use super::accounts_constants::ACCOUNT_TYPE_CHECKING;
use super::accounts_model::{Account, AccountOverview, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::constants::DEFAULT_ACCOUNT_NAME;
use crate::db::DbTransactionExecutor;
use crate::errors::Result;

/// Service for managing accounts.
pub struct AccountService<E: DbTransactionExecutor + Send + Sync + Clone> {
    repository: Arc<dyn AccountRepositoryTrait>,
    transaction_executor: E,
}

impl<E: DbTransactionExecutor + Send + Sync + Clone> AccountService<E> {
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>, transaction_executor: E) -> Self {
        Self {
            repository,
            transaction_executor,
        }
    }
}

#[async_trait]
impl<E: DbTransactionExecutor + Send + Sync + Clone> AccountServiceTrait for AccountService<E> {
    async fn create_account(&self, user_id: &str, new_account: NewAccount) -> Result<Account> {
        debug!("Creating account '{}' for user {}", new_account.name, user_id);
        new_account.validate()?;

        let repository = self.repository.clone();
        self.transaction_executor.execute(move |tx_conn| {
            repository.create_in_transaction(user_id, new_account, tx_conn)
        })
    }

    async fn ensure_default_account(&self, user_id: &str) -> Result<Account> {
        if let Some(existing) = self.repository.get_default(user_id)? {
            return Ok(existing);
        }

        self.create_account(
            user_id,
            NewAccount {
                id: None,
                name: DEFAULT_ACCOUNT_NAME.to_string(),
                account_type: ACCOUNT_TYPE_CHECKING.to_string(),
                currency: None,
                is_default: true,
            },
        )
        .await
    }

    fn get_account(&self, user_id: &str, account_id: &str) -> Result<Account> {
        self.repository.get_for_user(user_id, account_id)
    }

    fn get_accounts(&self, user_id: &str) -> Result<Vec<Account>> {
        self.repository.list(user_id)
    }

    fn get_account_overview(&self, user_id: &str) -> Result<AccountOverview> {
        let accounts = self.repository.list(user_id)?;
        let total_balance = accounts
            .iter()
            .fold(Decimal::ZERO, |sum, account| sum + account.balance);
        let count = accounts.len();

        Ok(AccountOverview {
            accounts,
            total_balance,
            count,
        })
    }
}
