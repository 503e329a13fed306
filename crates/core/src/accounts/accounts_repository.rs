use std::sync::Arc;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::accounts_model::{Account, AccountDB, NewAccount};
use super::accounts_traits::AccountRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::accounts;
use crate::utils::parse_decimal_string_tolerant;

/// Repository for managing account data in the database.
pub struct AccountRepository {
    pool: Arc<DbPool>,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl AccountRepositoryTrait for AccountRepository {
    fn create_in_transaction(
        &self,
        user_id: &str,
        new_account: NewAccount,
        conn: &mut SqliteConnection,
    ) -> Result<Account> {
        new_account.validate()?;

        let now = chrono::Utc::now().naive_utc();
        let account_db = AccountDB {
            id: new_account
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: user_id.to_string(),
            name: new_account.name.clone(),
            account_type: new_account.account_type.clone(),
            balance: Decimal::ZERO.to_string(),
            currency: new_account.currency_or_default(),
            is_default: new_account.is_default,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(accounts::table)
            .values(&account_db)
            .execute(conn)?;

        Ok(account_db.into())
    }

    fn adjust_balance_in_transaction(
        &self,
        account_id: &str,
        delta: Decimal,
        conn: &mut SqliteConnection,
    ) -> Result<()> {
        // The surrounding unit of work holds the write lock, so this
        // read-adjust-write is serialized against every other balance writer.
        let current: String = accounts::table
            .find(account_id)
            .select(accounts::balance)
            .first::<String>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    Error::NotFound(format!("Account with id {} not found", account_id))
                }
                other => Error::from(other),
            })?;

        let next = parse_decimal_string_tolerant(&current, "balance") + delta;

        diesel::update(accounts::table.find(account_id))
            .set((
                accounts::balance.eq(next.to_string()),
                accounts::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(conn)?;

        Ok(())
    }

    fn get_for_user(&self, user_id: &str, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        accounts::table
            .filter(accounts::id.eq(account_id))
            .filter(accounts::user_id.eq(user_id))
            .first::<AccountDB>(&mut conn)
            .optional()?
            .map(Account::from)
            .ok_or_else(|| Error::AccessDenied("Account not found or access denied".to_string()))
    }

    fn get_default(&self, user_id: &str) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;

        accounts::table
            .filter(accounts::user_id.eq(user_id))
            .filter(accounts::is_default.eq(true))
            .first::<AccountDB>(&mut conn)
            .optional()
            .map(|found| found.map(Account::from))
            .map_err(Error::from)
    }

    fn list(&self, user_id: &str) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        accounts::table
            .filter(accounts::user_id.eq(user_id))
            .order((accounts::is_default.desc(), accounts::name.asc()))
            .load::<AccountDB>(&mut conn)
            .map(|results| results.into_iter().map(Account::from).collect())
            .map_err(Error::from)
    }
}
