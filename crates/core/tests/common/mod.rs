use std::sync::Arc;

use tempfile::TempDir;

use fintrack_core::accounts::{AccountRepository, AccountService};
use fintrack_core::alerts::{AlertOptions, AlertService, NotificationRepository};
use fintrack_core::budgets::{BudgetRepository, BudgetService};
use fintrack_core::categories::{CategoryRepository, CategoryService};
use fintrack_core::db::{self, DbPool};
use fintrack_core::transactions::{TransactionRepository, TransactionService};

/// Fully wired engine against a throwaway SQLite file. The temp dir must
/// outlive the context or the database vanishes mid-test.
pub struct TestContext {
    _tmp: TempDir,
    pub accounts: AccountService<Arc<DbPool>>,
    pub categories: CategoryService,
    pub transactions: TransactionService<Arc<DbPool>>,
    pub budgets: Arc<BudgetService>,
    pub alerts: Arc<AlertService>,
}

pub fn setup() -> TestContext {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let db_path = db::init(tmp.path().to_str().expect("temp path utf-8")).expect("init db");
    let pool = db::create_pool(&db_path).expect("create pool");
    db::run_migrations(&pool).expect("run migrations");

    let account_repository = Arc::new(AccountRepository::new(pool.clone()));
    let category_repository = Arc::new(CategoryRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(pool.clone()));
    let notification_repository = Arc::new(NotificationRepository::new(pool.clone()));

    let budgets = Arc::new(BudgetService::new(
        budget_repository,
        category_repository.clone(),
        transaction_repository.clone(),
    ));
    let alerts = Arc::new(AlertService::new(
        notification_repository,
        budgets.clone(),
        AlertOptions::default(),
    ));
    let transactions = TransactionService::new(
        transaction_repository,
        account_repository.clone(),
        category_repository.clone(),
        alerts.clone(),
        pool.clone(),
    );
    let accounts = AccountService::new(account_repository, pool.clone());
    let categories = CategoryService::new(category_repository);

    TestContext {
        _tmp: tmp,
        accounts,
        categories,
        transactions,
        budgets,
        alerts,
    }
}
