pub mod budgets_model;
pub mod budgets_repository;
pub mod budgets_service;
pub mod budgets_traits;


pub use budgets_model::{
    windows_overlap, Budget, BudgetDB, BudgetDetails, BudgetProgress, BudgetWithProgress,
    NewBudget, BUDGET_PERIODS, BUDGET_PERIOD_MONTHLY, BUDGET_PERIOD_WEEKLY, BUDGET_PERIOD_YEARLY,
};
pub use budgets_repository::BudgetRepository;
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
