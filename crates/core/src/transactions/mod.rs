pub mod transactions_constants;
pub mod transactions_model;
pub mod transactions_repository;
pub mod transactions_service;
pub mod transactions_traits;

#[cfg(test)]
mod transactions_model_tests;

pub use transactions_constants::*;
pub use transactions_model::{
    signed_amount, NewTransaction, RecurrenceRule, Transaction, TransactionDB,
    TransactionDetails, TransactionImportRow, TransactionStatus, TransactionUpdate,
};
pub use transactions_repository::TransactionRepository;
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
