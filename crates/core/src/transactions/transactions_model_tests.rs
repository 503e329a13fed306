use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::transactions_constants::*;
use super::transactions_model::{signed_amount, NewTransaction, TransactionStatus};
use crate::errors::Error;

fn sample_transaction() -> NewTransaction {
    NewTransaction {
        id: None,
        account_id: "acct-1".to_string(),
        category_id: None,
        amount: dec!(85.50),
        transaction_type: TRANSACTION_TYPE_EXPENSE.to_string(),
        status: None,
        transaction_date: "2024-02-01".to_string(),
        description: "Groceries".to_string(),
        notes: None,
        receipt_ref: None,
        is_recurring: false,
        recurrence: None,
    }
}

#[test]
fn signed_amount_follows_type() {
    assert_eq!(
        signed_amount(TRANSACTION_TYPE_EXPENSE, dec!(85.50)),
        dec!(-85.50)
    );
    assert_eq!(
        signed_amount(TRANSACTION_TYPE_INCOME, dec!(3000.00)),
        dec!(3000.00)
    );
    assert_eq!(
        signed_amount(TRANSACTION_TYPE_TRANSFER, dec!(10)),
        dec!(10)
    );
}

#[test]
fn validate_rejects_negative_amount() {
    let mut tx = sample_transaction();
    tx.amount = dec!(-1);
    assert!(matches!(tx.validate(), Err(Error::Validation(_))));
}

#[test]
fn validate_accepts_zero_amount() {
    let mut tx = sample_transaction();
    tx.amount = Decimal::ZERO;
    assert!(tx.validate().is_ok());
}

#[test]
fn validate_rejects_unknown_type() {
    let mut tx = sample_transaction();
    tx.transaction_type = "REFUND".to_string();
    assert!(tx.validate().is_err());
}

#[test]
fn validate_rejects_unparseable_date() {
    let mut tx = sample_transaction();
    tx.transaction_date = "01/02/2024".to_string();
    assert!(tx.validate().is_err());
}

#[test]
fn validate_requires_description() {
    let mut tx = sample_transaction();
    tx.description = "  ".to_string();
    assert!(tx.validate().is_err());
}

#[test]
fn status_round_trips_through_str() {
    for status in [
        TransactionStatus::Pending,
        TransactionStatus::Completed,
        TransactionStatus::Failed,
        TransactionStatus::Cancelled,
    ] {
        assert_eq!(status.as_str().parse::<TransactionStatus>().unwrap(), status);
    }
    assert!("SETTLED".parse::<TransactionStatus>().is_err());
}

#[test]
fn default_status_is_completed() {
    assert_eq!(TransactionStatus::default(), TransactionStatus::Completed);
}
