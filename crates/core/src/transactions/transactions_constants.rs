/// Transaction types
///
/// The type carries the sign: amounts are stored as non-negative magnitudes
/// and only gain a sign when a balance delta is computed.

/// Money entering the account. Increases the balance.
pub const TRANSACTION_TYPE_INCOME: &str = "INCOME";

/// Money leaving the account. Decreases the balance.
pub const TRANSACTION_TYPE_EXPENSE: &str = "EXPENSE";

/// Movement between accounts. Treated as inflow on the receiving account.
pub const TRANSACTION_TYPE_TRANSFER: &str = "TRANSFER";

pub const TRANSACTION_TYPES: [&str; 3] = [
    TRANSACTION_TYPE_INCOME,
    TRANSACTION_TYPE_EXPENSE,
    TRANSACTION_TYPE_TRANSFER,
];
