/// Account types
///
/// Each constant represents one of the supported account categories.

/// Day-to-day current account.
pub const ACCOUNT_TYPE_CHECKING: &str = "CHECKING";

/// Interest-bearing savings account.
pub const ACCOUNT_TYPE_SAVINGS: &str = "SAVINGS";

/// Credit card or line of credit; balances are typically negative.
pub const ACCOUNT_TYPE_CREDIT: &str = "CREDIT";

/// Brokerage or investment account.
pub const ACCOUNT_TYPE_INVESTMENT: &str = "INVESTMENT";

/// Physical cash on hand.
pub const ACCOUNT_TYPE_CASH: &str = "CASH";

pub const ACCOUNT_TYPES: [&str; 5] = [
    ACCOUNT_TYPE_CHECKING,
    ACCOUNT_TYPE_SAVINGS,
    ACCOUNT_TYPE_CREDIT,
    ACCOUNT_TYPE_INVESTMENT,
    ACCOUNT_TYPE_CASH,
];
