/// Currency assigned to accounts created without an explicit one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Name of the account seeded at registration.
pub const DEFAULT_ACCOUNT_NAME: &str = "Main Account";

/// Alert threshold (percent of the allocation) used when a budget does not
/// specify one.
pub const DEFAULT_ALERT_THRESHOLD: i32 = 80;

/// Decimal precision for display amounts.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
