//! Settings that control how expenses are displayed.

/// The currency symbol used when no other symbol is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// The timezone used when no other timezone is configured.
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";

/// Display settings shared by the client page and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// The symbol printed in front of every amount, e.g. "$" or "₹".
    pub currency_symbol: String,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// Used to pick today's date for the expense form.
    pub local_timezone: String,
}

impl DisplayConfig {
    /// Create a config with the given currency symbol and timezone name.
    pub fn new(currency_symbol: &str, local_timezone: &str) -> Self {
        Self {
            currency_symbol: currency_symbol.to_owned(),
            local_timezone: local_timezone.to_owned(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_SYMBOL, DEFAULT_TIMEZONE)
    }
}
