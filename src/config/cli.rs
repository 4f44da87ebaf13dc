//! Defaults for the command-line front end.

pub struct CliDefaults {
    pub currency: &'static str,
    /// Appended to the currency to form the traded symbol (ETH -> ETHUSDT)
    pub quote_asset: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
    pub percentiles: &'static str,
    pub preview_rows: usize,
}

pub const CLI_DEFAULTS: CliDefaults = CliDefaults {
    currency: "ETH",
    quote_asset: "USDT",
    start_date: "20.07.2025 00:00:00",
    end_date: "25.07.2025 23:59:59",
    percentiles: "25,50,75",
    preview_rows: 5,
};
