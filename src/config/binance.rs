pub struct BinanceApiConfig {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

impl Default for BinanceApiConfig {
    fn default() -> Self {
        Self {
            timeout_ms: BINANCE.client.timeout_ms,
            retries: BINANCE.client.retries,
            backoff_ms: BINANCE.client.backoff_ms,
        }
    }
}

/// REST constraints: at most 1000 klines come back per request.
pub struct RestLimits {
    pub klines_limit: i32,
}

pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

pub struct BinanceConfig {
    pub limits: RestLimits,
    pub client: ClientDefaults,
}

pub const BINANCE: BinanceConfig = BinanceConfig {
    limits: RestLimits { klines_limit: 1000 },
    client: ClientDefaults {
        timeout_ms: 5000,
        retries: 0, // a failed request surfaces straight away
        backoff_ms: 5000,
    },
};
