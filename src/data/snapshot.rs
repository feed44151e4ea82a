pub const NOT_AVAILABLE: &str = "N/A";

/// Latest descriptive and pricing info of a company
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub name: String,
    pub sector: String,
    pub market_cap: f64,
    pub current_price: f64,
}

impl Snapshot {
    /// Stand-in used when the provider cannot describe a ticker
    pub fn placeholder() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            sector: NOT_AVAILABLE.to_string(),
            market_cap: 0.0,
            current_price: 0.0,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }

    /// Neither sector nor market cap is known
    pub fn is_partial(&self) -> bool {
        self.sector == NOT_AVAILABLE && self.market_cap <= 0.0
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::placeholder()
    }
}
