pub mod cycle;
pub mod number;

pub use number::{format_market_cap, format_percent, format_price, format_volume, Sign};

#[cfg(test)]
pub(crate) static TEST_LOCALE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
