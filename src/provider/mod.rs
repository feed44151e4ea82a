use std::future::Future;

use anyhow::Result;

use crate::data::{Period, Series, Snapshot, Ticker};

pub mod memo;
pub mod yahoo;

pub use memo::Memo;
pub use yahoo::Yahoo;

/// Source of daily history and company info; the dashboard only talks to this
pub trait MarketData: Send + Sync {
    /// Daily bars of `ticker` over the lookback `period`
    ///
    /// An unknown symbol or an empty history is an error.
    fn history(
        &self,
        ticker: &Ticker,
        period: Period,
    ) -> impl Future<Output = Result<Series>> + Send;

    /// Descriptive info of `ticker`, never failing
    ///
    /// Implementations fall back to [`Snapshot::placeholder`].
    fn snapshot(&self, ticker: &Ticker) -> impl Future<Output = Snapshot> + Send;
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::{bail, Result};

    use super::MarketData;
    use crate::data::{series::fixtures, Period, Series, Snapshot, Ticker};

    /// Canned provider that counts calls
    #[derive(Default)]
    pub struct MockProvider {
        pub closes: HashMap<Ticker, Vec<f64>>,
        pub snapshots: HashMap<Ticker, Snapshot>,
        pub failing: HashSet<Ticker>,
        /// Answered with an empty series instead of an error
        pub empty: HashSet<Ticker>,
        pub history_calls: AtomicUsize,
        pub snapshot_calls: AtomicUsize,
    }

    impl MockProvider {
        #[must_use]
        pub fn with_series(mut self, symbol: &str, closes: &[f64]) -> Self {
            self.closes.insert(Ticker::new(symbol), closes.to_vec());
            self
        }

        #[must_use]
        pub fn with_snapshot(mut self, symbol: &str, snapshot: Snapshot) -> Self {
            self.snapshots.insert(Ticker::new(symbol), snapshot);
            self
        }

        #[must_use]
        pub fn failing(mut self, symbol: &str) -> Self {
            self.failing.insert(Ticker::new(symbol));
            self
        }

        #[must_use]
        pub fn empty(mut self, symbol: &str) -> Self {
            self.empty.insert(Ticker::new(symbol));
            self
        }

        pub fn history_calls(&self) -> usize {
            self.history_calls.load(Ordering::SeqCst)
        }

        pub fn snapshot_calls(&self) -> usize {
            self.snapshot_calls.load(Ordering::SeqCst)
        }
    }

    impl MarketData for MockProvider {
        async fn history(&self, ticker: &Ticker, _period: Period) -> Result<Series> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(ticker) {
                bail!("{ticker}: connection reset");
            }
            if self.empty.contains(ticker) {
                return Ok(Series::new(ticker.clone(), vec![]));
            }
            match self.closes.get(ticker) {
                Some(closes) if !closes.is_empty() => {
                    Ok(fixtures::series(ticker.as_str(), closes))
                }
                _ => bail!("{ticker}: no data found"),
            }
        }

        async fn snapshot(&self, ticker: &Ticker) -> Snapshot {
            self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
            self.snapshots
                .get(ticker)
                .cloned()
                .unwrap_or_else(Snapshot::placeholder)
        }
    }
}
