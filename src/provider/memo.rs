use anyhow::Result;
use dashmap::DashMap;

use super::MarketData;
use crate::data::{Period, Series, Snapshot, Ticker};

/// Process-lifetime memo of provider results
///
/// Only successful histories and snapshots carrying a sector or market cap
/// are kept, so a failed fetch is attempted again on the next render.
/// Nothing is ever evicted.
pub struct Memo<P> {
    inner: P,
    history: DashMap<(Ticker, Period), Series>,
    snapshot: DashMap<Ticker, Snapshot>,
}

impl<P> Memo<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            history: DashMap::new(),
            snapshot: DashMap::new(),
        }
    }

    /// Number of memoized entries (histories, snapshots)
    pub fn len(&self) -> (usize, usize) {
        (self.history.len(), self.snapshot.len())
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty() && self.snapshot.is_empty()
    }
}

impl<P: MarketData> MarketData for Memo<P> {
    async fn history(&self, ticker: &Ticker, period: Period) -> Result<Series> {
        let key = (ticker.clone(), period);
        let cached = self.history.get(&key).map(|entry| entry.value().clone());
        if let Some(series) = cached {
            tracing::trace!(%ticker, %period, "history served from memo");
            return Ok(series);
        }

        let series = self.inner.history(ticker, period).await?;
        self.history.insert(key, series.clone());
        Ok(series)
    }

    async fn snapshot(&self, ticker: &Ticker) -> Snapshot {
        let cached = self.snapshot.get(ticker).map(|entry| entry.value().clone());
        if let Some(snapshot) = cached {
            return snapshot;
        }

        let snapshot = self.inner.snapshot(ticker).await;
        if !snapshot.is_partial() {
            self.snapshot.insert(ticker.clone(), snapshot.clone());
        }
        snapshot
    }
}
