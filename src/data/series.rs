use time::Date;

use super::Ticker;

/// Daily OHLCV bar
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// Fold `other` (a later bar) into this one
    #[must_use]
    pub fn merge(self, other: &Bar) -> Self {
        Self {
            date: self.date,
            open: self.open,
            high: self.high.max(other.high),
            low: self.low.min(other.low),
            close: other.close,
            volume: self.volume.saturating_add(other.volume),
        }
    }
}

/// Daily history of one ticker, oldest bar first
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    pub ticker: Ticker,
    pub bars: Vec<Bar>,
}

impl Series {
    pub fn new(ticker: Ticker, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        bars.dedup_by_key(|bar| bar.date);
        Self { ticker, bars }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|bar| bar.close)
    }

    pub fn first_date(&self) -> Option<Date> {
        self.bars.first().map(|bar| bar.date)
    }

    pub fn last_date(&self) -> Option<Date> {
        self.bars.last().map(|bar| bar.date)
    }

    /// Merge consecutive bars so at most `max` remain
    pub fn compress(&self, max: usize) -> Vec<Bar> {
        if max == 0 {
            return vec![];
        }
        if self.bars.len() <= max {
            return self.bars.clone();
        }
        let per_bucket = self.bars.len().div_ceil(max);
        self.bars
            .chunks(per_bucket)
            .filter_map(|chunk| {
                let (first, rest) = chunk.split_first()?;
                Some(rest.iter().fold(*first, |acc, bar| acc.merge(bar)))
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use time::macros::date;

    pub fn bar(day: u8, close: f64) -> Bar {
        let date = Date::from_calendar_date(2024, time::Month::January, day)
            .unwrap_or(date!(2024 - 01 - 01));
        Bar {
            date,
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: 1_000,
        }
    }

    pub fn series(ticker: &str, closes: &[f64]) -> Series {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| bar(i as u8 + 1, close))
            .collect();
        Series::new(Ticker::new(ticker), bars)
    }
}
