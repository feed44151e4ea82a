use crate::data::Series;

/// Return and range statistics of one closing-price series
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Performance {
    pub first_close: f64,
    pub last_close: f64,
    /// (last - first) / first, in percent
    pub change_percent: f64,
    pub max_close: f64,
    pub min_close: f64,
    /// Sample standard deviation; `None` below two observations
    pub std_dev: Option<f64>,
}

impl Performance {
    pub fn from_closes(closes: &[f64]) -> Option<Self> {
        let (&first_close, &last_close) = (closes.first()?, closes.last()?);
        let max_close = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_close = closes.iter().copied().fold(f64::INFINITY, f64::min);

        Some(Self {
            first_close,
            last_close,
            change_percent: (last_close - first_close) / first_close * 100.0,
            max_close,
            min_close,
            std_dev: sample_std_dev(closes),
        })
    }

    pub fn from_series(series: &Series) -> Option<Self> {
        let closes: Vec<f64> = series.closes().collect();
        Self::from_closes(&closes)
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Standard deviation with the n - 1 denominator
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}
