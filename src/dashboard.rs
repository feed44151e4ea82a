use itertools::Itertools;

use crate::analysis::Performance;
use crate::catalog::{Company, Group};
use crate::data::{ChartStyle, Period, Series, Snapshot};
use crate::helper::{format_percent, format_price};
use crate::provider::MarketData;

/// Current values of the sidebar controls
#[derive(Clone, Debug, PartialEq)]
pub struct Controls {
    pub group: Group,
    pub selected: Vec<Company>,
    pub period: Period,
    pub chart: ChartStyle,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(Group::default())
    }
}

impl Controls {
    pub fn new(group: Group) -> Self {
        Self {
            group,
            selected: group.default_selection(),
            period: Period::default(),
            chart: ChartStyle::default(),
        }
    }

    /// Switch group; the selection resets to the group's default
    pub fn set_group(&mut self, group: Group) {
        if self.group != group {
            self.group = group;
            self.selected = group.default_selection();
        }
    }

    pub fn is_selected(&self, company: Company) -> bool {
        self.selected.contains(&company)
    }

    /// Toggle `company`, keeping the selection in catalog order
    pub fn toggle(&mut self, company: Company) {
        if let Some(pos) = self.selected.iter().position(|c| *c == company) {
            self.selected.remove(pos);
        } else {
            self.selected.push(company);
            let group = self.group;
            self.selected.sort_by_key(|c| {
                group
                    .companies()
                    .position(|other| other == *c)
                    .unwrap_or(usize::MAX)
            });
        }
    }
}

/// Why a render stopped before drawing charts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Halt {
    /// Nothing selected; no fetch is made
    NoSelection,
    /// Every selected company failed to load
    NoData,
}

impl Halt {
    pub fn message(self) -> String {
        match self {
            Self::NoSelection => t!("notice.no_selection"),
            Self::NoData => t!("notice.no_data"),
        }
    }

    pub fn is_warning(self) -> bool {
        matches!(self, Self::NoSelection)
    }
}

/// A company whose history loaded in this pass
#[derive(Clone, Debug, PartialEq)]
pub struct Loaded {
    pub company: Company,
    pub series: Series,
    pub snapshot: Snapshot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceChart {
    /// Closing price of every loaded company
    Lines,
    /// OHLC of one loaded company, by index into `Dashboard::loaded`
    Candlestick { index: usize, single_only_notice: bool },
}

/// One row of the performance table
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceRow {
    pub company: &'static str,
    pub performance: Performance,
}

impl PerformanceRow {
    pub fn headers() -> [String; 7] {
        [
            t!("performance.company"),
            t!("performance.start"),
            t!("performance.end"),
            t!("performance.return"),
            t!("performance.high"),
            t!("performance.low"),
            t!("performance.volatility"),
        ]
    }

    pub fn cells(&self) -> [String; 7] {
        let p = &self.performance;
        [
            self.company.to_string(),
            format_price(p.first_close),
            format_price(p.last_close),
            format_percent(p.change_percent),
            format_price(p.max_close),
            format_price(p.min_close),
            p.std_dev
                .map_or_else(|| "--".to_string(), |std| format!("{std:.2}")),
        ]
    }
}

/// Everything a complete render shows
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub controls: Controls,
    pub loaded: Vec<Loaded>,
    /// Selected companies whose history could not be fetched
    pub skipped: Vec<Company>,
    pub price_chart: PriceChart,
    pub performance: Vec<PerformanceRow>,
}

impl Dashboard {
    pub fn candlestick(&self) -> Option<&Loaded> {
        match self.price_chart {
            PriceChart::Candlestick { index, .. } => self.loaded.get(index),
            PriceChart::Lines => None,
        }
    }

    pub fn price_title(&self) -> String {
        match self.candlestick() {
            Some(loaded) => t!(
                "chart.candlestick_title",
                company = loaded.company.name,
                period = self.controls.period.label()
            ),
            None => t!("chart.price_title", period = self.controls.period.label()),
        }
    }

    /// Shown when candlestick mode drops all but one company
    pub fn candlestick_notice(&self) -> Option<String> {
        match self.price_chart {
            PriceChart::Candlestick {
                single_only_notice: true,
                ..
            } => self
                .candlestick()
                .map(|l| t!("notice.candlestick_first", company = l.company.name)),
            _ => None,
        }
    }

    pub fn skipped_notice(&self) -> Option<String> {
        if self.skipped.is_empty() {
            return None;
        }
        let names = self.skipped.iter().map(|c| c.name).join(", ");
        Some(t!("notice.skipped", companies = names))
    }

    pub fn volume_title(&self) -> String {
        t!("chart.volume_title", period = self.controls.period.label())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Halted(Halt),
    Ready(Box<Dashboard>),
}

/// Fetch everything the current controls need and lay out the page model
///
/// Companies are fetched one at a time in selection order. A company whose
/// history fails is left out of the page; its snapshot is not requested.
pub async fn evaluate<P: MarketData>(provider: &P, controls: &Controls) -> Outcome {
    if controls.selected.is_empty() {
        tracing::info!("no company selected");
        return Outcome::Halted(Halt::NoSelection);
    }

    let mut loaded = Vec::with_capacity(controls.selected.len());
    let mut skipped = Vec::new();
    for &company in &controls.selected {
        let ticker = company.ticker();
        match provider.history(&ticker, controls.period).await {
            Ok(series) if !series.is_empty() => {
                let snapshot = provider.snapshot(&ticker).await;
                if snapshot.is_placeholder() {
                    tracing::debug!(%ticker, "no company info, card shows placeholders");
                }
                loaded.push(Loaded {
                    company,
                    series,
                    snapshot,
                });
            }
            Ok(_) => {
                tracing::warn!(%ticker, "empty history, skipping");
                skipped.push(company);
            }
            Err(err) => {
                tracing::warn!(%ticker, error = %err, "history unavailable, skipping");
                skipped.push(company);
            }
        }
    }

    if loaded.is_empty() {
        tracing::error!(selected = controls.selected.len(), "no company could be loaded");
        return Outcome::Halted(Halt::NoData);
    }

    let price_chart = match controls.chart {
        ChartStyle::Line => PriceChart::Lines,
        ChartStyle::Candlestick => {
            // the first selected company, or the first one that loaded
            let index = loaded
                .iter()
                .position(|l| Some(&l.company) == controls.selected.first())
                .unwrap_or_default();
            PriceChart::Candlestick {
                index,
                single_only_notice: controls.selected.len() > 1,
            }
        }
    };

    let performance = loaded
        .iter()
        .filter_map(|l| {
            Performance::from_series(&l.series).map(|performance| PerformanceRow {
                company: l.company.name,
                performance,
            })
        })
        .collect();

    Outcome::Ready(Box::new(Dashboard {
        controls: controls.clone(),
        loaded,
        skipped,
        price_chart,
        performance,
    }))
}
