use std::fmt::Write as _;

use crate::dashboard::{Dashboard, PerformanceRow};
use crate::helper::{format_market_cap, format_price, format_volume};
use crate::ui::text::{align_left, align_right, max_width};

const GAP: &str = "  ";

fn table(rows: &[PerformanceRow]) -> Vec<String> {
    let header = PerformanceRow::headers();
    let cells: Vec<[String; 7]> = rows.iter().map(PerformanceRow::cells).collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            max_width(
                std::iter::once(header[col].as_str())
                    .chain(cells.iter().map(|row| row[col].as_str())),
            )
        })
        .collect();

    let line = |row: &[String; 7]| {
        row.iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, &width))| {
                if col == 0 {
                    align_left(cell, width)
                } else {
                    align_right(cell, width)
                }
            })
            .collect::<Vec<_>>()
            .join(GAP)
            .trim_end()
            .to_string()
    };

    std::iter::once(line(&header))
        .chain(cells.iter().map(line))
        .collect()
}

/// Plain-text rendering of one dashboard pass, for `--print`
pub fn render(dashboard: &Dashboard) -> String {
    let controls = &dashboard.controls;
    let mut out = String::new();

    _ = writeln!(
        out,
        "{} · {} · {}",
        t!("app.title"),
        controls.group.label(),
        controls.period.label()
    );
    out.push('\n');

    for notice in [dashboard.candlestick_notice(), dashboard.skipped_notice()]
        .into_iter()
        .flatten()
    {
        _ = writeln!(out, "{notice}");
    }

    for loaded in &dashboard.loaded {
        let snapshot = &loaded.snapshot;
        _ = writeln!(out, "\n{} ({})", loaded.company.name, loaded.company.symbol);
        _ = writeln!(out, "  {}", format_price(snapshot.current_price));
        _ = writeln!(
            out,
            "  {}",
            t!("card.market_cap", cap = format_market_cap(snapshot.market_cap))
        );
        _ = writeln!(out, "  {}", t!("card.sector", sector = snapshot.sector));
        if let Some(last) = loaded.series.bars.last() {
            _ = writeln!(
                out,
                "  {}",
                t!("card.last_volume", volume = format_volume(last.volume))
            );
        }
    }

    _ = writeln!(out, "\n{}", t!("performance.title"));
    for line in table(&dashboard.performance) {
        _ = writeln!(out, "{line}");
    }

    _ = writeln!(out, "\n{}", t!("disclaimer.title"));
    for line in crate::views::disclaimer_lines() {
        _ = writeln!(out, "- {line}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Group;
    use crate::dashboard::{evaluate, Controls, Outcome};
    use crate::data::{ChartStyle, Period, Snapshot};
    use crate::helper::TEST_LOCALE_LOCK;
    use crate::provider::mock::MockProvider;

    async fn dashboard(provider: &MockProvider, symbols: &[&str], chart: ChartStyle) -> Dashboard {
        let group = Group::TopMarketCap;
        let controls = Controls {
            group,
            selected: symbols.iter().filter_map(|s| group.find_symbol(s)).collect(),
            period: Period::TwoYears,
            chart,
        };
        match evaluate(provider, &controls).await {
            Outcome::Ready(dashboard) => *dashboard,
            Outcome::Halted(halt) => panic!("unexpected halt: {halt:?}"),
        }
    }

    #[tokio::test]
    async fn report_lists_cards_table_and_disclaimer() {
        let provider = MockProvider::default()
            .with_series("AAPL", &[100.0, 110.0])
            .with_snapshot(
                "AAPL",
                Snapshot {
                    name: "Apple Inc.".to_string(),
                    sector: "Technology".to_string(),
                    market_cap: 3.1e12,
                    current_price: 110.0,
                },
            )
            .with_series("V", &[200.0, 180.0]);
        let dashboard = dashboard(&provider, &["AAPL", "V"], ChartStyle::Line).await;

        let _guard = TEST_LOCALE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        rust_i18n::set_locale("en");
        let text = render(&dashboard);

        assert!(text.starts_with("Stock dashboard"));
        assert!(text.contains("Apple (AAPL)\n  $110.00\n  Market cap: $3.10T\n  Sector: Technology"));
        assert!(text.contains("Sector: N/A"));
        assert!(text.contains("Last volume: 1,000"));
        assert!(text.contains("10.00%"));
        assert!(text.contains("-10.00%"));
        assert!(text.contains("- Data source: Yahoo Finance"));
        assert!(!text.contains("Candlestick"));
    }

    #[tokio::test]
    async fn report_carries_notices() {
        let provider = MockProvider::default()
            .with_series("MSFT", &[1.0, 2.0])
            .failing("AMZN");
        let dashboard =
            dashboard(&provider, &["MSFT", "AMZN", "NVDA"], ChartStyle::Candlestick).await;

        let _guard = TEST_LOCALE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        rust_i18n::set_locale("en");
        let text = render(&dashboard);

        assert!(text.contains("Candlestick chart shows one company only: Microsoft"));
        assert!(text.contains("Could not load: Amazon, NVIDIA"));
    }

    #[test]
    fn table_columns_line_up() {
        let rows = [
            PerformanceRow {
                company: "Apple",
                performance: crate::analysis::Performance::from_closes(&[100.0, 110.0])
                    .expect("closes"),
            },
            PerformanceRow {
                company: "Berkshire Hathaway",
                performance: crate::analysis::Performance::from_closes(&[1000.0, 900.0])
                    .expect("closes"),
            },
        ];

        let _guard = TEST_LOCALE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        rust_i18n::set_locale("en");
        let lines = table(&rows);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Apple              "));
        assert!(lines[2].starts_with("Berkshire Hathaway  "));
        // right-aligned numeric columns end together
        assert_eq!(lines[1].len(), lines[2].len());
    }
}
