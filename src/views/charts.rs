use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use time::Date;

use crate::dashboard::{Dashboard, Loaded};
use crate::helper::{format_price, number::format_axis_volume};
use crate::ui::styles;
use crate::widgets::Candlestick;

/// Width of the price labels left of the candles
const LABEL_WIDTH: u16 = 10;

/// One line of a comparison chart
struct Trace {
    name: String,
    color: Color,
    points: Vec<(f64, f64)>,
}

fn x_of(date: Date) -> f64 {
    f64::from(date.to_julian_day())
}

fn date_of(x: f64) -> String {
    Date::from_julian_day(x.round() as i32)
        .map(|date| date.to_string())
        .unwrap_or_default()
}

/// Min and max of `values`, padded so a flat line sits mid-chart
fn padded_bounds(values: impl Iterator<Item = f64>, floor_zero: bool) -> [f64; 2] {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let span = hi - lo;
    let pad = if span > f64::EPSILON {
        span * 0.05
    } else {
        (hi.abs() * 0.05).max(1.0)
    };
    let lo = if floor_zero { 0.0 } else { lo - pad };
    [lo, hi + pad]
}

fn x_bounds(loaded: &[Loaded]) -> [f64; 2] {
    let first = loaded.iter().filter_map(|l| l.series.first_date()).min();
    let last = loaded.iter().filter_map(|l| l.series.last_date()).max();
    match (first, last) {
        (Some(first), Some(last)) if last > first => [x_of(first), x_of(last)],
        (Some(first), _) => [x_of(first) - 1.0, x_of(first) + 1.0],
        _ => [0.0, 1.0],
    }
}

fn labels(bounds: [f64; 2], format: impl Fn(f64) -> String) -> Vec<Span<'static>> {
    let [lo, hi] = bounds;
    [lo, (lo + hi) / 2.0, hi]
        .into_iter()
        .map(|v| Span::styled(format(v), styles::label()))
        .collect()
}

fn comparison(
    frame: &mut Frame,
    rect: Rect,
    title: String,
    traces: &[Trace],
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    y_label: impl Fn(f64) -> String,
) {
    let datasets = traces
        .iter()
        .map(|trace| {
            Dataset::default()
                .name(trace.name.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(trace.color))
                .data(&trace.points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles::border())
                .title(Span::styled(title, styles::title())),
        )
        .x_axis(
            Axis::default()
                .style(styles::dark_gray())
                .bounds(x_bounds)
                .labels(labels(x_bounds, date_of)),
        )
        .y_axis(
            Axis::default()
                .style(styles::dark_gray())
                .bounds(y_bounds)
                .labels(labels(y_bounds, y_label)),
        );
    frame.render_widget(chart, rect);
}

/// Closing prices of every loaded company, or the candlestick of one
pub fn render_price(frame: &mut Frame, rect: Rect, dashboard: &Dashboard) {
    if let Some(loaded) = dashboard.candlestick() {
        render_candles(frame, rect, dashboard.price_title(), loaded);
        return;
    }

    let traces: Vec<Trace> = dashboard
        .loaded
        .iter()
        .enumerate()
        .map(|(i, l)| Trace {
            name: l.company.name.to_string(),
            color: styles::series_color(i),
            points: l.series.bars.iter().map(|b| (x_of(b.date), b.close)).collect(),
        })
        .collect();
    let y_bounds = padded_bounds(
        dashboard.loaded.iter().flat_map(|l| l.series.closes()),
        false,
    );
    comparison(
        frame,
        rect,
        dashboard.price_title(),
        &traces,
        x_bounds(&dashboard.loaded),
        y_bounds,
        format_price,
    );
}

/// Daily traded volume of every loaded company
pub fn render_volume(frame: &mut Frame, rect: Rect, dashboard: &Dashboard) {
    let traces: Vec<Trace> = dashboard
        .loaded
        .iter()
        .enumerate()
        .map(|(i, l)| Trace {
            name: l.company.name.to_string(),
            color: styles::series_color(i),
            points: l
                .series
                .bars
                .iter()
                .map(|b| (x_of(b.date), b.volume as f64))
                .collect(),
        })
        .collect();
    let y_bounds = padded_bounds(
        dashboard
            .loaded
            .iter()
            .flat_map(|l| l.series.bars.iter().map(|b| b.volume as f64)),
        true,
    );
    comparison(
        frame,
        rect,
        dashboard.volume_title(),
        &traces,
        x_bounds(&dashboard.loaded),
        y_bounds,
        format_axis_volume,
    );
}

fn render_candles(frame: &mut Frame, rect: Rect, title: String, loaded: &Loaded) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border())
        .title(Span::styled(title, styles::title()));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)])
        .split(rows[0]);
    let (labels_area, plot) = (cols[0], cols[1]);

    let bars = loaded.series.compress(usize::from(plot.width));
    let candles = Candlestick::new(&bars);
    let (low, high) = candles.bounds();
    frame.render_widget(candles, plot);

    if labels_area.height > 0 {
        let top = Rect {
            height: 1,
            ..labels_area
        };
        let bottom = Rect {
            y: labels_area.bottom() - 1,
            height: 1,
            ..labels_area
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format_price(high), styles::label())),
            top,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(format_price(low), styles::label())),
            bottom,
        );
    }

    let dates = Rect {
        x: plot.x,
        width: plot.width,
        ..rows[1]
    };
    let first = bars.first().map(|b| b.date.to_string()).unwrap_or_default();
    let last = bars.last().map(|b| b.date.to_string()).unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Span::styled(first, styles::label())),
        dates,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(last, styles::label())).alignment(Alignment::Right),
        dates,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_pad_the_range() {
        assert_eq!(padded_bounds([10.0, 30.0].into_iter(), false), [9.0, 31.0]);
        assert_eq!(padded_bounds([10.0, 30.0].into_iter(), true), [0.0, 31.0]);
        assert_eq!(padded_bounds(std::iter::empty(), false), [0.0, 1.0]);

        let [lo, hi] = padded_bounds([5.0].into_iter(), false);
        assert!(lo < 5.0 && hi > 5.0);
    }

    #[test]
    fn julian_day_labels() {
        let date = time::macros::date!(2024 - 01 - 05);
        assert_eq!(date_of(x_of(date)), "2024-01-05");
    }
}
