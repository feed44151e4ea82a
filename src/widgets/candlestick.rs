use std::cmp::Ordering;

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::data::Bar;
use crate::ui::styles;

/// What a half cell of one column shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Empty,
    Wick,
    Body,
}

/// Glyph for a cell given its upper and lower half
fn glyph(upper: Mark, lower: Mark) -> char {
    match (upper, lower) {
        (Mark::Body, Mark::Body) => '┃',
        (Mark::Body, Mark::Wick) => '╿',
        (Mark::Wick, Mark::Body) => '╽',
        (Mark::Body, Mark::Empty) => '╹',
        (Mark::Empty, Mark::Body) => '╻',
        (Mark::Wick, Mark::Wick) => '│',
        (Mark::Wick, Mark::Empty) => '╵',
        (Mark::Empty, Mark::Wick) => '╷',
        (Mark::Empty, Mark::Empty) => ' ',
    }
}

/// Whether `[lo, hi]` covers part of the band `[from, to]`
fn covers(lo: f64, hi: f64, from: f64, to: f64) -> bool {
    if hi - lo <= f64::EPSILON {
        lo >= from && lo <= to
    } else {
        hi > from && lo < to
    }
}

fn mark(bar: &Bar, from: f64, to: f64) -> Mark {
    if covers(bar.open.min(bar.close), bar.open.max(bar.close), from, to) {
        Mark::Body
    } else if covers(bar.low, bar.high, from, to) {
        Mark::Wick
    } else {
        Mark::Empty
    }
}

/// One candle per column, oldest on the left, drawn with box characters at
/// half-cell vertical resolution
///
/// Callers compress the series to the area width first; extra bars are cut.
pub struct Candlestick<'a> {
    bars: &'a [Bar],
    low: f64,
    high: f64,
    bullish: Style,
    bearish: Style,
}

impl<'a> Candlestick<'a> {
    pub fn new(bars: &'a [Bar]) -> Self {
        let low = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let high = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let (low, high) = if high - low > f64::EPSILON {
            (low, high)
        } else {
            // flat or empty: give the scale some height
            let mid = if low.is_finite() { low } else { 0.0 };
            let pad = (mid.abs() * 0.01).max(1.0);
            (mid - pad, mid + pad)
        };
        Self {
            bars,
            low,
            high,
            bullish: styles::up(Ordering::Greater),
            bearish: styles::up(Ordering::Less),
        }
    }

    /// Price range mapped onto the area height
    pub fn bounds(&self) -> (f64, f64) {
        (self.low, self.high)
    }
}

impl Widget for Candlestick<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let half = (self.high - self.low) / f64::from(area.height) / 2.0;

        for (bar, x) in self.bars.iter().zip(area.left()..area.right()) {
            let style = if bar.is_bullish() {
                self.bullish
            } else {
                self.bearish
            };
            for row in 0..area.height {
                // row 0 is the bottom line
                let base = self.low + f64::from(row) * 2.0 * half;
                let lower = mark(bar, base, base + half);
                let upper = mark(bar, base + half, base + 2.0 * half);
                let ch = glyph(upper, lower);
                if ch != ' ' {
                    buf.get_mut(x, area.bottom() - 1 - row)
                        .set_char(ch)
                        .set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_row;
    use time::macros::date;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            date: date!(2024 - 03 - 01),
            open,
            high,
            low,
            close,
            volume: 0,
        }
    }

    fn draw(bars: &[Bar], width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        Candlestick::new(bars).render(area, &mut buf);
        (0..height).map(|y| buffer_row(&buf, y)).collect()
    }

    #[test]
    fn body_between_wicks() {
        let rows = draw(&[bar(10.0, 30.0, 0.0, 20.0)], 1, 3);
        assert_eq!(rows, ["│", "┃", "│"]);

        // body edges inside a cell use the half glyphs
        let rows = draw(&[bar(7.0, 30.0, 0.0, 23.0)], 1, 3);
        assert_eq!(rows, ["╽", "┃", "╿"]);
    }

    #[test]
    fn candles_scale_to_shared_range() {
        let rows = draw(
            &[bar(0.0, 10.0, 0.0, 10.0), bar(30.0, 40.0, 30.0, 40.0)],
            2,
            4,
        );
        assert_eq!(rows, [" ┃", "  ", "  ", "┃ "]);
    }

    #[test]
    fn colours_follow_direction() {
        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        let bars = [bar(1.0, 2.0, 1.0, 2.0), bar(2.0, 2.0, 1.0, 1.0)];
        Candlestick::new(&bars).render(area, &mut buf);
        assert_eq!(buf.get(0, 1).fg, styles::up_color(Ordering::Greater));
        assert_eq!(buf.get(1, 1).fg, styles::up_color(Ordering::Less));
    }

    #[test]
    fn flat_series_gets_a_range() {
        let candle = Candlestick::new(&[]);
        let (low, high) = candle.bounds();
        assert!(high > low);

        let bars = [bar(5.0, 5.0, 5.0, 5.0)];
        let (low, high) = Candlestick::new(&bars).bounds();
        assert!(low < 5.0 && high > 5.0);
    }

    #[test]
    fn extra_bars_are_cut() {
        let bars = vec![bar(1.0, 2.0, 0.0, 2.0); 5];
        let rows = draw(&bars, 3, 1);
        assert_eq!(rows[0].chars().count(), 3);
    }
}
