use std::cmp::Ordering;

use ratatui::style::{Color, Modifier, Style};

/// Qualitative palette for per-company series
const SERIES: [Color; 8] = [
    Color::LightBlue,
    Color::LightYellow,
    Color::LightMagenta,
    Color::LightCyan,
    Color::LightGreen,
    Color::LightRed,
    Color::Blue,
    Color::Yellow,
];

#[inline]
pub fn header() -> Style {
    Style::default().fg(Color::Gray)
}

#[inline]
pub fn gray() -> Style {
    Style::default().fg(Color::Gray)
}

#[inline]
pub fn dark_gray() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[inline]
pub fn label() -> Style {
    Style::default().fg(Color::Gray)
}

#[inline]
pub fn text() -> Style {
    Style::default().fg(Color::Reset)
}

#[inline]
pub fn primary() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

#[inline]
pub fn text_selected() -> Style {
    text().add_modifier(Modifier::REVERSED)
}

#[inline]
pub fn popup() -> Style {
    text()
}

#[inline]
pub fn title() -> Style {
    text().add_modifier(Modifier::BOLD)
}

#[inline]
pub fn border() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[inline]
pub fn border_focused() -> Style {
    Style::default().fg(Color::LightBlue)
}

#[inline]
pub fn info() -> Style {
    Style::default().fg(Color::LightBlue)
}

#[inline]
pub fn warning() -> Style {
    Style::default().fg(Color::Yellow)
}

#[inline]
pub fn error() -> Style {
    Style::default().fg(Color::LightRed)
}

/// Green up, red down
#[inline]
pub fn up(val: Ordering) -> Style {
    Style::default().fg(up_color(val))
}

#[inline]
pub fn up_color(val: Ordering) -> Color {
    match val {
        Ordering::Less => Color::LightRed,
        Ordering::Equal => Color::Reset,
        Ordering::Greater => Color::LightGreen,
    }
}

/// Colour of the `index`-th company, cycling through the palette
#[inline]
pub fn series_color(index: usize) -> Color {
    SERIES[index % SERIES.len()]
}

#[inline]
pub fn series(index: usize) -> Style {
    Style::default().fg(series_color(index))
}
