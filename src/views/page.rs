use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::dashboard::Dashboard;
use crate::ui::{rect::take_top, styles};

use super::{cards, charts, disclaimer, performance};

/// Informational lines shown above the cards
fn notices(dashboard: &Dashboard) -> Vec<Line<'static>> {
    let info = dashboard
        .candlestick_notice()
        .map(|notice| Line::from(Span::styled(notice, styles::info())));
    let warning = dashboard
        .skipped_notice()
        .map(|notice| Line::from(Span::styled(notice, styles::warning())));
    info.into_iter().chain(warning).collect()
}

/// Cards, price chart, performance table, volume chart and disclaimer
pub fn render(frame: &mut Frame, rect: Rect, dashboard: &Dashboard) {
    let notices = notices(dashboard);
    let notice_height = notices.len() as u16;
    let cards_height = cards::height(dashboard.loaded.len());
    let table_height = performance::height(dashboard.performance.len());

    let (notice_area, rect) = take_top(rect, notice_height);
    let fixed = cards_height + table_height + disclaimer::HEIGHT;
    let charts = rect.height.saturating_sub(fixed);
    let price_height = charts * 3 / 5;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(cards_height),
            Constraint::Length(price_height),
            Constraint::Length(table_height),
            Constraint::Length(charts - price_height),
            Constraint::Length(disclaimer::HEIGHT),
        ])
        .split(rect);

    frame.render_widget(Paragraph::new(notices), notice_area);
    cards::render(frame, chunks[0], &dashboard.loaded);
    charts::render_price(frame, chunks[1], dashboard);
    performance::render(frame, chunks[2], &dashboard.performance);
    charts::render_volume(frame, chunks[3], dashboard);
    disclaimer::render(frame, chunks[4]);
}
