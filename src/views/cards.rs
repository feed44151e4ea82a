use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::dashboard::Loaded;
use crate::helper::{format_market_cap, format_price};
use crate::ui::styles;

const PER_ROW: usize = 5;
const CARD_HEIGHT: u16 = 5;

pub fn height(count: usize) -> u16 {
    count.div_ceil(PER_ROW) as u16 * CARD_HEIGHT
}

fn card<'a>(loaded: &Loaded, index: usize) -> Paragraph<'a> {
    let snapshot = &loaded.snapshot;
    let lines = vec![
        Line::from(Span::styled(
            format_price(snapshot.current_price),
            styles::primary(),
        )),
        Line::from(Span::styled(
            t!("card.market_cap", cap = format_market_cap(snapshot.market_cap)),
            styles::label(),
        )),
        Line::from(Span::styled(
            t!("card.sector", sector = snapshot.sector),
            styles::dark_gray(),
        )),
    ];
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border())
            .title(Span::styled(loaded.company.name, styles::series(index))),
    )
}

/// Metric cards, `PER_ROW` to a row
pub fn render(frame: &mut Frame, rect: Rect, loaded: &[Loaded]) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(CARD_HEIGHT);
            loaded.len().div_ceil(PER_ROW)
        ])
        .split(rect);

    for (r, (row, chunk)) in rows.iter().zip(loaded.chunks(PER_ROW)).enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, PER_ROW as u32); PER_ROW])
            .split(*row);
        for (c, (col, loaded)) in cols.iter().zip(chunk).enumerate() {
            frame.render_widget(card(loaded, r * PER_ROW + c), *col);
        }
    }
}
