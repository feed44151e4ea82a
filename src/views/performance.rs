use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::dashboard::PerformanceRow;
use crate::helper::Sign;
use crate::ui::styles;

/// Index of the total return column
const RETURN_COLUMN: usize = 3;

const WIDTHS: [Constraint; 7] = [
    Constraint::Percentage(22),
    Constraint::Percentage(13),
    Constraint::Percentage(13),
    Constraint::Percentage(13),
    Constraint::Percentage(13),
    Constraint::Percentage(13),
    Constraint::Percentage(13),
];

/// Borders and header included
pub fn height(rows: usize) -> u16 {
    rows as u16 + 3
}

pub fn render(frame: &mut Frame, rect: Rect, rows: &[PerformanceRow]) {
    let header = Row::new(PerformanceRow::headers().map(Cell::from)).style(styles::header());
    let body = rows.iter().map(|row| {
        let change = styles::up(row.performance.change_percent.sign());
        Row::new(row.cells().into_iter().enumerate().map(|(i, cell)| {
            if i == RETURN_COLUMN {
                Cell::from(cell).style(change)
            } else {
                Cell::from(cell)
            }
        }))
    });

    let table = Table::new(body)
        .header(header)
        .widths(&WIDTHS)
        .column_spacing(1)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles::border())
                .title(Span::styled(t!("performance.title"), styles::title())),
        );
    frame.render_widget(table, rect);
}
