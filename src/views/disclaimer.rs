use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::styles;

pub const HEIGHT: u16 = 6;

/// Static lines shown under every complete render
pub fn lines() -> Vec<String> {
    vec![
        t!("disclaimer.source"),
        t!("disclaimer.not_advice"),
        t!("disclaimer.past_performance"),
    ]
}

pub fn render(frame: &mut Frame, rect: Rect) {
    let text: Vec<Line> = lines()
        .into_iter()
        .map(|line| Line::from(Span::styled(line, styles::gray())))
        .collect();
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border())
            .title(Span::styled(t!("disclaimer.title"), styles::info())),
    );
    frame.render_widget(paragraph, rect);
}
