use ratatui::{
    prelude::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

use crate::ui::styles;

pub fn render(frame: &mut Frame, rect: Rect) {
    let rect = crate::ui::rect::centered(64, 18, rect);

    let mut lines = vec![
        Line::from(""),
        Line::styled(
            format!("{} v{}", t!("app.title"), env!("CARGO_PKG_VERSION")),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];
    let tips = t!("help.tips");
    lines.extend(tips.lines().map(|line| Line::from(line.to_string())));
    let paragraph = Paragraph::new(lines).style(styles::popup()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border())
            .padding(Padding::horizontal(2))
            .title(Span::styled(t!("help.title"), styles::title())),
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(paragraph, rect);
}
