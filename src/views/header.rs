use ratatui::{
    prelude::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::dashboard::Controls;
use crate::ui::styles;

pub fn render(frame: &mut Frame, rect: Rect, controls: &Controls) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rect);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", t!("app.title")), styles::text_selected()),
        Span::styled(
            format!("  {} · {}", controls.group.label(), controls.period.label()),
            styles::dark_gray(),
        ),
    ]));

    let dark_gray_style = styles::dark_gray();
    let keys = [
        t!("keys.focus"),
        t!("keys.select"),
        t!("keys.reload"),
        t!("keys.help"),
        t!("keys.quit"),
    ];
    let hints = Paragraph::new(Span::styled(keys.join(" "), dark_gray_style))
        .alignment(Alignment::Right);

    frame.render_widget(title, chunks[0]);
    frame.render_widget(hints, chunks[1]);
}
